//! # bgmix Common Library
//!
//! Shared code for the bgmix workspace:
//! - Fade/easing curve definitions and evaluation
//! - Mix parameter ranges and clamping

pub mod fade_curves;
pub mod params;

pub use fade_curves::FadeCurve;
