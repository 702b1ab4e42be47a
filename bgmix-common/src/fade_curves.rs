//! Fade curve implementations for crossfading and ramps
//!
//! Provides the easing curves used by the crossfade scheduler and the
//! global mix controller, evaluated over normalized time in [0.0, 1.0].

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Clamp a value to the unit interval.
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b` at clamped `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Hermite smoothstep: `3t² − 2t³` over clamped `t`.
///
/// Zero slope at both edges, which is what keeps gain changes free of
/// audible discontinuities at the start and end of a fade.
pub fn smoothstep(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// Fade curve types for crossfading and ramps
///
/// Each curve type provides a different perceptual quality:
/// - Linear: constant rate of change (stop fades, pitch/pan ramps)
/// - SmoothStep: smooth acceleration and deceleration (crossfades, volume ramps)
/// - EqualPower: constant perceived loudness during a crossfade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// Linear: v(t) = t
    Linear,

    /// SmoothStep: v(t) = 3t² − 2t³
    /// Slope-continuous at both edges
    SmoothStep,

    /// Equal-Power: v(t) = sin(t × π/2)
    /// Maintains constant perceived loudness when paired with its fade-out
    EqualPower,
}

impl FadeCurve {
    /// Calculate fade-in multiplier at given position
    ///
    /// # Arguments
    /// * `position` - Normalized position through fade (0.0 to 1.0)
    ///
    /// # Returns
    /// Volume multiplier (0.0 = silence, 1.0 = full volume)
    pub fn fade_in(&self, position: f32) -> f32 {
        let t = clamp01(position);

        match self {
            FadeCurve::Linear => t,
            FadeCurve::SmoothStep => smoothstep(t),
            FadeCurve::EqualPower => (t * FRAC_PI_2).sin(),
        }
    }

    /// Calculate fade-out multiplier at given position
    ///
    /// # Arguments
    /// * `position` - Normalized position through fade (0.0 to 1.0)
    ///
    /// # Returns
    /// Volume multiplier (1.0 = full volume at start, 0.0 = silence at end)
    pub fn fade_out(&self, position: f32) -> f32 {
        let t = clamp01(position);

        match self {
            FadeCurve::Linear => 1.0 - t,
            // SmoothStep is symmetric: fade_out(t) == 1 − fade_in(t)
            FadeCurve::SmoothStep => smoothstep(1.0 - t),
            FadeCurve::EqualPower => (t * FRAC_PI_2).cos(),
        }
    }
}

impl Default for FadeCurve {
    /// Default curve is SmoothStep: slope-continuous gain at fade edges.
    fn default() -> Self {
        FadeCurve::SmoothStep
    }
}
