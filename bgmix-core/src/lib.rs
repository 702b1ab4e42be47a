//! # bgmix Music Mixer (bgmix-core)
//!
//! Dual-channel crossfading music mixer for a 2D game runtime.
//!
//! **Purpose:** Switch background tracks with seamless crossfades, hold a
//! process-wide volume/pitch/pan mix state, and ramp it over time while
//! preserving the audible channels' relative balance.
//!
//! **Architecture:** Two playback channels (A/B) alternating the "currently
//! audible" and "next to play" roles, driven by a per-frame `tick` fed with
//! unscaled delta time. No threads, no locks: all state is owned by the
//! mixer object and mutated from one logical thread.

pub mod config;
pub mod error;
pub mod events;
pub mod mixer;
pub mod registry;
pub mod source;

pub use config::MixerConfig;
pub use error::{Error, Result};
pub use events::MixerEvent;
pub use mixer::MusicMixer;
pub use source::{AudioClip, AudioSource};
