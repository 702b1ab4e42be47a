//! Mix parameter ranges and clamping
//!
//! Valid ranges for the global mix state. Out-of-range inputs are clamped,
//! never rejected.

/// Minimum global volume multiplier.
pub const VOLUME_MIN: f32 = 0.0;
/// Maximum global volume multiplier.
pub const VOLUME_MAX: f32 = 1.0;

/// Minimum playback pitch multiplier.
pub const PITCH_MIN: f32 = 0.1;
/// Maximum playback pitch multiplier.
pub const PITCH_MAX: f32 = 3.0;

/// Full left stereo pan.
pub const PAN_MIN: f32 = -1.0;
/// Full right stereo pan.
pub const PAN_MAX: f32 = 1.0;

/// Clamp a volume multiplier to [0.0, 1.0].
pub fn clamp_volume(v: f32) -> f32 {
    v.clamp(VOLUME_MIN, VOLUME_MAX)
}

/// Clamp a pitch multiplier to [0.1, 3.0].
pub fn clamp_pitch(v: f32) -> f32 {
    v.clamp(PITCH_MIN, PITCH_MAX)
}

/// Clamp a stereo pan to [-1.0, 1.0].
pub fn clamp_pan(v: f32) -> f32 {
    v.clamp(PAN_MIN, PAN_MAX)
}
