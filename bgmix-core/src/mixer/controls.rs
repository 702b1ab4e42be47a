//! Global mix controller: process-wide volume/pitch/pan and their ramps
//!
//! Ramps are explicit state objects advanced by the per-frame tick, each
//! holding (start, target, duration, elapsed). Only one ramp of each kind may
//! be active; starting a new one cancels and replaces its predecessor within
//! the same tick, so no two ramps ever write the same field.

use crate::mixer::channel::{ChannelId, ChannelPair};
use crate::source::AudioSource;
use bgmix_common::fade_curves::{clamp01, lerp, FadeCurve};
use bgmix_common::params;
use tracing::debug;

/// A single time-based ramp toward a target value.
#[derive(Debug, Clone)]
pub struct Ramp {
    start: f32,
    target: f32,
    duration: f32,
    elapsed: f32,
    curve: FadeCurve,
}

impl Ramp {
    /// Create a ramp. `duration` must be positive; zero-duration changes are
    /// applied immediately by the caller instead of creating a ramp.
    pub fn new(start: f32, target: f32, duration: f32, curve: FadeCurve) -> Self {
        Self {
            start,
            target,
            duration,
            elapsed: 0.0,
            curve,
        }
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        let k = self.curve.fade_in(clamp01(self.elapsed / self.duration));
        lerp(self.start, self.target, k)
    }

    /// Whether the ramp has reached its duration.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The ramp's target value.
    pub fn target(&self) -> f32 {
        self.target
    }
}

/// A linear ramp driving both channels from their own current values to a
/// shared target.
///
/// Pitch and pan can differ between the two channels mid-transition, so each
/// side starts from where it actually is and the two meet at the target.
#[derive(Debug, Clone)]
pub struct DualRamp {
    start_a: f32,
    start_b: f32,
    target: f32,
    duration: f32,
    elapsed: f32,
}

impl DualRamp {
    /// Create a dual ramp. `duration` must be positive.
    pub fn new(start_a: f32, start_b: f32, target: f32, duration: f32) -> Self {
        Self {
            start_a,
            start_b,
            target,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current (A, B) values.
    pub fn advance(&mut self, dt: f32) -> (f32, f32) {
        self.elapsed += dt;
        let t = clamp01(self.elapsed / self.duration);
        (
            lerp(self.start_a, self.target, t),
            lerp(self.start_b, self.target, t),
        )
    }

    /// Whether the ramp has reached its duration.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The shared target value.
    pub fn target(&self) -> f32 {
        self.target
    }
}

/// Process-wide mix state: volume, pitch, pan and at most one active ramp of
/// each kind.
pub struct MixControls {
    volume: f32,
    pitch: f32,
    pan: f32,
    volume_ramp: Option<Ramp>,
    pitch_ramp: Option<DualRamp>,
    pan_ramp: Option<DualRamp>,
}

impl MixControls {
    /// Initial mix state, clamped to valid ranges.
    pub fn new(volume: f32, pitch: f32, pan: f32) -> Self {
        Self {
            volume: params::clamp_volume(volume),
            pitch: params::clamp_pitch(pitch),
            pan: params::clamp_pan(pan),
            volume_ramp: None,
            pitch_ramp: None,
            pan_ramp: None,
        }
    }

    /// Current global volume multiplier.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Current global pitch multiplier.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current global stereo pan.
    pub fn pan(&self) -> f32 {
        self.pan
    }

    /// Set the global volume multiplier, optionally ramped.
    ///
    /// An immediate set (`ramp ≤ 0`) rescales both channel gains right away
    /// per the ratio-preservation rule; a ramp re-derives them on every tick.
    /// A new call cancels and replaces any ramp in flight.
    pub fn set_volume<S: AudioSource>(
        &mut self,
        pair: &mut ChannelPair<S>,
        target: f32,
        ramp: f32,
    ) {
        let target = params::clamp_volume(target);
        if ramp <= 0.0 {
            self.volume_ramp = None;
            self.volume = target;
            pair.rescale_to(self.volume);
            return;
        }
        debug!(target, ramp, "starting volume ramp");
        self.volume_ramp = Some(Ramp::new(self.volume, target, ramp, FadeCurve::SmoothStep));
    }

    /// Set the multiplier immediately without touching channel gains.
    ///
    /// For callers that own the gains at the moment of the change (the stop
    /// fade) and apply their own scaling. Returns the clamped value.
    pub fn set_volume_multiplier(&mut self, target: f32) -> f32 {
        self.volume_ramp = None;
        self.volume = params::clamp_volume(target);
        self.volume
    }

    /// Set the global pitch multiplier, optionally ramped.
    ///
    /// Pitch is orthogonal to the crossfade gain law: the ramp is linear and
    /// runs per channel, starting from each channel's current pitch.
    pub fn set_pitch<S: AudioSource>(&mut self, pair: &mut ChannelPair<S>, target: f32, ramp: f32) {
        let target = params::clamp_pitch(target);
        if ramp <= 0.0 {
            self.pitch_ramp = None;
            self.pitch = target;
            pair.channel_mut(ChannelId::A).set_pitch(target);
            pair.channel_mut(ChannelId::B).set_pitch(target);
            return;
        }
        self.pitch_ramp = Some(DualRamp::new(
            pair.channel(ChannelId::A).pitch(),
            pair.channel(ChannelId::B).pitch(),
            target,
            ramp,
        ));
    }

    /// Set the global stereo pan, optionally ramped. Same discipline as pitch.
    pub fn set_pan<S: AudioSource>(&mut self, pair: &mut ChannelPair<S>, target: f32, ramp: f32) {
        let target = params::clamp_pan(target);
        if ramp <= 0.0 {
            self.pan_ramp = None;
            self.pan = target;
            pair.channel_mut(ChannelId::A).set_pan(target);
            pair.channel_mut(ChannelId::B).set_pan(target);
            return;
        }
        self.pan_ramp = Some(DualRamp::new(
            pair.channel(ChannelId::A).pan(),
            pair.channel(ChannelId::B).pan(),
            target,
            ramp,
        ));
    }

    /// Advance all active ramps by one frame of unscaled time.
    ///
    /// `rescale` is false while a stop fade owns the channel gains: the
    /// volume multiplier keeps advancing toward its target, but the
    /// ratio-preserving rescale is skipped so the two never fight over the
    /// same fields.
    pub fn tick<S: AudioSource>(&mut self, pair: &mut ChannelPair<S>, dt: f32, rescale: bool) {
        if let Some(ramp) = self.volume_ramp.as_mut() {
            let value = ramp.advance(dt);
            if ramp.is_complete() {
                self.volume = ramp.target();
                self.volume_ramp = None;
            } else {
                self.volume = value;
            }
            if rescale {
                pair.rescale_to(self.volume);
            }
        }

        // Mid-ramp the reported global value is the channel midpoint, so
        // facade queries and freshly snapped channels see the current value
        // rather than the pre-ramp one.
        if let Some(ramp) = self.pitch_ramp.as_mut() {
            let (pitch_a, pitch_b) = ramp.advance(dt);
            pair.channel_mut(ChannelId::A).set_pitch(pitch_a);
            pair.channel_mut(ChannelId::B).set_pitch(pitch_b);
            if ramp.is_complete() {
                self.pitch = ramp.target();
                self.pitch_ramp = None;
            } else {
                self.pitch = 0.5 * (pitch_a + pitch_b);
            }
        }

        if let Some(ramp) = self.pan_ramp.as_mut() {
            let (pan_a, pan_b) = ramp.advance(dt);
            pair.channel_mut(ChannelId::A).set_pan(pan_a);
            pair.channel_mut(ChannelId::B).set_pan(pan_b);
            if ramp.is_complete() {
                self.pan = ramp.target();
                self.pan_ramp = None;
            } else {
                self.pan = 0.5 * (pan_a + pan_b);
            }
        }
    }
}
