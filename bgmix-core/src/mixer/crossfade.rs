//! Crossfade scheduler: the single in-flight transition between channels
//!
//! At most one transition exists at a time. A new play request cancels and
//! replaces the current one, which guarantees at most one active easing
//! computation and keeps two overlapping ramps from summing incoherently.

use crate::mixer::channel::{ChannelId, ChannelPair};
use crate::source::{AudioClip, AudioSource};
use bgmix_common::fade_curves::{clamp01, smoothstep};
use rand::Rng;
use tracing::debug;

/// Guard kept between a start offset and the clip's end, seconds.
///
/// Seeking closer than this to the end of a looping clip would wrap almost
/// immediately.
pub const CLIP_END_GUARD: f32 = 0.05;

/// Where the incoming channel starts playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartMode {
    /// From the top of the clip.
    Beginning,
    /// From a fixed offset, clamped to `[0, length − guard]`.
    Offset(f32),
    /// From a uniformly random position in `[0, length − guard)`.
    Random,
}

impl StartMode {
    /// Resolve the mode to a concrete start position for a clip.
    pub fn resolve<C: AudioClip>(&self, clip: &C) -> f32 {
        let max_start = (clip.length() - CLIP_END_GUARD).max(0.0);
        match self {
            StartMode::Beginning => 0.0,
            StartMode::Offset(seconds) => seconds.clamp(0.0, max_start),
            StartMode::Random => {
                if max_start <= 0.0 {
                    0.0
                } else {
                    rand::thread_rng().gen_range(0.0..max_start)
                }
            }
        }
    }
}

/// The single in-flight crossfade.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Registry identifier of the incoming track, for event reporting.
    pub track: String,
    /// Channel fading in; the one fading out is `to.other()`.
    pub to: ChannelId,
    /// Requested fade duration, seconds. Always positive.
    pub duration: f32,
    /// Unscaled time accumulated so far, seconds.
    pub elapsed: f32,
}

impl Transition {
    /// Create a fresh transition toward `to`.
    pub fn new(track: String, to: ChannelId, duration: f32) -> Self {
        Self {
            track,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by one frame of unscaled time and write both channel gains.
    ///
    /// Gain law: `k = smoothstep(t / duration)`; the incoming channel sits at
    /// `k × volume`, the outgoing one at `(1 − k) × volume`. Returns true
    /// once the transition has reached its terminal state (outgoing channel
    /// silenced, incoming snapped to `volume`).
    pub fn advance<S: AudioSource>(
        &mut self,
        pair: &mut ChannelPair<S>,
        volume: f32,
        dt: f32,
    ) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.finish(pair, volume);
            return true;
        }

        let k = smoothstep(clamp01(self.elapsed / self.duration));
        pair.channel_mut(self.to).set_gain(k * volume);
        pair.channel_mut(self.to.other()).set_gain((1.0 - k) * volume);
        false
    }

    /// Snap to the terminal state: incoming channel at full gain, outgoing
    /// channel stopped and silent.
    pub fn finish<S: AudioSource>(&self, pair: &mut ChannelPair<S>, volume: f32) {
        pair.silence(self.to.other());
        pair.channel_mut(self.to).set_gain(volume);
    }

    /// Cancel a superseded transition.
    ///
    /// Cancellation is terminal and identical to completion: neither channel
    /// may retain a stale intermediate gain once the replacement starts.
    pub fn cancel<S: AudioSource>(&self, pair: &mut ChannelPair<S>, volume: f32) {
        debug!(track = %self.track, elapsed = self.elapsed, "cancelling in-flight crossfade");
        self.finish(pair, volume);
    }
}
