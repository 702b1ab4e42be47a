//! Music mixer: transport facade and per-frame tick driver
//!
//! `MusicMixer` validates track identifiers against the registry, dispatches
//! accepted requests to the crossfade scheduler, and drives all time-based
//! state (crossfade, stop fade, volume/pitch/pan ramps) from a single `tick`
//! fed with unscaled delta time.
//!
//! The mixer is an explicitly constructed object injected into the call
//! sites that need it; its lifetime is scoped by the host, not by a global
//! instance.

pub mod channel;
pub mod controls;
pub mod crossfade;

use crate::config::MixerConfig;
use crate::events::MixerEvent;
use crate::registry::{TrackEntry, TrackRegistry};
use crate::source::AudioSource;
use bgmix_common::fade_curves::{clamp01, lerp};
use channel::{ChannelId, ChannelPair};
use controls::MixControls;
use crossfade::{StartMode, Transition};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Uniform fade of both channels from their captured gains down to zero.
///
/// Independent of the crossfade scheduler's two-channel logic: it fades
/// whatever is currently audible on both channels, linearly.
struct StopFade {
    from_a: f32,
    from_b: f32,
    duration: f32,
    elapsed: f32,
}

/// Dual-channel crossfading music mixer.
///
/// All operations and `tick` must be called from the same logical thread;
/// there is no shared mutable state and no locking.
pub struct MusicMixer<S: AudioSource> {
    registry: TrackRegistry<S::Clip>,
    pair: ChannelPair<S>,
    transition: Option<Transition>,
    stop_fade: Option<StopFade>,
    controls: MixControls,
    config: MixerConfig,
    events: VecDeque<MixerEvent>,
}

impl<S: AudioSource> MusicMixer<S> {
    /// Create a mixer over two engine playback sources with default settings.
    pub fn new(source_a: S, source_b: S) -> Self {
        Self::with_config(source_a, source_b, MixerConfig::default())
    }

    /// Create a mixer with explicit configuration.
    pub fn with_config(source_a: S, source_b: S, config: MixerConfig) -> Self {
        let config = config.clamped();
        let controls = MixControls::new(config.volume, config.pitch, config.pan);
        let pair = ChannelPair::new(source_a, source_b, controls.pitch(), controls.pan());
        Self {
            registry: TrackRegistry::new(),
            pair,
            transition: None,
            stop_fade: None,
            controls,
            config,
            events: VecDeque::new(),
        }
    }

    // ---- registration ----

    /// Register (or replace) one track.
    pub fn register_track(&mut self, id: impl Into<String>, clip: S::Clip) {
        self.registry.register(id, clip);
    }

    /// Replace the whole track registry from a bulk list.
    pub fn rebuild_tracks(&mut self, entries: impl IntoIterator<Item = TrackEntry<S::Clip>>) {
        self.registry.rebuild(entries);
    }

    // ---- transport ----

    /// Play the configured startup track, if any.
    pub fn start(&mut self) {
        let Some(track) = self.config.startup_track.clone() else {
            return;
        };
        if track.trim().is_empty() {
            return;
        }
        let fade = self.config.startup_fade;
        self.play(&track, fade);
    }

    /// Crossfade to a track over `fade` seconds, from the top of the clip.
    ///
    /// An unknown identifier is logged and ignored; no state changes.
    pub fn play(&mut self, id: &str, fade: f32) {
        let Some(clip) = self.resolve_logged(id) else {
            return;
        };
        self.begin_transition(id.to_string(), clip, fade, StartMode::Beginning);
    }

    /// Crossfade to a track using the configured default fade.
    pub fn play_default(&mut self, id: &str) {
        self.play(id, self.config.default_fade);
    }

    /// Crossfade to a track unless it is already audible or already fading in.
    ///
    /// Repeated calls with the same identifier produce exactly one
    /// transition: both the active channel's clip and the in-flight
    /// transition's target count as "already playing".
    pub fn play_if_different(&mut self, id: &str, fade: f32) {
        let Some(clip) = self.resolve_logged(id) else {
            return;
        };
        if self.transition.as_ref().is_some_and(|t| t.track == id) {
            debug!(track = id, "already fading in, ignoring play request");
            return;
        }
        let active = self.pair.channel(self.pair.active_id()).clip();
        if active.as_ref() == Some(&clip) {
            debug!(track = id, "already audible, ignoring play request");
            return;
        }
        self.begin_transition(id.to_string(), clip, fade, StartMode::Beginning);
    }

    /// Swap to a track with no easing: latency over smoothness.
    pub fn play_immediate(&mut self, id: &str) {
        let Some(clip) = self.resolve_logged(id) else {
            return;
        };
        self.begin_transition(id.to_string(), clip, 0.0, StartMode::Beginning);
    }

    /// Crossfade to a track starting at `start_seconds`, or at a random
    /// position when `randomize_start` is set.
    pub fn play_with_start(
        &mut self,
        id: &str,
        fade: f32,
        start_seconds: f32,
        randomize_start: bool,
    ) {
        let Some(clip) = self.resolve_logged(id) else {
            return;
        };
        let mode = if randomize_start {
            StartMode::Random
        } else {
            StartMode::Offset(start_seconds)
        };
        self.begin_transition(id.to_string(), clip, fade, mode);
    }

    /// Fade everything out over `fade` seconds, then stop both channels.
    ///
    /// Cancels any in-flight crossfade; the fade starts from whatever gains
    /// the channels currently hold, so a mid-crossfade stop fades both sides
    /// down from where they are.
    pub fn stop(&mut self, fade: f32) {
        // The stop fade's own law defines the terminal state, so the
        // discarded transition is not snapped to full gain first.
        self.transition = None;

        if fade <= 0.0 {
            self.stop_fade = None;
            self.pair.silence_all();
            self.events.push_back(MixerEvent::Stopped);
            info!("stopped immediately");
            return;
        }

        self.stop_fade = Some(StopFade {
            from_a: self.pair.channel(ChannelId::A).gain(),
            from_b: self.pair.channel(ChannelId::B).gain(),
            duration: fade,
            elapsed: 0.0,
        });
        info!(fade, "stopping with fade-out");
    }

    /// Fade out using the configured default stop fade.
    pub fn stop_default(&mut self) {
        self.stop(self.config.stop_fade);
    }

    // ---- live mix controls ----

    /// Set the global volume multiplier, ramped over `ramp` seconds
    /// (immediate when `ramp ≤ 0`). Out-of-range targets are clamped.
    pub fn set_volume(&mut self, target: f32, ramp: f32) {
        // An immediate set during a stop fade scales the fade's captured
        // start gains along with the current gains, so the remainder of the
        // fade tracks the new multiplier instead of snapping back to the
        // stale captures on its next tick.
        if ramp <= 0.0 {
            if let Some(fade) = self.stop_fade.as_mut() {
                let old = self.controls.volume();
                let new = self.controls.set_volume_multiplier(target);
                let scale = if old > 0.0 { new / old } else { 0.0 };
                fade.from_a *= scale;
                fade.from_b *= scale;
                let gain_a = self.pair.channel(ChannelId::A).gain() * scale;
                let gain_b = self.pair.channel(ChannelId::B).gain() * scale;
                self.pair.channel_mut(ChannelId::A).set_gain(gain_a);
                self.pair.channel_mut(ChannelId::B).set_gain(gain_b);
                return;
            }
        }
        self.controls.set_volume(&mut self.pair, target, ramp);
    }

    /// Set the global pitch multiplier, ramped over `ramp` seconds.
    pub fn set_pitch(&mut self, target: f32, ramp: f32) {
        self.controls.set_pitch(&mut self.pair, target, ramp);
    }

    /// Set the global stereo pan, ramped over `ramp` seconds.
    pub fn set_pan(&mut self, target: f32, ramp: f32) {
        self.controls.set_pan(&mut self.pair, target, ramp);
    }

    /// Current global volume multiplier.
    pub fn volume(&self) -> f32 {
        self.controls.volume()
    }

    /// Current global pitch multiplier.
    pub fn pitch(&self) -> f32 {
        self.controls.pitch()
    }

    /// Current global stereo pan.
    pub fn pan(&self) -> f32 {
        self.controls.pan()
    }

    /// Whether a crossfade is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Borrow the channel pair (gains, pitch, pan, clip assignments).
    pub fn channels(&self) -> &ChannelPair<S> {
        &self.pair
    }

    // ---- tick ----

    /// Advance all time-based state by one frame of unscaled delta time.
    ///
    /// Order within a tick: crossfade, stop fade, then global ramps. A
    /// non-positive `dt` is ignored.
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        if let Some(transition) = self.transition.as_mut() {
            if transition.advance(&mut self.pair, self.controls.volume(), dt) {
                let track = transition.track.clone();
                debug!(track = %track, "crossfade complete");
                self.events.push_back(MixerEvent::CrossfadeComplete { track });
                self.transition = None;
            }
        }

        if let Some(fade) = self.stop_fade.as_mut() {
            fade.elapsed += dt;
            let t = clamp01(fade.elapsed / fade.duration);
            let gain_a = lerp(fade.from_a, 0.0, t);
            let gain_b = lerp(fade.from_b, 0.0, t);
            self.pair.channel_mut(ChannelId::A).set_gain(gain_a);
            self.pair.channel_mut(ChannelId::B).set_gain(gain_b);
            if fade.elapsed >= fade.duration {
                self.pair.silence_all();
                self.stop_fade = None;
                self.events.push_back(MixerEvent::Stopped);
                info!("stop fade complete");
            }
        }

        // While a stop fade owns the channel gains, the volume ramp still
        // advances the multiplier but skips the channel rescale.
        let rescale = self.stop_fade.is_none();
        self.controls.tick(&mut self.pair, dt, rescale);
    }

    // ---- events ----

    /// Drain queued mixer events, oldest first.
    pub fn drain_events(&mut self) -> Vec<MixerEvent> {
        self.events.drain(..).collect()
    }

    // ---- internals ----

    fn resolve_logged(&self, id: &str) -> Option<S::Clip> {
        match self.registry.resolve(id) {
            Ok(clip) => Some(clip.clone()),
            Err(err) => {
                warn!(%err, "ignoring play request");
                None
            }
        }
    }

    fn begin_transition(&mut self, track: String, clip: S::Clip, fade: f32, mode: StartMode) {
        // A new request supersedes whatever is in flight.
        if let Some(current) = self.transition.take() {
            current.cancel(&mut self.pair, self.controls.volume());
        }
        self.stop_fade = None;

        let fade = fade.max(0.0);
        let to = self.pair.inactive_id();
        let start = mode.resolve(&clip);

        if fade <= 0.0 {
            // Instant swap: no intermediate frames.
            let from = to.other();
            self.pair.snap_to(
                to,
                clip,
                self.controls.volume(),
                start,
                self.controls.pitch(),
                self.controls.pan(),
            );
            self.pair.silence(from);
            info!(track = %track, "track swapped immediately");
            self.events.push_back(MixerEvent::TrackStarted {
                track: track.clone(),
            });
            self.events.push_back(MixerEvent::CrossfadeComplete { track });
            return;
        }

        // The incoming channel starts at gain zero and fades up from there.
        self.pair.snap_to(
            to,
            clip,
            0.0,
            start,
            self.controls.pitch(),
            self.controls.pan(),
        );
        info!(track = %track, fade, start, channel = ?to, "starting crossfade");
        self.events.push_back(MixerEvent::TrackStarted {
            track: track.clone(),
        });
        self.transition = Some(Transition::new(track, to, fade));
    }
}
