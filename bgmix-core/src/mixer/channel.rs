//! Channel pair: the two playback channels behind the crossfade
//!
//! All playback-primitive side effects (play/stop/seek and parameter writes)
//! are confined to this module; nothing outside it touches channel state
//! directly.

use crate::source::AudioSource;
use tracing::debug;

/// Which channel of the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelId {
    A,
    B,
}

impl ChannelId {
    /// Get the other channel
    pub fn other(&self) -> Self {
        match self {
            ChannelId::A => ChannelId::B,
            ChannelId::B => ChannelId::A,
        }
    }
}

/// One playback channel: an engine source plus authoritative mix mirrors.
///
/// The source is write-only for gain/pitch/pan; the mirrors held here are the
/// values the mixer reasons about (active-channel derivation, ratio rescale,
/// ramp start values).
pub struct Channel<S: AudioSource> {
    source: S,
    gain: f32,
    pitch: f32,
    pan: f32,
}

impl<S: AudioSource> Channel<S> {
    fn new(mut source: S, pitch: f32, pan: f32) -> Self {
        // Music channels always loop; one-shot playback belongs to SFX.
        source.set_looping(true);
        source.set_gain(0.0);
        source.set_pitch(pitch);
        source.set_pan(pan);
        Self {
            source,
            gain: 0.0,
            pitch,
            pan,
        }
    }

    /// Current channel gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Current channel pitch multiplier.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current stereo pan.
    pub fn pan(&self) -> f32 {
        self.pan
    }

    /// The clip currently assigned to this channel's source.
    pub fn clip(&self) -> Option<S::Clip> {
        self.source.clip()
    }

    /// Whether the underlying source is playing.
    pub fn is_playing(&self) -> bool {
        self.source.is_playing()
    }

    /// Write a new gain to the mirror and the source.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
        self.source.set_gain(gain);
    }

    /// Write a new pitch to the mirror and the source.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        self.source.set_pitch(pitch);
    }

    /// Write a new pan to the mirror and the source.
    pub fn set_pan(&mut self, pan: f32) {
        self.pan = pan;
        self.source.set_pan(pan);
    }
}

/// Exactly two channels, A and B, alternating the "currently audible" and
/// "next to play" roles.
pub struct ChannelPair<S: AudioSource> {
    a: Channel<S>,
    b: Channel<S>,
}

impl<S: AudioSource> ChannelPair<S> {
    /// Wrap two engine sources, both silent, looping, with the given initial
    /// pitch and pan applied.
    pub fn new(source_a: S, source_b: S, pitch: f32, pan: f32) -> Self {
        Self {
            a: Channel::new(source_a, pitch, pan),
            b: Channel::new(source_b, pitch, pan),
        }
    }

    /// The channel currently audible: the one with the higher gain.
    ///
    /// Pure derivation, no side effects. A tie (both silent at startup, or
    /// mid-crossfade equality) favors A.
    pub fn active_id(&self) -> ChannelId {
        if self.a.gain >= self.b.gain {
            ChannelId::A
        } else {
            ChannelId::B
        }
    }

    /// The channel next in line to play.
    pub fn inactive_id(&self) -> ChannelId {
        self.active_id().other()
    }

    /// Borrow a channel by id.
    pub fn channel(&self, id: ChannelId) -> &Channel<S> {
        match id {
            ChannelId::A => &self.a,
            ChannelId::B => &self.b,
        }
    }

    /// Mutably borrow a channel by id.
    pub fn channel_mut(&mut self, id: ChannelId) -> &mut Channel<S> {
        match id {
            ChannelId::A => &mut self.a,
            ChannelId::B => &mut self.b,
        }
    }

    /// Assign a clip to a channel, seek it, and start playback unconditionally.
    ///
    /// The current global pitch/pan are applied before `play` so a freshly
    /// started channel never renders a frame with stale parameters.
    pub fn snap_to(
        &mut self,
        id: ChannelId,
        clip: S::Clip,
        gain: f32,
        start_offset: f32,
        pitch: f32,
        pan: f32,
    ) {
        let channel = self.channel_mut(id);
        channel.source.set_clip(clip);
        channel.source.seek(start_offset);
        channel.set_pitch(pitch);
        channel.set_pan(pan);
        channel.set_gain(gain);
        channel.source.play();
        debug!(channel = ?id, gain, start_offset, "channel snapped to clip");
    }

    /// Stop a channel and zero its gain.
    pub fn silence(&mut self, id: ChannelId) {
        let channel = self.channel_mut(id);
        if channel.source.is_playing() {
            channel.source.stop();
        }
        channel.set_gain(0.0);
    }

    /// Stop both channels and zero both gains.
    pub fn silence_all(&mut self) {
        self.silence(ChannelId::A);
        self.silence(ChannelId::B);
    }

    /// Sum of both channel gains.
    pub fn gain_sum(&self) -> f32 {
        self.a.gain + self.b.gain
    }

    /// Ratio-preserving rescale after a global volume change.
    ///
    /// Each channel keeps its share of the pre-change sum and the sum becomes
    /// the new multiplier. A silent pair (sum of zero) is left untouched.
    pub fn rescale_to(&mut self, multiplier: f32) {
        let sum = self.gain_sum();
        if sum <= 0.0 {
            return;
        }
        let share_a = self.a.gain / sum;
        let share_b = self.b.gain / sum;
        self.a.set_gain(share_a * multiplier);
        self.b.set_gain(share_b * multiplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::AudioClip;

    #[derive(Debug, Clone, PartialEq)]
    struct StubClip(&'static str);

    impl AudioClip for StubClip {
        fn length(&self) -> f32 {
            10.0
        }
    }

    #[derive(Default)]
    struct StubSource {
        clip: Option<StubClip>,
        position: f32,
        gain: f32,
        pitch: f32,
        pan: f32,
        looping: bool,
        playing: bool,
    }

    impl AudioSource for StubSource {
        type Clip = StubClip;

        fn set_clip(&mut self, clip: StubClip) {
            self.clip = Some(clip);
        }
        fn clip(&self) -> Option<StubClip> {
            self.clip.clone()
        }
        fn seek(&mut self, seconds: f32) {
            self.position = seconds;
        }
        fn play(&mut self) {
            self.playing = true;
        }
        fn stop(&mut self) {
            self.playing = false;
        }
        fn set_gain(&mut self, gain: f32) {
            self.gain = gain;
        }
        fn set_pitch(&mut self, pitch: f32) {
            self.pitch = pitch;
        }
        fn set_pan(&mut self, pan: f32) {
            self.pan = pan;
        }
        fn set_looping(&mut self, looping: bool) {
            self.looping = looping;
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    fn pair() -> ChannelPair<StubSource> {
        ChannelPair::new(StubSource::default(), StubSource::default(), 1.0, 0.0)
    }

    #[test]
    fn test_new_channels_are_silent_and_looping() {
        let pair = pair();

        assert_eq!(pair.channel(ChannelId::A).gain(), 0.0);
        assert_eq!(pair.channel(ChannelId::B).gain(), 0.0);
        assert!(pair.channel(ChannelId::A).source.looping);
        assert!(pair.channel(ChannelId::B).source.looping);
        assert!(!pair.channel(ChannelId::A).is_playing());
    }

    #[test]
    fn test_active_tie_favors_a() {
        let pair = pair();
        assert_eq!(pair.active_id(), ChannelId::A);
        assert_eq!(pair.inactive_id(), ChannelId::B);
    }

    #[test]
    fn test_active_follows_higher_gain() {
        let mut pair = pair();
        pair.channel_mut(ChannelId::B).set_gain(0.4);

        assert_eq!(pair.active_id(), ChannelId::B);
        assert_eq!(pair.inactive_id(), ChannelId::A);

        pair.channel_mut(ChannelId::A).set_gain(0.5);
        assert_eq!(pair.active_id(), ChannelId::A);
    }

    #[test]
    fn test_snap_to_starts_playback_with_parameters() {
        let mut pair = pair();
        pair.snap_to(ChannelId::B, StubClip("menu"), 0.7, 3.0, 1.5, -0.25);

        let channel = pair.channel(ChannelId::B);
        assert_eq!(channel.clip(), Some(StubClip("menu")));
        assert_eq!(channel.source.position, 3.0);
        assert_eq!(channel.gain(), 0.7);
        assert_eq!(channel.pitch(), 1.5);
        assert_eq!(channel.pan(), -0.25);
        assert!(channel.is_playing());
    }

    #[test]
    fn test_silence_stops_and_zeroes() {
        let mut pair = pair();
        pair.snap_to(ChannelId::A, StubClip("menu"), 1.0, 0.0, 1.0, 0.0);

        pair.silence(ChannelId::A);

        assert!(!pair.channel(ChannelId::A).is_playing());
        assert_eq!(pair.channel(ChannelId::A).gain(), 0.0);
    }

    #[test]
    fn test_rescale_preserves_ratio() {
        let mut pair = pair();
        pair.channel_mut(ChannelId::A).set_gain(0.8);
        pair.channel_mut(ChannelId::B).set_gain(0.2);

        pair.rescale_to(0.5);

        assert!((pair.channel(ChannelId::A).gain() - 0.4).abs() < 1e-6);
        assert!((pair.channel(ChannelId::B).gain() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rescale_noop_when_silent() {
        let mut pair = pair();
        pair.rescale_to(0.5);

        assert_eq!(pair.channel(ChannelId::A).gain(), 0.0);
        assert_eq!(pair.channel(ChannelId::B).gain(), 0.0);
    }
}
