//! Playback primitive seam
//!
//! The mixer does no decoding or DSP itself; it drives two engine-provided
//! playback sources through this trait. Implementations wrap whatever the
//! host engine uses for clip playback.

/// Handle to a decoded audio clip.
///
/// Equality is identity: two handles compare equal when they refer to the
/// same underlying clip. `play_if_different` relies on this to decide
/// whether a request targets the track that is already audible.
pub trait AudioClip: Clone + PartialEq {
    /// Clip length in seconds.
    fn length(&self) -> f32;
}

/// A single playback channel primitive.
///
/// Gain, pitch and pan writes take effect on the next rendered frame; the
/// mixer keeps its own mirrors of these values and treats the source as
/// write-only for them.
pub trait AudioSource {
    /// Clip handle type accepted by this source.
    type Clip: AudioClip;

    /// Assign the clip to play. Does not start playback.
    fn set_clip(&mut self, clip: Self::Clip);

    /// The currently assigned clip handle, if any. Handles are cheap to
    /// clone, so this returns by value.
    fn clip(&self) -> Option<Self::Clip>;

    /// Move the playback position, seconds from clip start.
    fn seek(&mut self, seconds: f32);

    /// Start (or restart) playback of the assigned clip.
    fn play(&mut self);

    /// Stop playback.
    fn stop(&mut self);

    /// Set the channel gain, [0.0, 1.0].
    fn set_gain(&mut self, gain: f32);

    /// Set the playback pitch multiplier.
    fn set_pitch(&mut self, pitch: f32);

    /// Set the stereo pan, [-1.0, 1.0].
    fn set_pan(&mut self, pan: f32);

    /// Enable or disable looping playback.
    fn set_looping(&mut self, looping: bool);

    /// Whether the source is currently playing.
    fn is_playing(&self) -> bool;
}
