//! Mixer events
//!
//! The mixer records notable playback transitions in an internal queue; the
//! host drains them once per frame after `tick`. This is the single-threaded
//! analogue of a broadcast event bus: the mixer has no threads, so there is
//! nothing to broadcast across.

/// Events emitted by the music mixer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixerEvent {
    /// A play request was accepted and the incoming channel started playback.
    TrackStarted {
        /// Registry identifier of the track.
        track: String,
    },

    /// A crossfade (or instant swap) reached its terminal state: the incoming
    /// channel holds full gain, the outgoing one is stopped and silent.
    CrossfadeComplete {
        /// Registry identifier of the track now audible.
        track: String,
    },

    /// A stop fade completed; both channels are stopped and silent.
    Stopped,
}
