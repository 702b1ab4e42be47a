//! Mixer configuration
//!
//! TOML-backed settings for startup autoplay, default fade durations and the
//! initial global mix state. Out-of-range values are clamped on load, never
//! rejected.

use crate::error::Result;
use bgmix_common::params;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Music mixer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Track to autoplay from `MusicMixer::start`, e.g. "menu".
    /// None disables autoplay.
    pub startup_track: Option<String>,

    /// Fade used by startup autoplay, seconds.
    pub startup_fade: f32,

    /// Crossfade duration used by `play_default`, seconds.
    pub default_fade: f32,

    /// Fade-out duration used by `stop_default`, seconds.
    pub stop_fade: f32,

    /// Initial global volume multiplier, [0.0, 1.0].
    pub volume: f32,

    /// Initial global pitch multiplier, [0.1, 3.0].
    pub pitch: f32,

    /// Initial stereo pan, [-1.0, 1.0].
    pub pan: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            startup_track: None,
            startup_fade: 0.6,
            default_fade: 0.5,
            stop_fade: 0.3,
            volume: 1.0,
            pitch: 1.0,
            pan: 0.0,
        }
    }
}

impl MixerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to defaults; mix values are clamped to their
    /// valid ranges.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: MixerConfig = toml::from_str(&text)?;
        Ok(config.clamped())
    }

    /// Clamp mix values and fade durations to their valid ranges.
    pub fn clamped(mut self) -> Self {
        self.startup_fade = self.startup_fade.max(0.0);
        self.default_fade = self.default_fade.max(0.0);
        self.stop_fade = self.stop_fade.max(0.0);
        self.volume = params::clamp_volume(self.volume);
        self.pitch = params::clamp_pitch(self.pitch);
        self.pan = params::clamp_pan(self.pan);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MixerConfig::default();

        assert_eq!(config.startup_track, None);
        assert_eq!(config.startup_fade, 0.6);
        assert_eq!(config.default_fade, 0.5);
        assert_eq!(config.stop_fade, 0.3);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.pitch, 1.0);
        assert_eq!(config.pan, 0.0);
    }

    #[test]
    fn test_clamping() {
        let config = MixerConfig {
            startup_fade: -1.0,
            volume: 2.0,
            pitch: 0.0,
            pan: -3.0,
            ..MixerConfig::default()
        }
        .clamped();

        assert_eq!(config.startup_fade, 0.0);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.pitch, 0.1);
        assert_eq!(config.pan, -1.0);
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
startup_track = "menu"
startup_fade = 1.2
volume = 0.8
"#
        )
        .unwrap();

        let config = MixerConfig::load(file.path()).unwrap();

        assert_eq!(config.startup_track.as_deref(), Some("menu"));
        assert_eq!(config.startup_fade, 1.2);
        assert_eq!(config.volume, 0.8);
        // Unspecified keys keep their defaults
        assert_eq!(config.default_fade, 0.5);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = MixerConfig::load(Path::new("/nonexistent/bgmix.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_clamps_out_of_range_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "volume = 9.0\npitch = 100.0\npan = 2.0").unwrap();

        let config = MixerConfig::load(file.path()).unwrap();

        assert_eq!(config.volume, 1.0);
        assert_eq!(config.pitch, 3.0);
        assert_eq!(config.pan, 1.0);
    }
}
