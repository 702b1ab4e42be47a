//! Error types for bgmix-core
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Transport operations never surface these to callers: an
//! unknown track is logged and the request becomes a no-op.

use thiserror::Error;

/// Main error type for the bgmix-core crate
#[derive(Error, Debug)]
pub enum Error {
    /// Requested track identifier is not registered
    #[error("Unknown track: {0}")]
    UnknownTrack(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience Result type using bgmix-core Error
pub type Result<T> = std::result::Result<T, Error>;
