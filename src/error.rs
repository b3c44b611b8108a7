//! Error types shared across the crate.
//!
//! Playback-facing operations (selecting a song, reacting to engine
//! notifications) are infallible; errors only surface while loading
//! configuration, opening the audio output, or opening a media source on the
//! audio thread.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No usable audio output device.
    #[error("audio output unavailable: {0}")]
    AudioOutput(String),

    #[error("cannot open source {path:?}: {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode source {path:?}: {message}")]
    DecodeSource { path: PathBuf, message: String },
}
