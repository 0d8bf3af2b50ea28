//! Playback error types

use std::path::PathBuf;

use ripple_core::{EngineError, MediaKind};
use thiserror::Error;

/// Errors surfaced by the playback layer
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// Media could not be loaded
    #[error("failed to load {path}: {reason}")]
    Load {
        /// Path of the media that failed
        path: PathBuf,
        /// Backend-reported reason
        reason: String,
    },

    /// The requested output device is not present
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The media backend failed to initialize
    #[error("engine initialization failed: {0}")]
    EngineInit(String),

    /// The item is not playable audio
    #[error("unsupported media kind: {0:?}")]
    UnsupportedKind(MediaKind),

    /// The control thread has shut down
    #[error("playback controller is no longer running")]
    ControllerGone,

    /// Any other backend failure
    #[error("engine error: {0}")]
    Engine(String),
}

impl From<EngineError> for PlaybackError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Init(reason) => Self::EngineInit(reason),
            EngineError::Load { path, reason } => Self::Load { path, reason },
            EngineError::DeviceUnavailable(id) => Self::DeviceUnavailable(id),
            EngineError::EnumerationFailed(reason) | EngineError::Backend(reason) => {
                Self::Engine(reason)
            }
        }
    }
}

/// Convenience alias used throughout this crate
pub type Result<T> = std::result::Result<T, PlaybackError>;
