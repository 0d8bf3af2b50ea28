//! Error types for media-engine operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a [`crate::MediaEngine`] implementation
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine instance failed to start
    #[error("Engine failed to initialize: {0}")]
    Init(String),

    /// Media could not be loaded (bad or missing resource)
    #[error("Failed to load media {path:?}: {reason}")]
    Load {
        /// Path of the resource that failed to load
        path: PathBuf,
        /// Engine-reported reason
        reason: String,
    },

    /// Requested output device does not exist (anymore)
    #[error("Audio output device '{0}' is unavailable")]
    DeviceUnavailable(String),

    /// Failed to enumerate output devices
    #[error("Failed to enumerate audio devices: {0}")]
    EnumerationFailed(String),

    /// Any other engine call failure
    #[error("Engine error: {0}")]
    Backend(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
