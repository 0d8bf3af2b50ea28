//! Core domain types for the playback core

use crate::detector::MediaFileDetector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What kind of media a browser item resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Playable audio
    Audio,

    /// Playable video (handled by the video window, not this core)
    Video,

    /// Anything else (documents, playlists, unknown extensions)
    Other,
}

/// A playable unit of media identified by source path and display name
///
/// Immutable once constructed; a new selection produces a new `Track`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier supplied by the browser (stable per item)
    pub id: String,

    /// Local path or URL the engine loads
    pub source_path: PathBuf,

    /// Human-readable name shown in the status bar
    pub display_name: String,

    /// Classified media kind
    pub media_kind: MediaKind,
}

impl Track {
    /// Create a track, deriving display name and kind from the path
    pub fn new(id: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        let display_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_path.to_string_lossy().into_owned());
        let media_kind = MediaFileDetector::classify(&source_path.to_string_lossy());

        Self {
            id: id.into(),
            source_path,
            display_name,
            media_kind,
        }
    }
}

/// Sentinel device id for the system default output
///
/// Selecting it clears any explicit device selection and restores the
/// engine's default output chain.
pub const DEFAULT_DEVICE_ID: &str = "default";

/// An audio output endpoint enumerable from the host system
///
/// Value type produced by enumeration, never mutated. `id` is a stable
/// unique identifier; `name` is display-only and may collide between
/// devices (a UI concern, never used for identity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Stable unique identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Longer description (driver/endpoint details)
    pub description: String,

    /// Is this the system default device?
    pub is_default: bool,
}

impl Device {
    /// The synthetic "system default" entry placed first in every enumeration
    pub fn system_default() -> Self {
        Self {
            id: DEFAULT_DEVICE_ID.to_string(),
            name: "System default".to_string(),
            description: "System default audio output device".to_string(),
            is_default: true,
        }
    }
}

/// The persisted user device choice
///
/// Survives Stop/Play cycles and process restarts (serialization is the
/// configuration collaborator's concern). Cleared only by an explicit
/// user change or device disappearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSelection {
    /// Id of the selected device
    pub device_id: String,

    /// Enumeration epoch at selection time
    pub epoch: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_derives_name_and_kind() {
        let track = Track::new("t1", PathBuf::from("/music/morning song.flac"));
        assert_eq!(track.display_name, "morning song.flac");
        assert_eq!(track.media_kind, MediaKind::Audio);

        let video = Track::new("t2", PathBuf::from("/clips/demo.mkv"));
        assert_eq!(video.media_kind, MediaKind::Video);

        let doc = Track::new("t3", PathBuf::from("/docs/readme.txt"));
        assert_eq!(doc.media_kind, MediaKind::Other);
    }

    #[test]
    fn system_default_device() {
        let device = Device::system_default();
        assert_eq!(device.id, DEFAULT_DEVICE_ID);
        assert!(device.is_default);
    }

    #[test]
    fn track_serde_round_trip() {
        let track = Track::new("t1", PathBuf::from("/music/a.mp3"));
        let json = serde_json::to_string(&track).unwrap();
        let back: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }
}
