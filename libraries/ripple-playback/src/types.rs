//! Playback state and configuration

use std::time::Duration;

use ripple_core::Track;
use serde::{Deserialize, Serialize};

/// Minimum accepted playback rate multiplier
pub const MIN_RATE: f32 = 0.1;

/// Maximum accepted playback rate multiplier
pub const MAX_RATE: f32 = 4.0;

/// Playback state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing has been played yet
    Idle,
    /// A load is in flight
    Loading,
    /// Media is audibly playing
    Playing,
    /// Playback is paused at a position
    Paused,
    /// Playback was explicitly stopped or ran off the end
    Stopped,
    /// The last operation failed
    Error,
}

impl PlaybackState {
    /// Whether the engine currently holds playable media
    #[must_use]
    pub fn has_active_audio(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

/// Snapshot of the current playback session
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Current machine state
    pub state: PlaybackState,
    /// Track loaded or being loaded, if any
    pub current_track: Option<Track>,
    /// Last known playback position
    pub position: Duration,
    /// Duration of the current media
    pub duration: Duration,
    /// Output volume, 0 to 100
    pub volume: u8,
    /// Playback rate multiplier
    pub rate: f32,
    /// Whether output is muted
    pub muted: bool,
}

impl PlaybackSession {
    pub(crate) fn new(config: &PlayerConfig) -> Self {
        Self {
            state: PlaybackState::Idle,
            current_track: None,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume: config.volume,
            rate: config.rate,
            muted: false,
        }
    }
}

/// Initial player settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial output volume, 0 to 100
    pub volume: u8,
    /// Initial playback rate multiplier
    pub rate: f32,
    /// How long a device enumeration stays fresh
    #[serde(with = "duration_secs")]
    pub device_cache_ttl: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            rate: 1.0,
            device_cache_ttl: Duration::from_secs(30),
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(de)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 100);
        assert!((config.rate - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.device_cache_ttl, Duration::from_secs(30));
    }

    #[test]
    fn config_deserializes_with_partial_fields() {
        let config: PlayerConfig = serde_json::from_str(r#"{"volume": 60}"#).unwrap();
        assert_eq!(config.volume, 60);
        assert_eq!(config.device_cache_ttl, Duration::from_secs(30));
    }

    #[test]
    fn active_audio_states() {
        assert!(PlaybackState::Playing.has_active_audio());
        assert!(PlaybackState::Paused.has_active_audio());
        assert!(!PlaybackState::Loading.has_active_audio());
        assert!(!PlaybackState::Stopped.has_active_audio());
        assert!(!PlaybackState::Idle.has_active_audio());
        assert!(!PlaybackState::Error.has_active_audio());
    }
}
