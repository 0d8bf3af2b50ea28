//! Outbound events and status formatting

use std::time::Duration;

use ripple_core::{Device, Track};
use serde::{Deserialize, Serialize};

use crate::types::PlaybackState;

/// One complete status report for the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Current machine state
    pub state: PlaybackState,
    /// Track loaded or being loaded, if any
    pub track: Option<Track>,
    /// Playback position in milliseconds
    pub position_ms: u64,
    /// Media duration in milliseconds
    pub duration_ms: u64,
    /// Output volume, 0 to 100
    pub volume: u8,
    /// Playback rate multiplier
    pub rate: f32,
    /// Whether output is muted
    pub muted: bool,
    /// Display name of the selected device, if an explicit one is set
    pub device_name: Option<String>,
    /// One-line notice for the status bar (e.g. "no audio playing")
    pub notice: Option<String>,
}

impl StatusSnapshot {
    /// Status-bar text: `name mm:ss / mm:ss` while media is active
    #[must_use]
    pub fn progress_text(&self) -> String {
        match (&self.track, self.state) {
            (Some(track), state) if state.has_active_audio() || state == PlaybackState::Loading => {
                format!(
                    "{} {} / {}",
                    track.display_name,
                    format_clock(Duration::from_millis(self.position_ms)),
                    format_clock(Duration::from_millis(self.duration_ms)),
                )
            }
            _ => self.notice.clone().unwrap_or_default(),
        }
    }
}

/// Notification pushed to subscribed observers
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The session changed in any observable way
    StatusChanged(StatusSnapshot),
    /// The output device selection changed
    DeviceChanged(Device),
    /// An operation failed
    Error {
        /// Human-readable failure description
        message: String,
    },
}

/// Format a duration as `mm:ss`, or `hh:mm:ss` from one hour up
#[must_use]
pub fn format_clock(value: Duration) -> String {
    let total = value.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
