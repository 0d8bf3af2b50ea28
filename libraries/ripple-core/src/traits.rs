//! Engine abstraction
//!
//! The playback layer drives a media backend through [`MediaEngine`] and
//! receives its asynchronous notifications as [`EngineEvent`]s. Backends
//! are free to complete loads on their own threads; every load carries a
//! [`LoadGeneration`] so stale completions can be told apart from the one
//! currently in flight.

use std::path::Path;
use std::time::Duration;

use crate::error::EngineError;
use crate::types::Device;

/// Monotonically increasing id for in-flight loads
///
/// The playback layer bumps the generation every time a new load starts.
/// Completion events carrying an older generation belong to a superseded
/// load and must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadGeneration(pub u64);

impl LoadGeneration {
    /// Return the next generation
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Asynchronous notification from the media backend
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A load requested via [`MediaEngine::load`] finished parsing
    MediaLoaded {
        /// Generation the load was started with
        generation: LoadGeneration,
        /// Total duration of the loaded media
        duration: Duration,
    },
    /// A load failed before the media became playable
    LoadFailed {
        /// Generation the load was started with
        generation: LoadGeneration,
        /// Backend-reported reason
        reason: String,
    },
    /// Playback reached the end of the current media
    EndOfTrack,
    /// The backend hit an unrecoverable runtime error
    Fault {
        /// Backend-reported reason
        reason: String,
    },
    /// Periodic playback position report
    PositionChanged {
        /// Current playback position
        position: Duration,
    },
}

/// A media playback backend
///
/// Implementations wrap a concrete decoder/output stack. All methods are
/// called from a single control thread; `Send` is required so the engine
/// can be moved onto it. Stopping is destructive: backends may tear down
/// their output chain on [`stop`](MediaEngine::stop), so the caller
/// re-applies the output device before every transition into playback.
pub trait MediaEngine: Send {
    /// Begin loading media from `path`
    ///
    /// Completion is reported asynchronously as
    /// [`EngineEvent::MediaLoaded`] or [`EngineEvent::LoadFailed`]
    /// carrying the same `generation`.
    fn load(&mut self, generation: LoadGeneration, path: &Path) -> Result<(), EngineError>;

    /// Start or resume playback of the loaded media
    fn play(&mut self) -> Result<(), EngineError>;

    /// Pause playback, keeping position
    fn pause(&mut self) -> Result<(), EngineError>;

    /// Stop playback and release the output chain
    fn stop(&mut self) -> Result<(), EngineError>;

    /// Seek to an absolute position
    fn seek_to(&mut self, position: Duration) -> Result<(), EngineError>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Duration of the loaded media, zero when nothing is loaded
    fn duration(&self) -> Duration;

    /// Set output volume, 0 to 100
    fn set_volume(&mut self, volume: u8) -> Result<(), EngineError>;

    /// Set the playback rate multiplier
    fn set_rate(&mut self, rate: f32) -> Result<(), EngineError>;

    /// Enumerate the audio output devices currently present
    fn list_outputs(&mut self) -> Result<Vec<Device>, EngineError>;

    /// Route output to the given device, or to the system default for `None`
    fn set_output(&mut self, device_id: Option<&str>) -> Result<(), EngineError>;
}
