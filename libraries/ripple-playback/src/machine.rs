//! Playback state machine
//!
//! Owns the session, the engine adapter, the device registry, and the
//! selection memory, and applies every state transition. All methods run
//! on the controller's command thread; engine events are marshaled onto
//! that thread and fed through [`PlaybackMachine::handle_engine_event`].
//!
//! Two rules shape most of this module: control commands never implicitly
//! load media (a bare play with nothing active goes through recovery
//! instead), and the output device is re-applied before every transition
//! into `Playing` because the engine tears down its output chain on stop.

use std::time::Duration;

use ripple_core::{Device, EngineEvent, LoadGeneration, MediaEngine, MediaKind, Track};
use tracing::{debug, info, warn};

use crate::adapter::EngineAdapter;
use crate::devices::DeviceRegistry;
use crate::error::{PlaybackError, Result};
use crate::events::{PlayerEvent, StatusSnapshot};
use crate::memory::SelectionMemory;
use crate::types::{PlaybackSession, PlaybackState, PlayerConfig, MAX_RATE, MIN_RATE};

/// Status-bar notice used whenever there is nothing to act on
pub const NO_AUDIO_NOTICE: &str = "no audio playing";

/// The playback core
///
/// Methods return an optional one-line notice for the status bar; errors
/// are reported through `Result` and leave the machine in a consistent
/// state.
pub struct PlaybackMachine {
    session: PlaybackSession,
    adapter: EngineAdapter,
    registry: DeviceRegistry,
    memory: SelectionMemory,
    collection: Vec<Track>,
    generation: LoadGeneration,
    volume_before_mute: Option<u8>,
    pending_events: Vec<PlayerEvent>,
}

impl PlaybackMachine {
    /// Create a machine around `engine` with the given initial settings
    pub fn new(engine: Box<dyn MediaEngine>, config: &PlayerConfig) -> Self {
        let mut adapter = EngineAdapter::new(engine);

        if let Err(e) = adapter.set_volume(config.volume) {
            warn!(volume = config.volume, error = %e, "failed to apply initial volume");
        }
        if let Err(e) = adapter.set_rate(config.rate) {
            warn!(rate = config.rate, error = %e, "failed to apply initial rate");
        }

        Self {
            session: PlaybackSession::new(config),
            adapter,
            registry: DeviceRegistry::new(config.device_cache_ttl),
            memory: SelectionMemory::new(),
            collection: Vec::new(),
            generation: LoadGeneration(0),
            volume_before_mute: None,
            pending_events: Vec::new(),
        }
    }

    /// Replace the browsable collection used for next/previous and recovery
    pub fn set_collection(&mut self, tracks: Vec<Track>) {
        self.collection = tracks;
    }

    /// Start playing a track the user explicitly selected
    ///
    /// The only entry point that writes the selection memory.
    pub fn play_new(&mut self, track: Track) -> Result<Option<String>> {
        if track.media_kind != MediaKind::Audio {
            return Err(PlaybackError::UnsupportedKind(track.media_kind));
        }
        self.memory.remember(track.clone());
        self.start_load(track)
    }

    /// Toggle between playing and paused
    ///
    /// With nothing active this recovers a track instead of doing nothing:
    /// the remembered selection first, then the first audio item in the
    /// collection.
    pub fn toggle_play_pause(&mut self) -> Result<Option<String>> {
        match self.session.state {
            PlaybackState::Playing => {
                self.adapter.pause()?;
                self.session.state = PlaybackState::Paused;
                Ok(None)
            }
            PlaybackState::Paused => {
                self.begin_playing()?;
                Ok(None)
            }
            PlaybackState::Loading => Ok(None),
            _ => self.recover(),
        }
    }

    /// Stop playback and clear the current track
    ///
    /// A no-op when nothing is active. The persisted device selection is
    /// untouched; only the engine's output chain goes away.
    pub fn stop(&mut self) -> Result<Option<String>> {
        match self.session.state {
            PlaybackState::Playing | PlaybackState::Paused => {
                self.adapter.stop()?;
                self.enter_stopped();
                Ok(None)
            }
            PlaybackState::Loading => {
                // cancel the in-flight load by superseding its generation
                self.generation = self.generation.next();
                self.adapter.stop()?;
                self.enter_stopped();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Advance to the next track in the collection
    pub fn next(&mut self) -> Result<Option<String>> {
        self.step(1, "already at last track")
    }

    /// Go back to the previous track in the collection
    pub fn previous(&mut self) -> Result<Option<String>> {
        self.step(-1, "already at first track")
    }

    /// Seek by a signed offset in milliseconds, clamped to the media
    pub fn seek_relative(&mut self, delta_ms: i64) -> Result<Option<String>> {
        if self.session.current_track.is_none() {
            return Ok(Some(NO_AUDIO_NOTICE.to_string()));
        }

        let current = i64::try_from(self.adapter.position().as_millis()).unwrap_or(i64::MAX);
        let duration = i64::try_from(self.session.duration.as_millis()).unwrap_or(i64::MAX);
        let target = (current + delta_ms).clamp(0, duration);

        #[allow(clippy::cast_sign_loss)]
        let position = Duration::from_millis(target as u64);
        self.adapter.seek_to(position)?;
        self.session.position = position;
        Ok(None)
    }

    /// Change volume by a signed step, clamped to 0..=100
    ///
    /// Any explicit volume change unmutes. A no-op with a notice when
    /// nothing is loaded.
    pub fn adjust_volume(&mut self, delta: i16) -> Result<Option<String>> {
        if self.session.current_track.is_none() {
            return Ok(Some(NO_AUDIO_NOTICE.to_string()));
        }
        let volume = (i16::from(self.session.volume) + delta).clamp(0, 100);
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let volume = volume as u8;

        self.adapter.set_volume(volume)?;
        self.session.volume = volume;
        self.session.muted = false;
        self.volume_before_mute = None;
        Ok(None)
    }

    /// Set the playback rate, clamped to the accepted range
    ///
    /// A no-op with a notice when nothing is loaded.
    pub fn set_rate(&mut self, rate: f32) -> Result<Option<String>> {
        if self.session.current_track.is_none() {
            return Ok(Some(NO_AUDIO_NOTICE.to_string()));
        }
        let rate = rate.clamp(MIN_RATE, MAX_RATE);
        self.adapter.set_rate(rate)?;
        self.session.rate = rate;
        Ok(None)
    }

    /// Mute, or restore the volume in effect before muting
    pub fn toggle_mute(&mut self) -> Result<Option<String>> {
        if self.session.muted {
            let restored = self.volume_before_mute.take().unwrap_or(self.session.volume);
            self.adapter.set_volume(restored)?;
            self.session.volume = restored;
            self.session.muted = false;
        } else {
            self.volume_before_mute = Some(self.session.volume);
            self.adapter.set_volume(0)?;
            self.session.muted = true;
        }
        Ok(None)
    }

    /// Select an output device by id, persisting the choice
    ///
    /// Looked up against the cached listing first; on a miss the listing
    /// is refreshed once before the device is declared unavailable. When
    /// audio is active the new route is applied immediately.
    pub fn set_device(&mut self, device_id: &str) -> Result<Option<String>> {
        let device = match self.lookup_device(device_id)? {
            Some(device) => device,
            None => return Err(PlaybackError::DeviceUnavailable(device_id.to_string())),
        };

        self.registry.select(device_id);
        info!(device = %device.name, "output device selected");
        self.pending_events.push(PlayerEvent::DeviceChanged(device));

        if self.session.state.has_active_audio() {
            self.adapter.apply_output(self.registry.selection())?;
        }
        Ok(None)
    }

    /// The current device listing, refreshed when stale or when forced
    pub fn devices(&mut self, force_refresh: bool) -> Result<Vec<Device>> {
        if !force_refresh {
            if let Some(cached) = self.registry.cached() {
                return Ok(cached.to_vec());
            }
        }
        let listing = self.adapter.list_outputs()?;
        self.registry.store(listing);
        Ok(self
            .registry
            .cached()
            .map(<[Device]>::to_vec)
            .unwrap_or_default())
    }

    /// Apply an engine notification
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Result<Option<String>> {
        match event {
            EngineEvent::MediaLoaded { generation, duration } => {
                if generation != self.generation {
                    debug!(?generation, current = ?self.generation, "discarding stale load completion");
                    return Ok(None);
                }
                self.session.duration = duration;
                self.session.position = Duration::ZERO;
                self.begin_playing()?;
                Ok(None)
            }
            EngineEvent::LoadFailed { generation, reason } => {
                if generation != self.generation {
                    debug!(?generation, current = ?self.generation, "discarding stale load failure");
                    return Ok(None);
                }
                let path = self
                    .session
                    .current_track
                    .take()
                    .map(|t| t.source_path)
                    .unwrap_or_default();
                self.session.state = PlaybackState::Error;
                Err(PlaybackError::Load { path, reason })
            }
            EngineEvent::EndOfTrack => {
                if self.session.state != PlaybackState::Playing {
                    return Ok(None);
                }
                if let Some(next) = self.successor_track() {
                    info!(track = %next.display_name, "advancing to next track");
                    return self.start_load(next);
                }
                self.enter_stopped();
                Ok(None)
            }
            EngineEvent::Fault { reason } => {
                warn!(%reason, "engine fault");
                self.session.state = PlaybackState::Error;
                self.session.current_track = None;
                Err(PlaybackError::Engine(reason))
            }
            EngineEvent::PositionChanged { position } => {
                if self.session.state == PlaybackState::Playing {
                    self.session.position = position;
                }
                Ok(None)
            }
        }
    }

    /// Build a status snapshot, refreshing the position from the engine
    pub fn snapshot(&mut self, notice: Option<String>) -> StatusSnapshot {
        if self.session.state.has_active_audio() {
            self.session.position = self.adapter.position();
        }

        let device_name = self
            .registry
            .selection()
            .and_then(|s| self.registry.find(&s.device_id))
            .map(|d| d.name.clone());

        StatusSnapshot {
            state: self.session.state,
            track: self.session.current_track.clone(),
            position_ms: u64::try_from(self.session.position.as_millis()).unwrap_or(u64::MAX),
            duration_ms: u64::try_from(self.session.duration.as_millis()).unwrap_or(u64::MAX),
            volume: self.session.volume,
            rate: self.session.rate,
            muted: self.session.muted,
            device_name,
            notice,
        }
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// The remembered last explicit selection
    #[must_use]
    pub fn selection_memory(&self) -> &SelectionMemory {
        &self.memory
    }

    /// The current machine state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    /// Start loading `track` without touching the selection memory
    ///
    /// Shared by recovery, next/previous, and end-of-track advance.
    fn start_load(&mut self, track: Track) -> Result<Option<String>> {
        if self.session.state.has_active_audio() || self.session.state == PlaybackState::Loading {
            self.adapter.stop()?;
        }

        self.generation = self.generation.next();
        self.session.state = PlaybackState::Loading;
        self.session.position = Duration::ZERO;
        self.session.duration = Duration::ZERO;
        self.session.current_track = Some(track.clone());

        debug!(track = %track.display_name, generation = ?self.generation, "loading");
        if let Err(e) = self.adapter.load(self.generation, &track.source_path) {
            self.session.state = PlaybackState::Error;
            self.session.current_track = None;
            return Err(e);
        }
        Ok(None)
    }

    /// Transition into `Playing`, re-applying the output device first
    ///
    /// The engine drops its output chain on stop, so the persisted
    /// selection has to be routed again on every entry. A selection whose
    /// device has disappeared is cleared and playback falls back to the
    /// system default instead of failing.
    fn begin_playing(&mut self) -> Result<()> {
        if let Err(e) = self.adapter.apply_output(self.registry.selection()) {
            match e {
                PlaybackError::DeviceUnavailable(id) => {
                    warn!(device = %id, "selected device gone, falling back to system default");
                    self.registry.clear_selection();
                    self.adapter.apply_output(None)?;
                }
                other => return Err(other),
            }
        }

        let effective = if self.session.muted { 0 } else { self.session.volume };
        if let Err(e) = self.adapter.set_volume(effective) {
            warn!(error = %e, "failed to re-apply volume");
        }
        if let Err(e) = self.adapter.set_rate(self.session.rate) {
            warn!(error = %e, "failed to re-apply rate");
        }

        self.adapter.play()?;
        self.session.state = PlaybackState::Playing;
        Ok(())
    }

    fn enter_stopped(&mut self) {
        self.session.state = PlaybackState::Stopped;
        self.session.current_track = None;
        self.session.position = Duration::ZERO;
        self.session.duration = Duration::ZERO;
    }

    /// Recover a track for a bare play command with nothing active
    fn recover(&mut self) -> Result<Option<String>> {
        if let Some(track) = self.memory.recall().cloned() {
            return self.start_load(track);
        }
        if let Some(track) = self
            .collection
            .iter()
            .find(|t| t.media_kind == MediaKind::Audio)
            .cloned()
        {
            return self.start_load(track);
        }
        Ok(Some(NO_AUDIO_NOTICE.to_string()))
    }

    fn step(&mut self, offset: isize, edge_notice: &str) -> Result<Option<String>> {
        let Some(current) = self.session.current_track.as_ref() else {
            return self.recover();
        };

        let audio: Vec<&Track> = self
            .collection
            .iter()
            .filter(|t| t.media_kind == MediaKind::Audio)
            .collect();
        let Some(index) = audio.iter().position(|t| t.id == current.id) else {
            return Ok(Some(NO_AUDIO_NOTICE.to_string()));
        };

        let target = index as isize + offset;
        if target < 0 || target as usize >= audio.len() {
            return Ok(Some(edge_notice.to_string()));
        }
        #[allow(clippy::cast_sign_loss)]
        let track = audio[target as usize].clone();
        self.start_load(track)
    }

    /// Track following the current one among the collection's audio items
    fn successor_track(&self) -> Option<Track> {
        let current = self.session.current_track.as_ref()?;
        let mut audio = self
            .collection
            .iter()
            .filter(|t| t.media_kind == MediaKind::Audio);
        audio.find(|t| t.id == current.id)?;
        audio.next().cloned()
    }

    fn lookup_device(&mut self, device_id: &str) -> Result<Option<Device>> {
        if self.registry.cached().is_some() {
            if let Some(device) = self.registry.find(device_id) {
                return Ok(Some(device.clone()));
            }
        }
        let listing = self.adapter.list_outputs()?;
        self.registry.store(listing);
        Ok(self.registry.find(device_id).cloned())
    }
}
