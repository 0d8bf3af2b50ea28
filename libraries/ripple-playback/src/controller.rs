//! Playback controller
//!
//! Public entry point of the crate. Owns a dedicated command thread that
//! holds the [`PlaybackMachine`] and the engine, so every command and
//! every engine event runs serialized in arrival order. UI threads talk
//! to it through cheap channel sends; observers are invoked on the
//! command thread and must not block.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use ripple_core::{Device, EngineEvent, MediaEngine, Track};
use tracing::{error, info};

use crate::error::{PlaybackError, Result};
use crate::events::{PlayerEvent, StatusSnapshot};
use crate::machine::PlaybackMachine;
use crate::types::PlayerConfig;

const COMMAND_QUEUE_DEPTH: usize = 64;

/// Callback invoked on the command thread for every outbound event
pub type Observer = Box<dyn Fn(&PlayerEvent) + Send>;

enum Command {
    PlayNew(Track),
    TogglePlayPause,
    Stop,
    Next,
    Previous,
    SeekRelative(i64),
    AdjustVolume(i16),
    SetRate(f32),
    ToggleMute,
    SetDevice(String),
    SetCollection(Vec<Track>),
    ListDevices {
        force_refresh: bool,
        reply: Sender<Result<Vec<Device>>>,
    },
    Snapshot(Sender<StatusSnapshot>),
    Subscribe(Observer),
    Engine(EngineEvent),
    Shutdown,
}

/// Cloneable handle engine backends use to push their events
///
/// Events sent here are marshaled onto the command thread and processed
/// in order with user commands.
#[derive(Clone)]
pub struct EngineEventSender {
    tx: Sender<Command>,
}

impl EngineEventSender {
    /// Deliver an engine event; dropped silently after controller shutdown
    pub fn send(&self, event: EngineEvent) {
        let _ = self.tx.send(Command::Engine(event));
    }
}

/// Handle to the playback core
///
/// All methods are safe to call from any thread. Dropping the controller
/// shuts the command thread down and releases the engine.
pub struct AudioController {
    tx: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl AudioController {
    /// Spawn the command thread around `engine`
    pub fn new(engine: Box<dyn MediaEngine>, config: PlayerConfig) -> Result<Self> {
        let (tx, rx) = bounded(COMMAND_QUEUE_DEPTH);
        let worker = thread::Builder::new()
            .name("playback".to_string())
            .spawn(move || run(engine, &config, &rx))
            .map_err(|e| PlaybackError::EngineInit(e.to_string()))?;

        Ok(Self {
            tx,
            worker: Some(worker),
        })
    }

    /// Start playing an explicitly selected track
    pub fn play_new(&self, track: Track) -> Result<()> {
        if track.source_path.as_os_str().is_empty() {
            return Err(PlaybackError::Load {
                path: track.source_path,
                reason: "empty source path".to_string(),
            });
        }
        self.send(Command::PlayNew(track))
    }

    /// Toggle between playing and paused, recovering a track if needed
    pub fn toggle_play_pause(&self) -> Result<()> {
        self.send(Command::TogglePlayPause)
    }

    /// Stop playback
    pub fn stop(&self) -> Result<()> {
        self.send(Command::Stop)
    }

    /// Advance to the next audio track in the collection
    pub fn next(&self) -> Result<()> {
        self.send(Command::Next)
    }

    /// Go back to the previous audio track in the collection
    pub fn previous(&self) -> Result<()> {
        self.send(Command::Previous)
    }

    /// Seek by a signed millisecond offset
    pub fn seek_relative(&self, delta_ms: i64) -> Result<()> {
        self.send(Command::SeekRelative(delta_ms))
    }

    /// Change volume by a signed step
    pub fn adjust_volume(&self, delta: i16) -> Result<()> {
        self.send(Command::AdjustVolume(delta))
    }

    /// Set the playback rate
    pub fn set_rate(&self, rate: f32) -> Result<()> {
        self.send(Command::SetRate(rate))
    }

    /// Toggle mute
    pub fn toggle_mute(&self) -> Result<()> {
        self.send(Command::ToggleMute)
    }

    /// Select an output device by id
    pub fn set_device(&self, device_id: impl Into<String>) -> Result<()> {
        self.send(Command::SetDevice(device_id.into()))
    }

    /// Replace the browsable collection
    pub fn set_collection(&self, tracks: Vec<Track>) -> Result<()> {
        self.send(Command::SetCollection(tracks))
    }

    /// Enumerate output devices, refreshing the cache when asked
    pub fn list_devices(&self, force_refresh: bool) -> Result<Vec<Device>> {
        let (reply, rx) = bounded(1);
        self.send(Command::ListDevices {
            force_refresh,
            reply,
        })?;
        rx.recv().map_err(|_| PlaybackError::ControllerGone)?
    }

    /// Current status, queried synchronously
    pub fn snapshot(&self) -> Result<StatusSnapshot> {
        let (reply, rx) = bounded(1);
        self.send(Command::Snapshot(reply))?;
        rx.recv().map_err(|_| PlaybackError::ControllerGone)
    }

    /// Register an observer for outbound events
    pub fn subscribe(&self, observer: Observer) -> Result<()> {
        self.send(Command::Subscribe(observer))
    }

    /// Handle for the engine backend to push its events through
    #[must_use]
    pub fn engine_events(&self) -> EngineEventSender {
        EngineEventSender {
            tx: self.tx.clone(),
        }
    }

    fn send(&self, command: Command) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| PlaybackError::ControllerGone)
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run(engine: Box<dyn MediaEngine>, config: &PlayerConfig, rx: &Receiver<Command>) {
    let mut machine = PlaybackMachine::new(engine, config);
    let mut observers: Vec<Observer> = Vec::new();
    info!("playback thread started");

    for command in rx {
        // Query commands reply directly and change nothing observable.
        let outcome = match command {
            Command::PlayNew(track) => machine.play_new(track),
            Command::TogglePlayPause => machine.toggle_play_pause(),
            Command::Stop => machine.stop(),
            Command::Next => machine.next(),
            Command::Previous => machine.previous(),
            Command::SeekRelative(delta_ms) => machine.seek_relative(delta_ms),
            Command::AdjustVolume(delta) => machine.adjust_volume(delta),
            Command::SetRate(rate) => machine.set_rate(rate),
            Command::ToggleMute => machine.toggle_mute(),
            Command::SetDevice(id) => machine.set_device(&id),
            Command::SetCollection(tracks) => {
                machine.set_collection(tracks);
                continue;
            }
            Command::ListDevices {
                force_refresh,
                reply,
            } => {
                let _ = reply.send(machine.devices(force_refresh));
                continue;
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(machine.snapshot(None));
                continue;
            }
            Command::Subscribe(observer) => {
                observers.push(observer);
                continue;
            }
            Command::Engine(event) => machine.handle_engine_event(event),
            Command::Shutdown => break,
        };

        let notice = match outcome {
            Ok(notice) => notice,
            Err(e) => {
                error!(error = %e, "playback command failed");
                let message = e.to_string();
                notify(&observers, &PlayerEvent::Error {
                    message: message.clone(),
                });
                Some(message)
            }
        };

        for event in machine.take_events() {
            notify(&observers, &event);
        }
        notify(&observers, &PlayerEvent::StatusChanged(machine.snapshot(notice)));
    }

    info!("playback thread exiting");
}

fn notify(observers: &[Observer], event: &PlayerEvent) {
    for observer in observers {
        observer(event);
    }
}
