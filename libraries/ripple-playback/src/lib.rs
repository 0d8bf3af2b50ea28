//! Playback control core
//!
//! Drives a [`ripple_core::MediaEngine`] from a dedicated command thread:
//! a strict playback state machine, persisted output-device selection,
//! last-track recovery, and a channel-based command/event contract the UI
//! layer talks to without ever touching the engine directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod controller;
mod devices;
mod error;
mod events;
mod machine;
mod memory;
mod types;

pub use controller::{AudioController, EngineEventSender, Observer};
pub use devices::DeviceRegistry;
pub use error::{PlaybackError, Result};
pub use events::{format_clock, PlayerEvent, StatusSnapshot};
pub use machine::{PlaybackMachine, NO_AUDIO_NOTICE};
pub use memory::SelectionMemory;
pub use types::{PlaybackSession, PlaybackState, PlayerConfig, MAX_RATE, MIN_RATE};
