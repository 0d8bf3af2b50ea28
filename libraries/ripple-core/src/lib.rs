//! Ripple Core
//!
//! Platform-agnostic domain types and the media-engine contract for the
//! Ripple file browser's playback core.
//!
//! This crate provides:
//! - **Domain Types**: [`Track`], [`MediaKind`], [`Device`], [`DeviceSelection`]
//! - **Engine Contract**: the [`MediaEngine`] trait, [`EngineEvent`] and
//!   [`LoadGeneration`] for asynchronous load completion
//! - **Classification**: [`MediaFileDetector`] for extension-based media
//!   detection (URL-aware)
//! - **Error Handling**: [`EngineError`]
//!
//! The crate has no dependency on any concrete audio backend; engine
//! implementations (and their threads) live elsewhere and talk to the
//! playback core exclusively through [`MediaEngine`] and [`EngineEvent`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod detector;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use detector::MediaFileDetector;
pub use error::EngineError;
pub use traits::{EngineEvent, LoadGeneration, MediaEngine};
pub use types::{Device, DeviceSelection, MediaKind, Track, DEFAULT_DEVICE_ID};
