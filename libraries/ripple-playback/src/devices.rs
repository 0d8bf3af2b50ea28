//! Output device cache and selection
//!
//! Enumeration is expensive on some hosts, so results are cached with a
//! short TTL. Every fresh enumeration bumps an epoch; the persisted
//! selection records the epoch it was made under so disappearance can be
//! detected when a newer listing no longer contains the device.

use std::time::{Duration, Instant};

use ripple_core::{Device, DeviceSelection, DEFAULT_DEVICE_ID};
use tracing::debug;

/// Cached device listing plus the persisted user selection
#[derive(Debug)]
pub struct DeviceRegistry {
    ttl: Duration,
    cached: Option<CachedListing>,
    epoch: u64,
    selection: Option<DeviceSelection>,
}

#[derive(Debug)]
struct CachedListing {
    devices: Vec<Device>,
    fetched_at: Instant,
}

impl DeviceRegistry {
    /// Create an empty registry whose cache expires after `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            cached: None,
            epoch: 0,
            selection: None,
        }
    }

    /// The cached listing, if still fresh
    #[must_use]
    pub fn cached(&self) -> Option<&[Device]> {
        let listing = self.cached.as_ref()?;
        if listing.fetched_at.elapsed() < self.ttl {
            Some(&listing.devices)
        } else {
            None
        }
    }

    /// Store a fresh enumeration, bumping the epoch
    ///
    /// The synthetic system-default entry is prepended if the backend did
    /// not include one.
    pub fn store(&mut self, mut devices: Vec<Device>) {
        if !devices.iter().any(|d| d.id == DEFAULT_DEVICE_ID) {
            devices.insert(0, Device::system_default());
        }
        self.epoch += 1;
        debug!(epoch = self.epoch, count = devices.len(), "device listing refreshed");
        self.cached = Some(CachedListing {
            devices,
            fetched_at: Instant::now(),
        });
    }

    /// Look up a device by id in the cached listing (fresh or stale)
    #[must_use]
    pub fn find(&self, device_id: &str) -> Option<&Device> {
        self.cached
            .as_ref()
            .and_then(|listing| listing.devices.iter().find(|d| d.id == device_id))
    }

    /// Persist `device_id` as the user's choice
    ///
    /// Selecting the system default clears the explicit selection instead
    /// of recording one.
    pub fn select(&mut self, device_id: &str) {
        if device_id == DEFAULT_DEVICE_ID {
            self.selection = None;
        } else {
            self.selection = Some(DeviceSelection {
                device_id: device_id.to_string(),
                epoch: self.epoch,
            });
        }
    }

    /// Drop the persisted selection, falling back to the system default
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The persisted selection, if any
    #[must_use]
    pub fn selection(&self) -> Option<&DeviceSelection> {
        self.selection.as_ref()
    }

    /// Force the next [`cached`](Self::cached) call to miss
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
