//! Engine adapter
//!
//! Thin ownership wrapper around the boxed [`MediaEngine`]. Keeps the
//! machine free of direct trait-object plumbing and converts engine
//! errors into playback errors at one seam.

use std::path::Path;
use std::time::Duration;

use ripple_core::{Device, DeviceSelection, LoadGeneration, MediaEngine};

use crate::error::Result;

pub(crate) struct EngineAdapter {
    engine: Box<dyn MediaEngine>,
}

impl EngineAdapter {
    pub(crate) fn new(engine: Box<dyn MediaEngine>) -> Self {
        Self { engine }
    }

    pub(crate) fn load(&mut self, generation: LoadGeneration, path: &Path) -> Result<()> {
        self.engine.load(generation, path)?;
        Ok(())
    }

    pub(crate) fn play(&mut self) -> Result<()> {
        self.engine.play()?;
        Ok(())
    }

    pub(crate) fn pause(&mut self) -> Result<()> {
        self.engine.pause()?;
        Ok(())
    }

    pub(crate) fn stop(&mut self) -> Result<()> {
        self.engine.stop()?;
        Ok(())
    }

    pub(crate) fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.engine.seek_to(position)?;
        Ok(())
    }

    pub(crate) fn position(&self) -> Duration {
        self.engine.position()
    }

    pub(crate) fn duration(&self) -> Duration {
        self.engine.duration()
    }

    pub(crate) fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.engine.set_volume(volume)?;
        Ok(())
    }

    pub(crate) fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.engine.set_rate(rate)?;
        Ok(())
    }

    pub(crate) fn list_outputs(&mut self) -> Result<Vec<Device>> {
        Ok(self.engine.list_outputs()?)
    }

    /// Route output to the selected device, or the system default for `None`
    pub(crate) fn apply_output(&mut self, selection: Option<&DeviceSelection>) -> Result<()> {
        self.engine
            .set_output(selection.map(|s| s.device_id.as_str()))?;
        Ok(())
    }
}
