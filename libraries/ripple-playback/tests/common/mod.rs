//! Shared test scaffolding: a scriptable in-memory media engine.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use ripple_core::{Device, EngineError, LoadGeneration, MediaEngine, Track};

static TRACING: Once = Once::new();

/// Route tracing output through the test harness, honoring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Default)]
struct MockState {
    calls: Vec<String>,
    devices: Vec<Device>,
    failing_outputs: HashSet<String>,
    fail_next_load: Option<String>,
    last_generation: Option<LoadGeneration>,
    position: Duration,
    duration: Duration,
}

/// Handle shared with the engine moved into the machine, so tests can
/// script failures and inspect the call log afterwards.
#[derive(Clone, Default)]
pub struct MockHandle(Arc<Mutex<MockState>>);

impl MockHandle {
    pub fn engine(&self) -> Box<dyn MediaEngine> {
        Box::new(MockEngine(Arc::clone(&self.0)))
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.0.lock().unwrap().calls.clear();
    }

    pub fn set_devices(&self, devices: Vec<Device>) {
        self.0.lock().unwrap().devices = devices;
    }

    pub fn fail_output(&self, device_id: &str) {
        self.0
            .lock()
            .unwrap()
            .failing_outputs
            .insert(device_id.to_string());
    }

    pub fn fail_next_load(&self, reason: &str) {
        self.0.lock().unwrap().fail_next_load = Some(reason.to_string());
    }

    pub fn last_generation(&self) -> LoadGeneration {
        self.0
            .lock()
            .unwrap()
            .last_generation
            .expect("no load started")
    }

    pub fn set_position(&self, position: Duration) {
        self.0.lock().unwrap().position = position;
    }
}

pub struct MockEngine(Arc<Mutex<MockState>>);

impl MediaEngine for MockEngine {
    fn load(&mut self, generation: LoadGeneration, path: &Path) -> Result<(), EngineError> {
        let mut state = self.0.lock().unwrap();
        state.calls.push(format!("load:{}", path.display()));
        state.last_generation = Some(generation);
        if let Some(reason) = state.fail_next_load.take() {
            return Err(EngineError::Load {
                path: path.to_path_buf(),
                reason,
            });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.0.lock().unwrap().calls.push("play".to_string());
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.0.lock().unwrap().calls.push("pause".to_string());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.0.lock().unwrap().calls.push("stop".to_string());
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<(), EngineError> {
        let mut state = self.0.lock().unwrap();
        state.calls.push(format!("seek:{}", position.as_millis()));
        state.position = position;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.0.lock().unwrap().position
    }

    fn duration(&self) -> Duration {
        self.0.lock().unwrap().duration
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), EngineError> {
        self.0
            .lock()
            .unwrap()
            .calls
            .push(format!("set_volume:{volume}"));
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<(), EngineError> {
        self.0.lock().unwrap().calls.push(format!("set_rate:{rate}"));
        Ok(())
    }

    fn list_outputs(&mut self) -> Result<Vec<Device>, EngineError> {
        let mut state = self.0.lock().unwrap();
        state.calls.push("list_outputs".to_string());
        Ok(state.devices.clone())
    }

    fn set_output(&mut self, device_id: Option<&str>) -> Result<(), EngineError> {
        let mut state = self.0.lock().unwrap();
        match device_id {
            Some(id) if state.failing_outputs.contains(id) => {
                Err(EngineError::DeviceUnavailable(id.to_string()))
            }
            Some(id) => {
                state.calls.push(format!("set_output:{id}"));
                Ok(())
            }
            None => {
                state.calls.push("set_output:default".to_string());
                Ok(())
            }
        }
    }
}

pub fn device(id: &str, name: &str) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        is_default: false,
    }
}

pub fn audio_track(id: &str) -> Track {
    Track::new(id, format!("/music/{id}.mp3"))
}

/// Index of the first call equal to `needle`, panicking when absent
pub fn call_index(calls: &[String], needle: &str) -> usize {
    calls
        .iter()
        .position(|c| c == needle)
        .unwrap_or_else(|| panic!("call {needle:?} not found in {calls:?}"))
}
