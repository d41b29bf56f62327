use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::warn;

use super::{DeviceState, VideoDevice};

/// In-memory device backed by a named parameter table.
///
/// Stands in for a hardware accelerator in tests and demos; parameters
/// play the role of mutable render state (scissor rectangles, blend
/// modes) that the save/restore protocol carries across unlock/relock.
#[derive(Debug)]
pub struct SoftwareDevice {
    name: String,
    params: Mutex<BTreeMap<String, i64>>,
}

impl SoftwareDevice {
    /// Create a device with an empty parameter table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Mutex::new(BTreeMap::new()),
        }
    }

    /// Set a named parameter
    pub fn set_parameter(&self, key: impl Into<String>, value: i64) {
        self.params.lock().insert(key.into(), value);
    }

    /// Read a named parameter
    pub fn parameter(&self, key: &str) -> Option<i64> {
        self.params.lock().get(key).copied()
    }

    /// Number of parameters currently set
    pub fn parameter_count(&self) -> usize {
        self.params.lock().len()
    }
}

impl VideoDevice for SoftwareDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn capture_state(&self) -> DeviceState {
        let params = self.params.lock();
        match serde_json::to_vec(&*params) {
            Ok(bytes) => DeviceState::from_bytes(bytes),
            Err(err) => {
                warn!(device = %self.name, %err, "failed to capture device state");
                DeviceState::default()
            }
        }
    }

    fn restore_state(&self, state: &DeviceState) {
        if state.is_empty() {
            self.params.lock().clear();
            return;
        }
        match serde_json::from_slice::<BTreeMap<String, i64>>(state.as_bytes()) {
            Ok(params) => *self.params.lock() = params,
            Err(err) => {
                warn!(device = %self.name, %err, "ignoring unreadable device state snapshot");
            }
        }
    }
}
