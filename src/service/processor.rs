use std::sync::Arc;

use crate::device::SharedDevice;

/// Video processing service bound to a device.
///
/// Holds its own counted device reference; dropping the handle or
/// resetting the manager that created it does not affect the service.
#[derive(Clone)]
pub struct VideoProcessorService {
    device: SharedDevice,
}

impl VideoProcessorService {
    pub(crate) fn new(device: SharedDevice) -> Self {
        Self { device }
    }

    /// Counted reference to the device this service operates on
    pub fn device(&self) -> SharedDevice {
        Arc::clone(&self.device)
    }

    /// Name of the underlying device
    pub fn device_name(&self) -> &str {
        self.device.name()
    }
}
