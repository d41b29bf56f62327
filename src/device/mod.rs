//! Device resource abstraction shared between the manager and services

mod software;
mod state;

pub use software::SoftwareDevice;
pub use state::DeviceState;

use std::sync::Arc;

/// A video device resource placed under manager control.
///
/// The manager treats the device as opaque: it holds a counted reference,
/// hands further counted references to lock holders and services, and
/// drives the state save/restore protocol across unlock/relock. Nothing
/// else about the device is interpreted.
pub trait VideoDevice: Send + Sync {
    /// Short identifier used in log output
    fn name(&self) -> &str;

    /// Capture an opaque snapshot of the current device state
    fn capture_state(&self) -> DeviceState;

    /// Apply a previously captured snapshot.
    ///
    /// Implementations keep the current state when a snapshot cannot be
    /// applied.
    fn restore_state(&self, state: &DeviceState);
}

/// Shared, reference-counted device resource
pub type SharedDevice = Arc<dyn VideoDevice>;
