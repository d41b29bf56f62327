//! Device manager: handle issuance, exclusive locking, and reset
//! lifecycle.
//!
//! A [`DeviceManager`] owns at most one device resource at a time. Clients
//! open opaque handles against it, claim the device through a non-blocking
//! exclusive lock, and request service objects bound to the device.
//! Resetting the device with the manager's capability token replaces the
//! resource and lazily invalidates every handle opened before the reset.

mod builder;
mod manager;

pub use builder::ManagerBuilder;
pub use manager::DeviceManager;
