//! Shared video device management with handle-based access control
//!
//! This crate provides a device manager that owns a video device
//! resource, issues opaque handles to clients, enforces an exclusive
//! non-blocking lock on the device, and invalidates outstanding handles
//! when the device is replaced.
//!
//! ```
//! use std::sync::Arc;
//! use video_manager::{DeviceManager, SoftwareDevice};
//!
//! let (manager, token) = DeviceManager::builder().build()?;
//! manager.reset_device(Arc::new(SoftwareDevice::new("gpu0")), token)?;
//!
//! let handle = manager.open_device_handle()?;
//! let device = manager.lock_device(handle, false)?;
//! println!("locked {}", device.name());
//! manager.unlock_device(handle, false)?;
//! # Ok::<(), video_manager::ManagerError>(())
//! ```

#![warn(missing_docs)]

// Public modules
pub mod config;
pub mod device;
pub mod error;
pub mod manager;
pub mod metrics;
pub mod service;
pub mod types;
pub mod utils;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Minimum supported Rust toolchain
pub const MIN_RUST_VERSION: &str = "1.70.0";

// Re-exports for public API
pub use config::{LogLevel, ManagerConfig, MonitoringConfig};
pub use device::{DeviceState, SharedDevice, SoftwareDevice, VideoDevice};
pub use error::{ManagerError, Result};
pub use manager::{DeviceManager, ManagerBuilder};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use service::{
    create_video_service, ServiceKind, SurfaceFormat, VideoAccelerationService,
    VideoProcessorService, VideoService, VideoSurface,
};
pub use types::{DeviceHandle, ResetToken};
