use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::ManagerConfig;
use crate::device::{DeviceState, SharedDevice};
use crate::error::{ManagerError, Result};
use crate::metrics::{MetricsCollector, MetricsSnapshot};
use crate::service::{create_video_service, ServiceKind, VideoService};
use crate::types::{DeviceHandle, ResetToken};

use super::builder::ManagerBuilder;

/// Owns a shared device resource and mediates all client access to it.
///
/// Clients obtain opaque handles with [`open_device_handle`], claim the
/// device through the exclusive non-blocking lock with [`lock_device`],
/// and request service objects with [`get_video_service`]. Replacing the
/// device with [`reset_device`] advances the manager's generation counter;
/// handles opened before the reset stay open but fail lock/service/test
/// operations with [`ManagerError::NewVideoDevice`] until the client opens
/// a fresh handle.
///
/// Every operation completes synchronously inside one exclusive critical
/// section, so concurrent calls from arbitrary threads appear linearized,
/// and a failing call never modifies shared state.
///
/// [`open_device_handle`]: Self::open_device_handle
/// [`lock_device`]: Self::lock_device
/// [`get_video_service`]: Self::get_video_service
/// [`reset_device`]: Self::reset_device
pub struct DeviceManager {
    config: Arc<ManagerConfig>,
    metrics: Arc<MetricsCollector>,
    token: ResetToken,
    inner: Mutex<ManagerState>,
}

/// Mutable manager state; every public operation runs exactly one
/// critical section over it.
struct ManagerState {
    device: Option<SharedDevice>,
    generation: u64,
    next_handle: u64,
    handles: HashMap<u64, HandleEntry>,
    lock_holder: Option<u64>,
    saved_state: Option<DeviceState>,
}

#[derive(Debug, Clone, Copy)]
struct HandleEntry {
    generation: u64,
}

impl ManagerState {
    fn new() -> Self {
        Self {
            device: None,
            generation: 0,
            // Handle values start at 1; 0 is the null handle.
            next_handle: 1,
            handles: HashMap::new(),
            lock_holder: None,
            saved_state: None,
        }
    }
}

impl DeviceManager {
    /// Start building a manager
    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::new()
    }

    pub(crate) fn new(
        config: Arc<ManagerConfig>,
        metrics: Arc<MetricsCollector>,
        token: ResetToken,
    ) -> Self {
        Self {
            config,
            metrics,
            token,
            inner: Mutex::new(ManagerState::new()),
        }
    }

    /// Open a fresh handle bound to the current device generation.
    ///
    /// Fails with [`ManagerError::NotInitialized`] until the first
    /// successful [`reset_device`](Self::reset_device). Does not touch the
    /// lock; concurrently open handles are independent.
    pub fn open_device_handle(&self) -> Result<DeviceHandle> {
        let mut state = self.inner.lock();

        if state.device.is_none() {
            return Err(self.reject(ManagerError::NotInitialized, "open_device_handle"));
        }

        let value = state.next_handle;
        state.next_handle += 1;
        let generation = state.generation;
        state.handles.insert(value, HandleEntry { generation });

        let handle = DeviceHandle::new(value);
        self.metrics.record_handle_opened();
        debug!(manager = %self.config.label, %handle, generation, "opened device handle");
        Ok(handle)
    }

    /// Close a handle.
    ///
    /// Fails with [`ManagerError::InvalidHandle`] if the handle is
    /// unknown, already closed, or null. If the handle currently holds the
    /// device lock, the lock is released and any saved state snapshot is
    /// discarded. The handle value is never accepted again.
    pub fn close_device_handle(&self, handle: DeviceHandle) -> Result<()> {
        let mut state = self.inner.lock();

        if state.handles.remove(&handle.into_raw()).is_none() {
            return Err(self.reject(ManagerError::InvalidHandle { handle }, "close_device_handle"));
        }

        if state.lock_holder == Some(handle.into_raw()) {
            state.lock_holder = None;
            state.saved_state = None;
            self.metrics.record_lock_released();
            debug!(manager = %self.config.label, %handle, "lock released by closing its holder");
        }

        self.metrics.record_handle_closed();
        debug!(manager = %self.config.label, %handle, "closed device handle");
        Ok(())
    }

    /// Bind a new device resource, invalidating all outstanding handles.
    ///
    /// Fails with [`ManagerError::InvalidArgument`] unless `token` is the
    /// one minted when this manager was built. On success the generation
    /// counter advances; handles opened earlier remain open but fail
    /// lock/service/test operations until their owners reopen. A lock held
    /// at reset time is released and any saved snapshot discarded, since
    /// both guarded the replaced device.
    pub fn reset_device(&self, device: SharedDevice, token: ResetToken) -> Result<()> {
        let mut state = self.inner.lock();

        if token != self.token {
            return Err(self.reject(
                ManagerError::InvalidArgument {
                    message: "reset token does not match the one minted for this manager"
                        .to_string(),
                },
                "reset_device",
            ));
        }

        if state.lock_holder.take().is_some() {
            self.metrics.record_lock_released();
            warn!(manager = %self.config.label, "device reset while locked; lock released");
        }
        state.saved_state = None;

        state.generation += 1;
        debug!(
            manager = %self.config.label,
            device = device.name(),
            generation = state.generation,
            "bound new device"
        );
        state.device = Some(device);
        self.metrics.record_reset();
        Ok(())
    }

    /// Claim the exclusive device lock and return a counted reference to
    /// the device.
    ///
    /// This is a non-blocking try-acquire: when another handle holds the
    /// lock the call fails with [`ManagerError::VideoDeviceLocked`]
    /// immediately, and the manager never queues waiters. Handle staleness
    /// is checked before contention, so a stale handle sees
    /// [`ManagerError::NewVideoDevice`] even while the device is locked.
    ///
    /// If the previous unlock saved a state snapshot, it is restored onto
    /// the device (and consumed) before this call returns. The
    /// `save_state` flag is accepted for surface compatibility; snapshot
    /// behavior is governed solely by the flag passed to
    /// [`unlock_device`](Self::unlock_device).
    pub fn lock_device(&self, handle: DeviceHandle, save_state: bool) -> Result<SharedDevice> {
        let mut state = self.inner.lock();

        let device = match state.device {
            Some(ref device) => Arc::clone(device),
            None => return Err(self.reject(ManagerError::NotInitialized, "lock_device")),
        };

        let entry = match state.handles.get(&handle.into_raw()) {
            Some(entry) => *entry,
            None => return Err(self.reject(ManagerError::InvalidHandle { handle }, "lock_device")),
        };

        if entry.generation != state.generation {
            self.metrics.record_stale_rejection();
            return Err(self.reject(ManagerError::NewVideoDevice { handle }, "lock_device"));
        }

        // The lock is not reentrant: a second claim fails even for the
        // handle that already holds it.
        if state.lock_holder.is_some() {
            self.metrics.record_lock_contention();
            return Err(self.reject(ManagerError::VideoDeviceLocked, "lock_device"));
        }

        state.lock_holder = Some(handle.into_raw());
        if let Some(saved) = state.saved_state.take() {
            device.restore_state(&saved);
            debug!(manager = %self.config.label, %handle, "restored state saved at last unlock");
        }

        self.metrics.record_lock_acquired();
        debug!(manager = %self.config.label, %handle, save_state, "locked device");
        Ok(device)
    }

    /// Release the device lock.
    ///
    /// Fails with [`ManagerError::InvalidArgument`] whenever `handle` is
    /// not the current lock holder: an unknown handle, a different open
    /// handle, or no lock held at all. With `save_state`, captures a
    /// snapshot of the device state for restoration on the next successful
    /// lock by any handle; without it, any pending snapshot is cleared.
    pub fn unlock_device(&self, handle: DeviceHandle, save_state: bool) -> Result<()> {
        let mut state = self.inner.lock();

        if state.lock_holder != Some(handle.into_raw()) {
            return Err(self.reject(
                ManagerError::InvalidArgument {
                    message: format!("handle {} does not hold the device lock", handle),
                },
                "unlock_device",
            ));
        }

        // A lock holder implies a bound device: the lock is only ever
        // granted after initialization and is released on reset.
        let snapshot = if save_state {
            state.device.as_ref().map(|device| device.capture_state())
        } else {
            None
        };

        state.lock_holder = None;
        state.saved_state = snapshot;
        self.metrics.record_lock_released();
        debug!(manager = %self.config.label, %handle, save_state, "unlocked device");
        Ok(())
    }

    /// Construct a service object bound to the current device.
    ///
    /// The returned service holds its own counted device reference; its
    /// lifetime is independent of `handle` and of this manager.
    pub fn get_video_service(
        &self,
        handle: DeviceHandle,
        kind: ServiceKind,
    ) -> Result<VideoService> {
        let state = self.inner.lock();

        let device = match state.device {
            Some(ref device) => Arc::clone(device),
            None => return Err(self.reject(ManagerError::NotInitialized, "get_video_service")),
        };

        let entry = match state.handles.get(&handle.into_raw()) {
            Some(entry) => *entry,
            None => {
                return Err(self.reject(ManagerError::InvalidHandle { handle }, "get_video_service"))
            }
        };

        if entry.generation != state.generation {
            self.metrics.record_stale_rejection();
            return Err(self.reject(ManagerError::NewVideoDevice { handle }, "get_video_service"));
        }

        self.metrics.record_service_request();
        debug!(manager = %self.config.label, %handle, ?kind, "created video service");
        Ok(create_video_service(device, kind))
    }

    /// Check whether the device is still current for a handle.
    ///
    /// Succeeds iff the handle is open and was issued at the current
    /// generation.
    pub fn test_device(&self, handle: DeviceHandle) -> Result<()> {
        let state = self.inner.lock();

        let entry = match state.handles.get(&handle.into_raw()) {
            Some(entry) => *entry,
            None => return Err(self.reject(ManagerError::InvalidHandle { handle }, "test_device")),
        };

        if entry.generation != state.generation {
            self.metrics.record_stale_rejection();
            return Err(self.reject(ManagerError::NewVideoDevice { handle }, "test_device"));
        }

        Ok(())
    }

    /// Whether a device has ever been bound
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().device.is_some()
    }

    /// Number of successful resets so far
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Number of currently open handles
    pub fn open_handles(&self) -> usize {
        self.inner.lock().handles.len()
    }

    /// Snapshot of activity counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Expected operational conditions (contention, staleness) log at
    /// debug; everything else points at a caller or setup problem and
    /// logs at warn.
    fn reject(&self, error: ManagerError, operation: &str) -> ManagerError {
        if error.is_recoverable() {
            debug!(manager = %self.config.label, %error, operation, "operation failed");
        } else {
            warn!(manager = %self.config.label, %error, operation, "operation rejected");
        }
        error
    }
}
