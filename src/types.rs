//! Common value types used throughout the crate

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque capability granting a client access to device-manager
/// operations.
///
/// Handles are issued by [`DeviceManager::open_device_handle`] and are
/// unique across the manager's lifetime; a closed handle's value is never
/// issued again. The raw value exists because handles cross API
/// boundaries in calling code; nothing about it should be interpreted.
///
/// [`DeviceManager::open_device_handle`]: crate::manager::DeviceManager::open_device_handle
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(u64);

impl DeviceHandle {
    /// The null handle. Never issued by a manager; rejected by every
    /// operation that takes a handle.
    pub const NULL: DeviceHandle = DeviceHandle(0);

    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Reconstruct a handle from a raw value previously obtained with
    /// [`into_raw`](Self::into_raw).
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// The raw handle value, for callers that move handles across API
    /// boundaries.
    pub fn into_raw(self) -> u64 {
        self.0
    }

    /// Whether this is the null handle.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceHandle({:#x})", self.0)
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One-time capability required to reset the managed device.
///
/// Minted exactly once when a manager is built and handed back alongside
/// it; every resetter must present the same token unchanged. The token
/// value never appears in log output.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ResetToken(u32);

impl ResetToken {
    pub(crate) fn mint() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(1);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        Self(nanos.rotate_left(8) ^ count)
    }

    /// Reconstruct a token from a raw value previously obtained with
    /// [`into_raw`](Self::into_raw).
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// The raw token value, for callers that persist the capability
    /// across API boundaries.
    pub fn into_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResetToken(..)")
    }
}
