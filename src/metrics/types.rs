//! Snapshot types produced by the metrics collector

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Snapshot of manager activity at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Time since the collector was created
    pub uptime: Duration,

    /// Handle lifecycle counters
    pub handles: HandleMetrics,

    /// Lock activity counters
    pub lock: LockMetrics,

    /// Device lifecycle counters
    pub device: DeviceMetrics,
}

/// Handle lifecycle counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandleMetrics {
    /// Handles issued so far
    pub opened: u64,

    /// Handles closed so far
    pub closed: u64,

    /// Handles currently open
    pub open_now: u64,

    /// Operations rejected because the handle predated the latest reset
    pub stale_rejections: u64,
}

/// Lock activity counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockMetrics {
    /// Successful lock acquisitions
    pub acquired: u64,

    /// Lock releases, explicit or implicit
    pub released: u64,

    /// Lock attempts rejected because another handle held the lock
    pub contention: u64,

    /// Mean time the lock was held, over the retained history
    pub average_hold_time: Duration,
}

/// Device lifecycle counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceMetrics {
    /// Successful device resets
    pub resets: u64,

    /// Service objects handed out
    pub service_requests: u64,
}
