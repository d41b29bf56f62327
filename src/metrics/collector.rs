use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::types::{DeviceMetrics, HandleMetrics, LockMetrics, MetricsSnapshot};

/// Collects activity counters for a single manager.
///
/// Recording is cheap and never fails; when the collector is disabled
/// every record call is a no-op and snapshots report zeroes.
pub struct MetricsCollector {
    enabled: bool,
    history_limit: usize,
    state: RwLock<MetricsState>,
    start_time: Instant,
}

#[derive(Debug, Default)]
struct MetricsState {
    handles_opened: u64,
    handles_closed: u64,
    stale_rejections: u64,

    locks_acquired: u64,
    locks_released: u64,
    lock_contention: u64,
    lock_acquired_at: Option<Instant>,
    hold_times: Vec<Duration>,

    resets: u64,
    service_requests: u64,
}

impl MetricsCollector {
    /// Create a new collector retaining up to `history_limit` lock-hold
    /// timings
    pub fn new(enabled: bool, history_limit: usize) -> Self {
        Self {
            enabled,
            history_limit,
            state: RwLock::new(MetricsState::default()),
            start_time: Instant::now(),
        }
    }

    pub(crate) fn record_handle_opened(&self) {
        if !self.enabled {
            return;
        }
        self.state.write().handles_opened += 1;
    }

    pub(crate) fn record_handle_closed(&self) {
        if !self.enabled {
            return;
        }
        self.state.write().handles_closed += 1;
    }

    pub(crate) fn record_stale_rejection(&self) {
        if !self.enabled {
            return;
        }
        self.state.write().stale_rejections += 1;
    }

    pub(crate) fn record_lock_acquired(&self) {
        if !self.enabled {
            return;
        }
        let mut state = self.state.write();
        state.locks_acquired += 1;
        state.lock_acquired_at = Some(Instant::now());
    }

    pub(crate) fn record_lock_released(&self) {
        if !self.enabled {
            return;
        }
        let mut state = self.state.write();
        state.locks_released += 1;
        if let Some(acquired_at) = state.lock_acquired_at.take() {
            if state.hold_times.len() == self.history_limit {
                state.hold_times.remove(0);
            }
            state.hold_times.push(acquired_at.elapsed());
        }
    }

    pub(crate) fn record_lock_contention(&self) {
        if !self.enabled {
            return;
        }
        self.state.write().lock_contention += 1;
    }

    pub(crate) fn record_reset(&self) {
        if !self.enabled {
            return;
        }
        self.state.write().resets += 1;
    }

    pub(crate) fn record_service_request(&self) {
        if !self.enabled {
            return;
        }
        self.state.write().service_requests += 1;
    }

    /// Produce a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.state.read();

        let average_hold_time = if state.hold_times.is_empty() {
            Duration::ZERO
        } else {
            state.hold_times.iter().sum::<Duration>() / state.hold_times.len() as u32
        };

        MetricsSnapshot {
            uptime: self.start_time.elapsed(),
            handles: HandleMetrics {
                opened: state.handles_opened,
                closed: state.handles_closed,
                open_now: state.handles_opened.saturating_sub(state.handles_closed),
                stale_rejections: state.stale_rejections,
            },
            lock: LockMetrics {
                acquired: state.locks_acquired,
                released: state.locks_released,
                contention: state.lock_contention,
                average_hold_time,
            },
            device: DeviceMetrics {
                resets: state.resets,
                service_requests: state.service_requests,
            },
        }
    }
}
