//! Manager activity metrics

mod collector;
mod types;

pub use collector::MetricsCollector;
pub use types::{DeviceMetrics, HandleMetrics, LockMetrics, MetricsSnapshot};

/// Lock-hold timings retained when no configuration is supplied
pub(crate) const DEFAULT_METRICS_HISTORY: usize = 256;
