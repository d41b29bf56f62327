//! Manager configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ManagerError, Result};
use crate::metrics::DEFAULT_METRICS_HISTORY;

/// Configuration for a [`DeviceManager`].
///
/// [`DeviceManager`]: crate::manager::DeviceManager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Label identifying this manager in log output
    pub label: String,

    /// Metrics and logging behavior
    pub monitoring: MonitoringConfig,
}

/// Monitoring behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Whether to collect activity metrics
    pub enable_metrics: bool,

    /// Minimum level for operation logging
    pub log_level: LogLevel,

    /// Number of recent lock-hold timings retained by the collector
    pub metrics_history: usize,
}

/// Log verbosity, convertible to a `tracing` level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages and above
    Info,
    /// Per-operation detail
    Debug,
    /// Everything
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            label: "video-manager".to_string(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            log_level: LogLevel::Info,
            metrics_history: DEFAULT_METRICS_HISTORY,
        }
    }
}

impl ManagerConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: ManagerConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Check the configuration for values the manager cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.label.is_empty() {
            return Err(ManagerError::Configuration {
                parameter: "label".to_string(),
                message: "label cannot be empty".to_string(),
            });
        }

        if self.monitoring.metrics_history == 0 {
            return Err(ManagerError::Configuration {
                parameter: "metrics_history".to_string(),
                message: "history size must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();
        assert_eq!(config.label, "video-manager");
        assert!(config.monitoring.enable_metrics);
        assert_eq!(config.monitoring.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ManagerConfig::default();
        config.label.clear();
        assert!(config.validate().is_err());

        let mut config = ManagerConfig::default();
        config.monitoring.metrics_history = 0;
        assert!(matches!(
            config.validate(),
            Err(ManagerError::Configuration { parameter, .. }) if parameter == "metrics_history"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&ManagerConfig {
            label: "decoder-pool".to_string(),
            monitoring: MonitoringConfig {
                enable_metrics: false,
                log_level: LogLevel::Debug,
                metrics_history: 16,
            },
        })
        .unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = ManagerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.label, "decoder-pool");
        assert!(!config.monitoring.enable_metrics);
        assert_eq!(config.monitoring.metrics_history, 16);
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = ManagerConfig::from_file("/nonexistent/manager.json");
        assert!(matches!(result, Err(ManagerError::Io(_))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
    }
}
