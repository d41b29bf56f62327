use std::sync::Arc;

use crate::config::ManagerConfig;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::types::ResetToken;

use super::manager::DeviceManager;

/// Builder for constructing a [`DeviceManager`] instance
pub struct ManagerBuilder {
    config: Option<ManagerConfig>,
}

impl ManagerBuilder {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set the manager configuration
    pub fn with_config(mut self, config: ManagerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the manager.
    ///
    /// Returns the manager together with its freshly minted reset token;
    /// the token is the capability proof required by
    /// [`DeviceManager::reset_device`] and is handed out exactly once,
    /// here.
    pub fn build(self) -> Result<(DeviceManager, ResetToken)> {
        // Get configuration or use default
        let config = self.config.unwrap_or_default();

        // Validate configuration
        config.validate()?;

        let config = Arc::new(config);
        let metrics = Arc::new(MetricsCollector::new(
            config.monitoring.enable_metrics,
            config.monitoring.metrics_history,
        ));

        let token = ResetToken::mint();

        Ok((DeviceManager::new(config, metrics, token), token))
    }
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let result = ManagerBuilder::default().build();
        assert!(result.is_ok());

        let (manager, _token) = result.unwrap();
        assert!(!manager.is_initialized());
    }

    #[test]
    fn test_builder_validation() {
        let mut config = ManagerConfig::default();
        config.label.clear();

        let result = ManagerBuilder::new().with_config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builders_mint_distinct_tokens() {
        let (_manager1, token1) = ManagerBuilder::new().build().unwrap();
        let (_manager2, token2) = ManagerBuilder::new().build().unwrap();
        assert_ne!(token1.into_raw(), token2.into_raw());
    }
}
