//! Error types returned by device-manager operations

use thiserror::Error;

use crate::types::DeviceHandle;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ManagerError>;

/// Errors reported by the device manager and its services.
///
/// Every failing operation leaves shared state untouched; callers can
/// always retry or recover without tearing the manager down.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// No device has ever been bound via a reset.
    #[error("device manager is not initialized")]
    NotInitialized,

    /// The handle is unknown, already closed, or null.
    #[error("invalid device handle {handle}")]
    InvalidHandle {
        /// The rejected handle value
        handle: DeviceHandle,
    },

    /// A supplied argument was rejected (bad reset token, unlock by a
    /// handle that does not hold the lock).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// The handle predates the latest device reset. The caller recovers
    /// by opening a fresh handle and re-deriving any device state.
    #[error("device was replaced after handle {handle} was opened")]
    NewVideoDevice {
        /// The stale handle
        handle: DeviceHandle,
    },

    /// Another handle currently holds the device lock. The caller
    /// recovers by retrying later; the manager never queues waiters.
    #[error("device is locked by another handle")]
    VideoDeviceLocked,

    /// A configuration value failed validation.
    #[error("configuration error for {parameter}: {message}")]
    Configuration {
        /// The offending parameter name
        parameter: String,
        /// What was wrong with it
        message: String,
    },

    /// A configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ManagerError {
    /// Whether the condition clears on its own once the caller reacts:
    /// stale handles are replaced by reopening, lock contention by
    /// retrying. Everything else indicates a caller or setup problem.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ManagerError::NewVideoDevice { .. } | ManagerError::VideoDeviceLocked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ManagerError::InvalidHandle {
            handle: DeviceHandle::from_raw(0x2a),
        };
        assert_eq!(error.to_string(), "invalid device handle 0x2a");

        let error = ManagerError::NotInitialized;
        assert_eq!(error.to_string(), "device manager is not initialized");
    }

    #[test]
    fn test_error_recovery_classification() {
        assert!(ManagerError::VideoDeviceLocked.is_recoverable());
        assert!(ManagerError::NewVideoDevice {
            handle: DeviceHandle::from_raw(1)
        }
        .is_recoverable());

        assert!(!ManagerError::NotInitialized.is_recoverable());
        assert!(!ManagerError::InvalidHandle {
            handle: DeviceHandle::NULL
        }
        .is_recoverable());
        assert!(!ManagerError::InvalidArgument {
            message: "bad token".to_string(),
        }
        .is_recoverable());
    }
}
