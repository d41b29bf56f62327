//! Utility helpers for logging setup and structured log output

pub mod logging;

pub use logging::{setup_logging, LogConfig};

/// Structured logging helpers most demos want in scope
pub mod prelude {
    pub use super::logging::{debug, error, info, setup_logging, warn, LogConfig};
}
