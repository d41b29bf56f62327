//! Process-wide logging setup and structured log events

use std::fmt;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::Subscriber;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level
    pub level: Level,
    /// Whether to include timestamps
    pub timestamps: bool,
    /// Whether to include source code locations
    pub source_location: bool,
    /// Whether to log span close events
    pub log_spans: bool,
    /// Output file path (None for stdout)
    pub file_path: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            timestamps: true,
            source_location: true,
            log_spans: false,
            file_path: None,
        }
    }
}

/// Initialize the process-wide tracing subscriber.
///
/// Safe to call more than once; only the first call takes effect.
pub fn setup_logging(config: LogConfig) -> Result<(), String> {
    let mut result = Ok(());

    INIT.call_once(|| {
        result = setup_logging_internal(config);
    });

    result
}

fn setup_logging_internal(config: LogConfig) -> Result<(), String> {
    let filter = EnvFilter::from_default_env().add_directive(config.level.into());

    let builder = Subscriber::builder()
        .with_env_filter(filter)
        .with_thread_ids(true)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(if config.log_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    match (config.file_path, config.timestamps) {
        (Some(path), timestamps) => {
            use std::fs::OpenOptions;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| format!("Failed to open log file: {}", e))?;
            let writer = std::sync::Mutex::new(file);

            if timestamps {
                builder
                    .with_writer(writer)
                    .try_init()
                    .map_err(|e| format!("Failed to set global subscriber: {}", e))
            } else {
                builder
                    .without_time()
                    .with_writer(writer)
                    .try_init()
                    .map_err(|e| format!("Failed to set global subscriber: {}", e))
            }
        }
        (None, true) => builder
            .try_init()
            .map_err(|e| format!("Failed to set global subscriber: {}", e)),
        (None, false) => builder
            .without_time()
            .try_init()
            .map_err(|e| format!("Failed to set global subscriber: {}", e)),
    }
}

/// Structured log event built field by field
#[derive(Debug)]
pub struct LogEvent {
    level: Level,
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl LogEvent {
    /// Start a new event at the given level
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Attach a key/value field
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Emit the event through the global subscriber
    pub fn emit(self) {
        let fields = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ");

        match self.level {
            Level::ERROR => tracing::error!(fields = %fields, "{}", self.message),
            Level::WARN => tracing::warn!(fields = %fields, "{}", self.message),
            Level::INFO => tracing::info!(fields = %fields, "{}", self.message),
            Level::DEBUG => tracing::debug!(fields = %fields, "{}", self.message),
            Level::TRACE => tracing::trace!(fields = %fields, "{}", self.message),
        }
    }
}

/// Log a structured error message
pub fn error(message: impl Into<String>) -> LogEvent {
    LogEvent::new(Level::ERROR, message)
}

/// Log a structured warning message
pub fn warn(message: impl Into<String>) -> LogEvent {
    LogEvent::new(Level::WARN, message)
}

/// Log a structured info message
pub fn info(message: impl Into<String>) -> LogEvent {
    LogEvent::new(Level::INFO, message)
}

/// Log a structured debug message
pub fn debug(message: impl Into<String>) -> LogEvent {
    LogEvent::new(Level::DEBUG, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_initialization() {
        let config = LogConfig::default();
        assert!(setup_logging(config).is_ok());

        // Second call is a no-op rather than an error.
        assert!(setup_logging(LogConfig::default()).is_ok());
    }

    #[test]
    fn test_structured_event_builder() {
        let event = info("locking device")
            .field("handle", "0x1")
            .field("generation", 3);
        assert_eq!(event.fields.len(), 2);
        assert_eq!(event.fields[1], ("generation", "3".to_string()));
        event.emit();
    }
}
