//! # Logger
//!
//! Centralized logging setup for the faucet. One builder configures console
//! and rolling-file output with non-blocking I/O and environment-based
//! filtering (`RUST_LOG` always wins over the programmatic default).
//!
//! ## Example
//!
//! ```rust
//! # use faucet_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("faucet")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// A builder for configuring and initializing the global tracing subscriber.
#[must_use = "The builder must be configured before it can be used to initialize the logger."]
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl LoggerBuilder {
    /// Sets the logger name, used as the rolling-file prefix.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables or disables console output.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Configures the minimum log level to be emitted.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds an explicit env filter (e.g. `faucet=debug,hyper=info`).
    ///
    /// `RUST_LOG` still overrides this programmatic default. Invalid filters
    /// surface as an error from [`LoggerBuilder::init`].
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables file output under `path` with daily rotation by default.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Configures the log file rotation strategy.
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Configures maximum number of log files to keep.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Switches the file layer to JSON lines.
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// The returned [`Logger`] holds the non-blocking worker guard; keep it
    /// alive for the lifetime of the program so buffered logs are flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber is already
    /// set, and [`LoggerError::InvalidConfiguration`] for bad builder input.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
            });
        }
        if !self.console && self.path.is_none() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
            });
        }

        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = self.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: format!("Failed to create path {}: {e}", path.display()).into(),
            })?;

            let file_appender = RollingFileAppender::builder()
                .rotation(self.rotation)
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.max_files)
                .build(path)?;

            let (non_blocking, g) = tracing_appender::non_blocking(file_appender);

            let file_layer = layer().with_writer(non_blocking).with_ansi(false);
            layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });

            Some(g)
        } else {
            None
        };

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{filter}': {e}").into(),
                })
            },
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background worker guard; drop it only when the application is
/// shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Returns a reference to the underlying worker guard, if present.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn builder_defaults() {
        let builder = Logger::builder().name("test-app").env_filter("faucet=debug");
        assert!(builder.console);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert_eq!(builder.env_filter.as_deref(), Some("faucet=debug"));
        assert!(builder.path.is_none());
    }

    #[test]
    #[serial]
    fn rejects_empty_name_and_zero_files() {
        assert!(matches!(
            Logger::builder().name("  ").init(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Logger::builder().name("app").max_files(0).init(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Logger::builder().name("app").console(false).init(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    #[serial]
    fn file_logging_creates_log_files() {
        let tmp_dir = tempdir().expect("temp dir");
        let log_dir = tmp_dir.path().join("logs");

        let logger = Logger::builder()
            .name("test-app")
            .path(&log_dir)
            .level(LevelFilter::INFO)
            .init()
            .expect("logger init");

        tracing::info!("hello world");
        // Give the background worker a moment to flush.
        std::thread::sleep(Duration::from_millis(20));

        assert!(log_dir.exists(), "log directory should be created by logger init");

        let has_log = std::fs::read_dir(&log_dir)
            .expect("read log dir")
            .flatten()
            .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));
        assert!(has_log, "at least one log file should be created");
        drop(logger);
    }
}
