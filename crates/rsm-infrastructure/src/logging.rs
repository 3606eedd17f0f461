//! Structured logging with tracing
//!
//! Configures a `tracing-subscriber` registry with an `EnvFilter`, plain or
//! JSON output on stdout and an optional daily-rolling log file.

use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_FILTER_ENV};
use crate::error_ext::ErrorContext;
use rsm_domain::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;

pub use crate::config::LoggingConfig;
use tracing::{Level, info, warn};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

type OutputLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Initialize the global subscriber with the provided configuration
///
/// `RSM_LOG` overrides the configured level. Fails if a global subscriber is
/// already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut outputs = vec![output_layer(std::io::stdout, config.json_format, true)];
    if let Some(path) = &config.file_output {
        outputs.push(output_layer(daily_appender(path), config.json_format, false));
    }

    Registry::default()
        .with(filter)
        .with(outputs)
        .try_init()
        .context("Failed to install global subscriber")?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Formatting layer over `writer`; the console one also records call sites
fn output_layer<W>(writer: W, json: bool, console: bool) -> OutputLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(console)
        .with_target(true)
        .with_thread_ids(console)
        .with_file(console)
        .with_line_number(console);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Appender rolling `path` daily, next to it
fn daily_appender(path: &Path) -> RollingFileAppender {
    tracing_appender::rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_stem()
            .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM)),
    )
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
