//! Logging for the proxy process.
//!
//! Dual output (stdout with colors + file) with thread-safe initialization.

use crate::error::ProxyError;

use std::io::stdout;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "igdb-proxy.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Noisy dependency targets capped below the app level.
const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Initialize the logger with dual output (stdout + file).
///
/// Safe to call more than once; later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns [`ProxyError::Logger`] if the log file cannot be created or the
/// global logger cannot be installed.
pub fn initialize(log_dir: &Path) -> Result<(), ProxyError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
            info!("Log file: {}", log_dir.join(LOG_FILE_NAME).display());
        }
    });

    result
}

fn initialize_internal(log_dir: &Path) -> Result<(), ProxyError> {
    build_dispatch(log_dir)?
        .apply()
        .map_err(|e| ProxyError::logger(format!("Failed to initialize logger: {e}")))
}

/// Build the stdout + file dispatch without installing it.
///
/// # Errors
///
/// Returns [`ProxyError::Logger`] if the log file cannot be opened.
pub fn build_dispatch(log_dir: &Path) -> Result<Dispatch, ProxyError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let base_dispatch = QUIET_TARGETS
        .iter()
        .fold(Dispatch::new().level(LOG_LEVEL), |dispatch, target| {
            dispatch.level_for(*target, LevelFilter::Warn)
        });

    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stdout());

    // Plain text, no colors
    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(
            fern::log_file(&log_file_path)
                .map_err(|e| ProxyError::logger(format!("Failed to create log file: {e}")))?,
        );

    Ok(base_dispatch.chain(stdout_dispatch).chain(file_dispatch))
}
