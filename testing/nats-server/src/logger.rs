//! Opt-in logging for test binaries.
//!
//! The library only logs through the `log` facade. Call [`initialize`] from a
//! test (or a shared test helper) to see that output on stdout, and optionally
//! in a log file.

use crate::error::LoggerError;

use common::ErrorLocation;

use std::io::stdout;
use std::panic::Location;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Serializes installation attempts.
static INIT_LOGGER_LOCK: Mutex<()> = Mutex::new(());

/// Set only once a logger has actually been installed.
static LOGGER_INSTALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "nats-server-tests.log";

/// Install a stdout logger, plus a plain-text file in `log_dir` when given.
///
/// Once a logger is installed, later calls log a warning and return `Ok`, so
/// every test may call this unconditionally. A failed call installs nothing
/// and leaves the next call free to try again.
///
/// # Errors
///
/// Returns [`LoggerError::Logger`] if the log file cannot be created or
/// another global logger is already installed.
pub fn initialize(level: LevelFilter, log_dir: Option<&Path>) -> Result<(), LoggerError> {
    let _guard = INIT_LOGGER_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if LOGGER_INSTALLED.load(Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    initialize_internal(level, log_dir)?;
    LOGGER_INSTALLED.store(true, Ordering::SeqCst);
    info!("Logger initialized with level: {level:?}");

    Ok(())
}

#[track_caller]
fn initialize_internal(level: LevelFilter, log_dir: Option<&Path>) -> Result<(), LoggerError> {
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                target = record.target(),
            ))
        })
        .chain(stdout());

    let mut base_dispatch = Dispatch::new().level(level).chain(stdout_dispatch);

    if let Some(log_dir) = log_dir {
        let log_file_path = log_dir.join(LOG_FILE_NAME);
        let log_file = fern::log_file(&log_file_path).map_err(|e| LoggerError::Logger {
            message: format!(
                "Failed to create log file {}: {e}",
                log_file_path.display()
            ),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let file_dispatch = Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{target}]",
                    date = format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                    target = record.target(),
                ))
            })
            .chain(log_file);

        base_dispatch = base_dispatch.chain(file_dispatch);
    }

    base_dispatch.apply().map_err(|e| LoggerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
