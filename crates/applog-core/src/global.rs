//! Process-wide logger handle.
//!
//! Prefer passing a [`Logger`] to the components that need it. The global
//! slot exists for code that cannot be handed one, and backs the crate's
//! `debug!`..`fatal!` macros.
//!
//! Installing a new logger while other threads are emitting is not safe in
//! the sense that records emitted during the swap may go to either logger,
//! or nowhere. Initialize once at startup.

use crate::logger::{init_logging, Logger};
use applog_types::{LogConfig, LogInitError, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static GLOBAL: Lazy<RwLock<Option<Arc<Logger>>>> = Lazy::new(|| RwLock::new(None));

/// Initialize a logger from `config` and publish it.
///
/// Any previously published logger is released first, so its file is
/// flushed and closed before the new one is opened (unless another clone of
/// its `Arc` is still alive). On failure the slot is left empty.
pub fn init(config: &LogConfig) -> Result<Arc<Logger>> {
    reset();
    let logger = init_logging(config)?;
    Ok(install(logger))
}

/// Publish `logger`, replacing the current one.
pub fn install(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    let previous = GLOBAL.write().replace(Arc::clone(&logger));
    drop(previous);
    logger
}

/// The published logger.
pub fn logger() -> Result<Arc<Logger>> {
    current().ok_or(LogInitError::Uninitialized)
}

/// The published logger, if any.
pub fn current() -> Option<Arc<Logger>> {
    GLOBAL.read().clone()
}

/// Whether a logger has been published.
pub fn is_initialized() -> bool {
    GLOBAL.read().is_some()
}

/// Release the published logger.
pub fn reset() {
    let previous = GLOBAL.write().take();
    drop(previous);
}

/// Run `f` with the published logger as the current dispatcher. Does
/// nothing when no logger is published.
#[doc(hidden)]
pub fn with_logger(f: impl FnOnce()) {
    if let Some(logger) = current() {
        logger.in_scope(f);
    }
}

/// Emit a debug record through the process-wide logger.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::global::with_logger(|| $crate::__private::tracing::debug!($($arg)+))
    };
}

/// Emit an info record through the process-wide logger.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::global::with_logger(|| $crate::__private::tracing::info!($($arg)+))
    };
}

/// Emit a warning record through the process-wide logger.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::global::with_logger(|| $crate::__private::tracing::warn!($($arg)+))
    };
}

/// Emit an error record through the process-wide logger.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::global::with_logger(|| $crate::__private::tracing::error!($($arg)+))
    };
}

/// Emit a fatal record through the process-wide logger.
///
/// Recorded at `ERROR` with the [`FATAL_TARGET`](crate::logger::FATAL_TARGET)
/// target, which ranks it above plain errors.
///
/// Unlike a terminating fatal, this does not exit: the process keeps running.
/// A caller that wants to stop should call [`reset`](crate::global::reset)
/// first, so both sinks are flushed, and then exit.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::global::with_logger(|| {
            $crate::__private::tracing::error!(target: $crate::logger::FATAL_TARGET, $($arg)+)
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::init_logging_with_console;
    use crate::logger::test_support::{file_lines, Capture};
    use parking_lot::Mutex;
    use std::fs;
    use tempfile::TempDir;
    use tracing_subscriber::fmt::writer::BoxMakeWriter;

    // The slot is process-wide; tests touching it run one at a time.
    static SERIAL: Mutex<()> = parking_lot::const_mutex(());

    fn config_in(dir: &TempDir, name: &str, level: &str) -> LogConfig {
        LogConfig {
            path: dir.path().join(name).to_string_lossy().into_owned(),
            level: level.to_string(),
            max_size: 10,
            max_age: 7,
            max_backups: 3,
            local_time: 1,
            compress: 1,
        }
    }

    fn install_captured(config: &LogConfig) -> Capture {
        let capture = Capture::default();
        let logger =
            init_logging_with_console(config, BoxMakeWriter::new(capture.clone())).unwrap();
        install(logger);
        capture
    }

    #[test]
    fn test_uninitialized() {
        let _serial = SERIAL.lock();
        reset();

        assert!(!is_initialized());
        assert_eq!(logger().unwrap_err(), LogInitError::Uninitialized);

        // no-op rather than a panic
        crate::info!("nobody listening");
    }

    #[test]
    fn test_macros_use_published_logger() {
        let _serial = SERIAL.lock();
        let dir = TempDir::new().unwrap();
        let console = install_captured(&config_in(&dir, "app.log", "info"));

        assert!(is_initialized());
        crate::debug!("hidden");
        crate::info!(request_id = 7, "handled request");
        crate::warn!("slow");
        crate::error!("failed");
        crate::fatal!("giving up");
        reset();

        let lines = file_lines(dir.path(), "app.log");
        assert_eq!(lines.len(), 4);
        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["message"], "handled request");
        assert_eq!(first["request_id"], 7);
        assert!(first["filename"].as_str().unwrap().ends_with("global.rs"));
        let last: serde_json::Value = serde_json::from_str(&lines[3]).unwrap();
        assert_eq!(last["level"], "ERROR");
        assert_eq!(last["target"], crate::logger::FATAL_TARGET);

        assert_eq!(console.lines().len(), 4);
    }

    #[test]
    fn test_fatal_does_not_exit() {
        let _serial = SERIAL.lock();
        let dir = TempDir::new().unwrap();
        let console = install_captured(&config_in(&dir, "app.log", "fatal"));

        crate::fatal!("giving up");
        // still here
        crate::error!("below the fatal threshold");
        crate::fatal!(attempt = 2, "giving up again");
        reset();

        let lines = file_lines(dir.path(), "app.log");
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["message"], "giving up again");
        assert_eq!(second["attempt"], 2);
        assert_eq!(console.lines().len(), 2);
    }

    #[test]
    fn test_reinstall_flushes_previous_logger() {
        let _serial = SERIAL.lock();
        let dir = TempDir::new().unwrap();

        let first_console = install_captured(&config_in(&dir, "first.log", "info"));
        crate::info!("to the first");

        let second_console = install_captured(&config_in(&dir, "second.log", "debug"));
        // The first logger is gone, so its file is complete.
        assert_eq!(file_lines(dir.path(), "first.log").len(), 1);

        crate::debug!("to the second");
        reset();

        assert_eq!(file_lines(dir.path(), "first.log").len(), 1);
        assert_eq!(file_lines(dir.path(), "second.log").len(), 1);
        assert_eq!(first_console.lines().len(), 1);
        assert_eq!(second_console.lines().len(), 1);
    }

    #[test]
    fn test_failed_init_leaves_slot_empty() {
        let _serial = SERIAL.lock();
        let dir = TempDir::new().unwrap();
        install_captured(&config_in(&dir, "app.log", "info"));
        assert!(is_initialized());

        let bad = config_in(&dir, "app.log", "chatty");
        assert_eq!(init(&bad).unwrap_err(), LogInitError::UnavailableLogLevel);
        assert!(!is_initialized());
        assert_eq!(logger().unwrap_err(), LogInitError::Uninitialized);
    }

    #[test]
    fn test_init_publishes() {
        let _serial = SERIAL.lock();
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "app.log", "warning");

        let published = init(&config).unwrap();
        assert!(Arc::ptr_eq(&published, &logger().unwrap()));
        assert_eq!(published.settings().path, dir.path().join("app.log"));
        drop(published);
        reset();

        assert!(fs::metadata(dir.path().join("app.log")).is_ok());
    }
}
