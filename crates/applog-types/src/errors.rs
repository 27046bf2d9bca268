//! Error types for logger initialization.

use thiserror::Error;

/// The error type for applog operations.
///
/// The first seven variants are the per-field validation failures of the
/// initializer, one per configuration field. They carry no payload: the
/// caller already has the configuration record that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogInitError {
    /// Path is empty or cannot be created/written
    #[error("unavailable log file path")]
    UnavailableLogFile,

    /// Level is not one of debug, info, warning, error, fatal
    #[error("unavailable log level")]
    UnavailableLogLevel,

    /// Negative maximum file size
    #[error("unavailable log file max size")]
    UnavailableLogFileMaxSize,

    /// Negative maximum retention age
    #[error("unavailable log file max age")]
    UnavailableLogFileMaxAge,

    /// Negative maximum backup count
    #[error("unavailable log file max backups")]
    UnavailableLogFileMaxBackups,

    /// Local-time flag other than 0 or 1
    #[error("unavailable local time flag")]
    UnavailableLocalTimeFlag,

    /// Compress flag other than 0 or 1
    #[error("unavailable compress flag")]
    UnavailableCompressFlag,

    /// The process-wide logger was used before a successful initialization
    #[error("logger used before successful initialization")]
    Uninitialized,

    /// The rotating file writer could not be built
    #[error("Sink error: {0}")]
    Sink(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized Result type for applog operations.
pub type Result<T> = std::result::Result<T, LogInitError>;

/// Return early with a `LogInitError`.
///
/// # Example
///
/// ```ignore
/// if raw < 0 {
///     bail!(UnavailableLogFileMaxAge);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident) => {
        return Err($crate::LogInitError::$variant)
    };
    ($variant:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {
        return Err($crate::LogInitError::$variant(format!($fmt $(, $arg)*)))
    };
}
