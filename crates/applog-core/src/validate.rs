//! Field validation for the logger configuration.
//!
//! Each field has its own validator. `LogSettings::from_config` runs them in
//! a fixed order and stops at the first failure.
//!
//! The path validator is not pure: it opens the target create/write/truncate
//! and closes it again, so an existing log file is emptied even when a later
//! field turns out to be invalid.

use applog_types::{bail, LogConfig, LogInitError, Result, Severity};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Validated logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Log file path, known to be writable
    pub path: PathBuf,
    /// Minimum severity for both sinks
    pub severity: Severity,
    /// Rotation threshold in megabytes
    pub max_size_mb: u64,
    /// Rotated file retention in days (0 disables age-based removal)
    pub max_age_days: u64,
    /// Rotated files to keep (0 keeps all)
    pub max_backups: u64,
    /// Use local time rather than UTC for rotation timestamps
    pub local_time: bool,
    /// Gzip rotated files
    pub compress: bool,
}

impl LogSettings {
    /// Validate every field of `config`, in order: path, level, max size,
    /// max age, max backups, local-time flag, compress flag.
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        let path = validate_path(&config.path)?;
        let severity = parse_severity(&config.level)?;
        let max_size_mb = validate_max_size(config.max_size)?;
        let max_age_days = validate_max_age(config.max_age)?;
        let max_backups = validate_max_backups(config.max_backups)?;
        let local_time = parse_flag(config.local_time, LogInitError::UnavailableLocalTimeFlag)?;
        let compress = parse_flag(config.compress, LogInitError::UnavailableCompressFlag)?;

        Ok(Self {
            path,
            severity,
            max_size_mb,
            max_age_days,
            max_backups,
            local_time,
            compress,
        })
    }
}

/// Check that `path` is non-empty and writable.
///
/// Truncates any existing file at `path`.
pub fn validate_path(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        bail!(UnavailableLogFile);
    }

    let path = Path::new(path);
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|_| LogInitError::UnavailableLogFile)?;

    Ok(path.to_path_buf())
}

/// Map a level name to its `Severity`.
pub fn parse_severity(level: &str) -> Result<Severity> {
    level.parse()
}

/// Maximum file size must be non-negative.
pub fn validate_max_size(raw: i64) -> Result<u64> {
    u64::try_from(raw).map_err(|_| LogInitError::UnavailableLogFileMaxSize)
}

/// Maximum age must be non-negative.
pub fn validate_max_age(raw: i64) -> Result<u64> {
    u64::try_from(raw).map_err(|_| LogInitError::UnavailableLogFileMaxAge)
}

/// Maximum backup count must be non-negative.
pub fn validate_max_backups(raw: i64) -> Result<u64> {
    u64::try_from(raw).map_err(|_| LogInitError::UnavailableLogFileMaxBackups)
}

/// Map an integer flag to a bool; only 0 and 1 are accepted.
pub fn parse_flag(raw: i64, err: LogInitError) -> Result<bool> {
    match raw {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(err),
    }
}
