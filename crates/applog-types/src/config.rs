//! Configuration types and structures.

use serde::{Deserialize, Serialize};

/// Default maximum size of a single log file, in megabytes.
pub const DEFAULT_LOG_FILE_MAX_SIZE: i64 = 500;

/// Default retention of rotated log files, in days.
pub const DEFAULT_LOG_FILE_MAX_AGE: i64 = 30;

/// Default minimum severity.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Raw logger configuration as supplied by the application.
///
/// Numbers are signed and flags are integers on purpose: this is the
/// boundary record, and out-of-range values must survive deserialization so
/// that validation can reject them with a field-specific error. Defaults
/// only fill in omitted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file path
    #[serde(default)]
    pub path: String,
    /// Minimum severity: debug, info, warning, error or fatal
    #[serde(default = "default_level")]
    pub level: String,
    /// Size in megabytes before the file is rotated
    #[serde(default = "default_max_size")]
    pub max_size: i64,
    /// Days to keep rotated files (0 keeps them regardless of age)
    #[serde(default = "default_max_age")]
    pub max_age: i64,
    /// Rotated files to keep (0 keeps all)
    #[serde(default)]
    pub max_backups: i64,
    /// 1 to use local time for rotation timestamps, 0 for UTC
    #[serde(default)]
    pub local_time: i64,
    /// 1 to gzip rotated files, 0 to leave them as is
    #[serde(default = "default_compress")]
    pub compress: i64,
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_max_size() -> i64 {
    DEFAULT_LOG_FILE_MAX_SIZE
}

fn default_max_age() -> i64 {
    DEFAULT_LOG_FILE_MAX_AGE
}

fn default_compress() -> i64 {
    1
}

impl LogConfig {
    /// Configuration with defaults for everything but the path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the minimum severity.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            level: default_level(),
            max_size: default_max_size(),
            max_age: default_max_age(),
            max_backups: 0,
            local_time: 0,
            compress: default_compress(),
        }
    }
}
