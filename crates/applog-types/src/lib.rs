//! # applog Types
//!
//! Types shared across the applog crates:
//!
//! - The raw configuration record handed to the logger initializer
//! - The `Severity` scale used for minimum-level filtering
//! - The `LogInitError` taxonomy and `Result` alias
//!
//! ## Example
//!
//! ```
//! use applog_types::{LogConfig, Severity};
//!
//! let config = LogConfig::new("/tmp/app.log").with_level("warning");
//! let severity: Severity = config.level.parse().unwrap();
//! assert_eq!(severity, Severity::Warning);
//! assert!("verbose".parse::<Severity>().is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod config;

// Re-export common types for convenience
pub use errors::{LogInitError, Result};
pub use enums::Severity;
pub use config::LogConfig;
