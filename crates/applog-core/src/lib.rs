//! # applog Core
//!
//! Sets up the process logger: validates a [`LogConfig`], builds a rotating
//! JSON log file and a human-readable console sink, and hands back a
//! [`Logger`].
//!
//! This crate provides:
//!
//! - **Configuration**: layered loading of the configuration record (defaults, YAML, env)
//! - **Validation**: one validator per field, applied in a fixed order
//! - **Sinks**: size-rotated, optionally compressed log file plus standard error
//! - **Logger**: the composed handle, usable directly or published process-wide
//!
//! ## Example
//!
//! ```no_run
//! use applog_core::{config::load_config, global};
//!
//! let config = load_config(None)?;
//! global::init(&config)?;
//!
//! applog_core::info!(port = 8080, "listening");
//! # Ok::<(), applog_core::LogInitError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod global;
pub mod logger;
pub mod sink;
pub mod util;
pub mod validate;

// Re-export commonly used items
pub use applog_types::{LogConfig, LogInitError, Result, Severity};
pub use config::{load_config, ConfigLoader};
pub use logger::{init_logging, init_logging_with_console, Logger};
pub use validate::LogSettings;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
