//! Initialize the logger and emit records.

use anyhow::{Context, Result};
use applog_core::{global, LogConfig, Severity};

pub fn execute(config: &LogConfig, level: &str, messages: &[String]) -> Result<()> {
    let severity: Severity = level
        .parse()
        .with_context(|| format!("record level {:?}", level))?;

    global::init(config)?;
    for message in messages {
        emit(severity, message);
    }
    // Flush and close both sinks before exit.
    global::reset();

    Ok(())
}

fn emit(severity: Severity, message: &str) {
    match severity {
        Severity::Debug => applog_core::debug!(source = "cli", "{}", message),
        Severity::Info => applog_core::info!(source = "cli", "{}", message),
        Severity::Warning => applog_core::warn!(source = "cli", "{}", message),
        Severity::Error => applog_core::error!(source = "cli", "{}", message),
        Severity::Fatal => applog_core::fatal!(source = "cli", "{}", message),
    }
}
