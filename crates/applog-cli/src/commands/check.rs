//! Validate a logging configuration.

use anyhow::Result;
use applog_core::{LogConfig, LogSettings};
use colored::Colorize;

pub fn execute(config: &LogConfig) -> Result<()> {
    let settings = LogSettings::from_config(config)?;

    println!("{} configuration is valid", "ok:".green().bold());
    for (key, value) in describe(&settings) {
        println!("  {:<12} {}", key, value);
    }

    Ok(())
}

/// Effective settings as printable key/value pairs.
pub fn describe(settings: &LogSettings) -> Vec<(&'static str, String)> {
    let size = match settings.max_size_mb {
        0 => format!("{} MB (default)", applog_core::sink::DEFAULT_ROTATION_SIZE_MB),
        n => format!("{} MB", n),
    };
    let age = match settings.max_age_days {
        0 => "unlimited".to_string(),
        n => format!("{} days", n),
    };
    let backups = match settings.max_backups {
        0 => "all".to_string(),
        n => n.to_string(),
    };

    vec![
        ("path", settings.path.display().to_string()),
        ("level", settings.severity.to_string()),
        ("max size", size),
        ("max age", age),
        ("max backups", backups),
        ("time", if settings.local_time { "local" } else { "utc" }.to_string()),
        ("compress", settings.compress.to_string()),
    ]
}
