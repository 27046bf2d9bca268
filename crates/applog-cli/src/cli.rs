//! CLI structure and command definitions.

use anyhow::{Context, Result};
use applog_core::{ConfigLoader, LogConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "applog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate logging configuration and exercise the logger", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging configuration file (YAML)
    #[arg(short, long, global = true, env = "APPLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path, overriding file and environment
    #[arg(long, global = true)]
    pub path: Option<String>,

    /// Minimum severity, overriding file and environment
    #[arg(long = "level-min", global = true)]
    pub level_min: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration and print the effective settings.
    /// The log file is created (and truncated) as part of the check.
    Check,

    /// Initialize the logger and emit each message
    Emit {
        /// Severity of the emitted records
        #[arg(short, long, default_value = "info")]
        level: String,

        /// Messages to emit, one record each
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Show version information
    Version {
        /// Include build details
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Cli {
    /// Execute the selected command.
    pub fn execute(&self) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Commands::Check => check::execute(&self.log_config()?),
            Commands::Emit { level, messages } => {
                emit::execute(&self.log_config()?, level, messages)
            }
            Commands::Version { verbose } => version::execute(*verbose),
        }
    }

    /// Defaults, then the config file, then `APPLOG_*`, then flags.
    pub fn log_config(&self) -> Result<LogConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(file) = &self.config {
            loader = loader
                .with_file(file)
                .with_context(|| format!("loading {}", file.display()))?;
        }
        let config = loader.with_env()?.load()?;
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: LogConfig) -> LogConfig {
        if let Some(path) = &self.path {
            config.path = path.clone();
        }
        if let Some(level) = &self.level_min {
            config.level = level.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emit() {
        let cli = Cli::try_parse_from([
            "applog", "emit", "--level", "warning", "--path", "/tmp/x.log", "disk", "full",
        ])
        .unwrap();
        match &cli.command {
            Commands::Emit { level, messages } => {
                assert_eq!(level, "warning");
                assert_eq!(messages, &vec!["disk".to_string(), "full".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.path.as_deref(), Some("/tmp/x.log"));
    }

    #[test]
    fn test_emit_requires_message() {
        assert!(Cli::try_parse_from(["applog", "emit"]).is_err());
    }

    #[test]
    fn test_flags_override_loaded_values() {
        let cli = Cli::try_parse_from([
            "applog", "check", "--path", "/tmp/flag.log", "--level-min", "error",
        ])
        .unwrap();
        let config = cli.apply_overrides(LogConfig::new("/tmp/file.log"));
        assert_eq!(config.path, "/tmp/flag.log");
        assert_eq!(config.level, "error");
        assert_eq!(config.max_size, 500);
    }
}
