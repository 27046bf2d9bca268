//! Loading the logger configuration record.
//!
//! Values are resolved from layers, lowest priority first:
//! 1. Default values
//! 2. Values loaded from a YAML file
//! 3. Values set programmatically
//! 4. Environment variables (`APPLOG_*`)
//!
//! Loading never validates. A loaded [`LogConfig`] can still be rejected by
//! the initializer.
//!
//! ## Example
//!
//! ```no_run
//! use applog_core::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .with_optional_file("/etc/myapp/logging.yml")?
//!     .with_env()?
//!     .load()?;
//! # Ok::<(), applog_core::LogInitError>(())
//! ```

use crate::util::{deep_merge, load_yaml_file};
use applog_types::{bail, LogConfig, LogInitError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Prefix of the environment variables read by [`ConfigLoader::with_env`].
pub const ENV_PREFIX: &str = "APPLOG_";

const STRING_FIELDS: [&str; 2] = ["path", "level"];
const INTEGER_FIELDS: [&str; 5] = ["max_size", "max_age", "max_backups", "local_time", "compress"];

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    const ASCENDING: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Set,
        ConfigLayer::Environment,
    ];
}

/// Layered builder for [`LogConfig`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    layers: HashMap<ConfigLayer, Value>,
}

impl ConfigLoader {
    /// Loader holding only the default layer.
    pub fn new() -> Self {
        let mut layers = HashMap::new();
        // LogConfig serializes to a plain object; fall back to an empty one.
        let defaults = serde_json::to_value(LogConfig::default())
            .unwrap_or_else(|_| Value::Object(Map::new()));
        layers.insert(ConfigLayer::Default, defaults);
        Self { layers }
    }

    /// Merge a YAML file into the loaded layer. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let value = load_yaml_file(path)?;
        // An empty document parses as null.
        let value = match value {
            Value::Null => Value::Object(Map::new()),
            Value::Object(_) => value,
            _ => bail!(Config, "logging configuration must be a mapping"),
        };
        self.merge(ConfigLayer::Loaded, value);
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Merge `APPLOG_*` variables from the process environment.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(std::env::vars())
    }

    /// Merge `APPLOG_*` variables from `vars`. Other variables are ignored.
    pub fn with_env_from<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = Map::new();
        for (key, raw) in vars {
            let Some(field) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let field = field.to_ascii_lowercase();
            let raw = raw.as_ref();

            if STRING_FIELDS.contains(&field.as_str()) {
                overrides.insert(field, Value::String(raw.to_string()));
            } else if INTEGER_FIELDS.contains(&field.as_str()) {
                let number: i64 = raw.trim().parse().map_err(|_| {
                    LogInitError::Config(format!(
                        "{}{} must be an integer, got {:?}",
                        ENV_PREFIX,
                        field.to_ascii_uppercase(),
                        raw
                    ))
                })?;
                overrides.insert(field, Value::from(number));
            }
        }
        self.merge(ConfigLayer::Environment, Value::Object(overrides));
        Ok(self)
    }

    /// Set one field programmatically.
    pub fn set(mut self, key: &str, value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| LogInitError::Config(format!("Failed to serialize value: {}", e)))?;
        let mut object = Map::new();
        object.insert(key.to_string(), value);
        self.merge(ConfigLayer::Set, Value::Object(object));
        Ok(self)
    }

    /// Resolve all layers into a configuration record.
    pub fn load(&self) -> Result<LogConfig> {
        serde_json::from_value(self.merged_data())
            .map_err(|e| LogInitError::Config(format!("Failed to parse logging config: {}", e)))
    }

    fn merge(&mut self, layer: ConfigLayer, value: Value) {
        let current = self
            .layers
            .remove(&layer)
            .unwrap_or_else(|| Value::Object(Map::new()));
        self.layers.insert(layer, deep_merge(current, value));
    }

    fn merged_data(&self) -> Value {
        ConfigLayer::ASCENDING
            .iter()
            .filter_map(|layer| self.layers.get(layer))
            .fold(Value::Object(Map::new()), |merged, data| {
                deep_merge(merged, data.clone())
            })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Defaults, then `file` (if given, it must exist), then the environment.
pub fn load_config(file: Option<&Path>) -> Result<LogConfig> {
    let loader = ConfigLoader::new();
    let loader = match file {
        Some(path) => loader.with_file(path)?,
        None => loader,
    };
    loader.with_env()?.load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_yaml(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("logging.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_only() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.path, "");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_yaml(&dir, "path: /var/log/app.log\nlevel: error\nmax_backups: 4\n");

        let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();
        assert_eq!(config.path, "/var/log/app.log");
        assert_eq!(config.level, "error");
        assert_eq!(config.max_backups, 4);
        assert_eq!(config.max_size, 500);
        assert_eq!(config.compress, 1);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_yaml(&dir, "path: /var/log/app.log\nlevel: error\n");

        let config = ConfigLoader::new()
            .with_file(&path)
            .unwrap()
            .with_env_from([
                ("APPLOG_LEVEL", "debug"),
                ("APPLOG_MAX_AGE", "-3"),
                ("HOME", "/root"),
            ])
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.path, "/var/log/app.log");
        assert_eq!(config.level, "debug");
        // Out-of-range values pass through to validation.
        assert_eq!(config.max_age, -3);
    }

    #[test]
    fn test_env_beats_set() {
        let config = ConfigLoader::new()
            .with_env_from([("APPLOG_PATH", "/from/env.log")])
            .unwrap()
            .set("path", "/from/code.log")
            .unwrap()
            .set("local_time", 1)
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.path, "/from/env.log");
        assert_eq!(config.local_time, 1);
    }

    #[test]
    fn test_non_integer_env_value() {
        let err = ConfigLoader::new()
            .with_env_from([("APPLOG_MAX_SIZE", "big")])
            .unwrap_err();
        assert!(matches!(err, LogInitError::Config(msg) if msg.contains("APPLOG_MAX_SIZE")));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yml");

        assert!(matches!(
            ConfigLoader::new().with_file(&missing),
            Err(LogInitError::Config(_))
        ));
        assert!(ConfigLoader::new().with_optional_file(&missing).is_ok());
    }

    #[test]
    fn test_non_mapping_file() {
        let dir = TempDir::new().unwrap();
        let path = write_yaml(&dir, "- just\n- a list\n");
        assert!(matches!(
            ConfigLoader::new().with_file(&path),
            Err(LogInitError::Config(_))
        ));
    }

    #[test]
    fn test_wrong_type_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write_yaml(&dir, "max_size: lots\n");
        let loader = ConfigLoader::new().with_file(&path).unwrap();
        assert!(matches!(loader.load(), Err(LogInitError::Config(_))));
    }
}
