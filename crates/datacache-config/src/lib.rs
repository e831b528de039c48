//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, CacheSettings, DataSettings, LoggingConfig};

use config::{Config, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration loading/writing errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Config error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration from file and environment.
///
/// `DATACACHE`-prefixed environment variables override file values.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("DATACACHE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Write a default configuration file to `path`.
pub fn write_default(path: &Path) -> Result<(), SettingsError> {
    let rendered = toml::to_string_pretty(&AppConfig::default())?;
    std::fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.cache.ttl_secs, 10);
        assert_eq!(config.cache.sweep_interval_secs, 3);
        assert_eq!(config.data.folder, "data");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");

        write_default(&path).unwrap();
        let config = load_config(&path).unwrap();

        assert_eq!(config.app.name, "datacache");
        assert_eq!(config.cache.ttl_secs, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[cache]\nttl_secs = 30\nsweep_interval_secs = 5\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.cache.sweep_interval_secs, 5);
        assert_eq!(config.data.folder, "data");
    }
}
