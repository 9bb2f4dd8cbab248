use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use super::paths::config_dir;
use super::AppConfig;

// Embed the entire configs directory at compile time
static CONFIGS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/configs");

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GROUPWORKS_CONFIG";

/// Load a YAML configuration file from disk
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

/// Parse YAML from string
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    let config: T = serde_yaml::from_str(content)?;
    Ok(config)
}

/// Load embedded configuration by name from the configs directory
pub fn load_embedded_config<T: DeserializeOwned + Default>(name: &str) -> T {
    let file_name = format!("{}.yaml", name);

    let Some(content) = CONFIGS_DIR
        .get_file(&file_name)
        .and_then(|file| file.contents_utf8())
    else {
        return T::default();
    };

    parse_yaml(content).unwrap_or_default()
}

/// Where a user-supplied config file is looked for, in priority order
fn override_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    let default = config_dir().join("app.yaml");
    default.exists().then_some(default)
}

/// Load the application config: a user file if one is present, otherwise the
/// embedded defaults. Missing fields in a user file fall back to defaults.
///
/// Runs before logging is set up, so the caller reports the source.
pub fn load_app_config() -> anyhow::Result<(AppConfig, ConfigSource)> {
    match override_path() {
        Some(path) => {
            let config = load_yaml::<AppConfig>(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {:?}: {}", path, e))?;
            Ok((config, ConfigSource::File(path)))
        }
        None => Ok((load_embedded_config("app"), ConfigSource::Embedded)),
    }
}

#[derive(Debug, Clone)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::StorageType;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AppConfig = load_embedded_config("app");
        assert_eq!(config.storage.storage_type, StorageType::Sqlite);
        assert_eq!(config.server.port, 8080);
        assert!(config.events.capacity > 0);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: AppConfig = parse_yaml(
            "storage:\n  type: mongodb\n  mongodb:\n    database: social\nserver:\n  port: 9000\n",
        )
        .unwrap();

        assert_eq!(config.storage.storage_type, StorageType::Mongodb);
        assert_eq!(config.storage.mongodb.database, "social");
        assert_eq!(config.storage.mongodb.uri, "mongodb://localhost:27017");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.logging.production);
    }

    #[test]
    fn test_missing_embedded_config_uses_default() {
        let config: AppConfig = load_embedded_config("does-not-exist");
        assert_eq!(config.events.capacity, 256);
    }
}
