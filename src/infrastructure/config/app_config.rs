use super::paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend: "sqlite" (default) or "mongodb"
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    pub sqlite: SqliteConfig,
    /// MongoDB connection settings (only used when storage_type is mongodb)
    pub mongodb: MongoDbConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Sqlite,
    Mongodb,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SqliteConfig {
    /// Leave empty to use platform default path, ":memory:" for a throwaway database
    pub path: String,
}

impl SqliteConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    pub fn effective_path(&self) -> PathBuf {
        if self.path.is_empty() {
            paths::default_sqlite_path()
        } else {
            PathBuf::from(&self.path)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoDbConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "groupworks".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Production mode: `info` level plus a daily rotating log file
    pub production: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast buffer per subscriber before it starts lagging
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}
