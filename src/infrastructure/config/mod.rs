mod app_config;
pub mod loader;
pub mod paths;

pub use app_config::*;

use loader::ConfigSource;
use std::sync::OnceLock;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
static CONFIG_SOURCE: OnceLock<ConfigSource> = OnceLock::new();

/// Initialize configuration system (called at startup, before logging)
pub fn init() -> anyhow::Result<&'static AppConfig> {
    if let Some(config) = APP_CONFIG.get() {
        return Ok(config);
    }

    let (config, source) = loader::load_app_config()?;
    CONFIG_SOURCE.get_or_init(|| source);
    Ok(APP_CONFIG.get_or_init(|| config))
}

/// Report where the configuration came from, once the subscriber exists
pub fn log_source() {
    match CONFIG_SOURCE.get() {
        Some(ConfigSource::File(path)) => tracing::info!("Loaded configuration from {:?}", path),
        Some(ConfigSource::Embedded) => tracing::info!("Using embedded default configuration"),
        None => tracing::warn!("Configuration not initialized"),
    }
}
