//! Logging infrastructure with file output support for production.

use crate::infrastructure::config::{paths, LoggingConfig};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console filter: `RUST_LOG` if set, otherwise a mode-dependent default
fn console_filter(is_production: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("groupworks=debug,tower_http=debug,info")
        }
    })
}

/// Initialize logging with console and optional file output.
///
/// In production mode, logs are also written to `<config dir>/groupworks/logs/`
/// with daily rotation.
pub fn setup(config: &LoggingConfig) {
    let is_production = config.production;

    // Console layer (always enabled)
    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(console_filter(is_production));

    let file_layer = if is_production {
        let log_dir = paths::log_dir();

        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
            None
        } else {
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, &log_dir, "groupworks.log");

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_filter(EnvFilter::new("info")),
            )
        }
    } else {
        None
    };

    // `Option<Layer>` is itself a layer, so both cases share one registry
    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if is_production {
        tracing::info!("File logging enabled: {:?}", paths::log_dir());
    }
    tracing::info!("Logging initialized (production={})", is_production);
}
