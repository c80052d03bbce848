//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber: an `EnvFilter` built from the configured
//! trace level feeding a fmt layer that writes plain-text events to a rotating
//! log file inside the plugin's data directory.

use super::file_writer::MakeFileWriter;
use crate::infrastructure::paths;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based output.
///
/// The level comes from `config.trace_level`, defaulting to `info`. Events go
/// to `zalculator.log` in the plugin data directory. Initialization failures
/// are swallowed: observability is optional and must never prevent the plugin
/// from loading. Safe to call more than once; only the first call takes
/// effect.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = MakeFileWriter::new(paths::log_file());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer);

    let _ = subscriber.try_init();
}
