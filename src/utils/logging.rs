//! Structured logging setup.
//!
//! The codec itself only emits `tracing` events. Applications that want them
//! printed call [`init_logging`] once at startup:
//!
//! ```rust,no_run
//! use record_wire::config::LoggingConfig;
//! use record_wire::utils::logging::init_logging;
//!
//! init_logging(&LoggingConfig::default()).expect("logging");
//! ```
//!
//! `RUST_LOG`, when set, overrides the configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;
use crate::error::{constants, CodecError, Result};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install a global subscriber for `config`.
///
/// # Errors
/// Returns `CodecError::ConfigError` if the configuration is invalid, the log
/// file cannot be opened, or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(CodecError::ConfigError(errors.join("; ")));
    }

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy();

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.log_to_console {
        layers.push(format_layer(std::io::stderr, true, config.json_format));
    }

    if config.log_to_file {
        let path = config.log_file_path.as_deref().ok_or_else(|| {
            CodecError::ConfigError(constants::ERR_LOG_FILE_PATH_MISSING.to_string())
        })?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| CodecError::ConfigError(format!("Failed to open log file: {e}")))?;
        layers.push(format_layer(Mutex::new(file), false, config.json_format));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| CodecError::ConfigError(format!("Failed to install subscriber: {e}")))?;

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}

fn format_layer<W>(writer: W, ansi: bool, json: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer()
            .json()
            .with_ansi(ansi)
            .with_target(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(ansi)
            .with_target(true)
            .with_writer(writer)
            .boxed()
    }
}
