//! Structured logging setup.

use crate::error::{BotError, BotResult};
use guildrank_config::LoggingConfig;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Filter from `RUST_LOG`, else `override_level`, else the configured level.
pub fn build_filter(config: &LoggingConfig, override_level: Option<&str>) -> BotResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = override_level.unwrap_or(&config.level);
    EnvFilter::try_new(level).map_err(|e| BotError::Logging(format!("invalid log level '{level}': {e}")))
}

/// Splits a log file path into the directory and file name prefix the
/// rolling appender expects.
pub fn log_file_parts(path: &Path) -> BotResult<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| BotError::Logging(format!("log file path has no file name: {}", path.display())))?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((dir, PathBuf::from(file_name)))
}

/// Initializes the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// shutdown.
pub fn init_logging(config: &LoggingConfig, override_level: Option<&str>) -> BotResult<Option<WorkerGuard>> {
    let filter = build_filter(config, override_level)?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    layers.push(if config.json_format {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    });

    let guard = match &config.file_path {
        Some(path) => {
            let (dir, file_name) = log_file_parts(path)?;
            std::fs::create_dir_all(&dir)?;
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file_name));
            layers.push(if config.json_format {
                fmt::layer().json().with_writer(writer).boxed()
            } else {
                fmt::layer().with_ansi(false).with_writer(writer).boxed()
            });
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| BotError::Logging(e.to_string()))?;

    Ok(guard)
}
