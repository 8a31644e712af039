//! Console and optional file logging

use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::HomeworkBotError;

/// Keeps the log file writer flushing; hold it for the life of the process
#[must_use]
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

/// Install the global subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: Level, log_file: Option<&Path>) -> crate::Result<LogGuard> {
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy()
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(filter()))
        .with(file_layer)
        .try_init()
        .map_err(|e| HomeworkBotError::Config(format!("Failed to install logger: {}", e)))?;

    Ok(LogGuard(guard))
}

fn open_log_file(path: &Path) -> crate::Result<RollingFileAppender> {
    let file_name = path.file_name().ok_or_else(|| {
        HomeworkBotError::Config(format!("Log file path {:?} has no file name", path))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| HomeworkBotError::Config(format!("Failed to open log file {:?}: {}", path, e)))
}
