//! Structured Logger
//!
//! Console output plus a daily-rolling NDJSON file, with the level taken from
//! `RUST_LOG` when set.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rotated files are named `linedrop.log.YYYY-MM-DD`.
const LOG_FILE_PREFIX: &str = "linedrop.log";

/// Initialize the global structured logger.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process. A second call leaves the first subscriber installed.
/// Fails when the log directory cannot be created or opened.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str) -> Result<WorkerGuard, InitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
