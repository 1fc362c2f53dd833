use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const APP_DIR_NAME: &str = "snakify";
const LOG_FILE_NAME: &str = "snakify.log";

/// Returns the platform-correct log directory.
#[must_use]
pub fn default_log_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push("logs");
    base
}

/// Routes `tracing` output to a file in `log_dir`.
///
/// The terminal belongs to the game, so nothing is written to stdout or
/// stderr. Verbosity follows `RUST_LOG` and defaults to `info`. Keep the
/// returned guard alive until exit so buffered lines are flushed.
pub fn init(log_dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %log_dir.join(LOG_FILE_NAME).display(), "logging initialised");
    Ok(guard)
}
