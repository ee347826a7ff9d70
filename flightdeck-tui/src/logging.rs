//! File logging. The terminal belongs to the UI, so tracing output goes to
//! `<log_dir>/flightdeck.log`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE: &str = "flightdeck.log";

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_file_logging(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_file_in_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs").join("nested");

        let guard = init_file_logging(&dir).unwrap();
        tracing::info!("hello from test");
        drop(guard);

        assert!(dir.join(LOG_FILE).exists());
    }
}
