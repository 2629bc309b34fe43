//! # Logging
//!
//! Installs the global `tracing` subscriber: one layer to stdout and one
//! plain-text layer appending to the log file. `RUST_LOG` overrides the
//! default filter.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::config::LoggingConfig;

const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// The returned guard flushes the file writer when dropped; keep it alive
/// until the process exits.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    let dir = Path::new(&config.directory);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, &config.file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_directory_and_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            directory: dir.path().join("logs").display().to_string(),
            file: "bridge.log".to_string(),
        };

        let guard = init(&config).unwrap();
        tracing::info!("log file check");
        drop(guard);

        let written = std::fs::read_to_string(dir.path().join("logs/bridge.log")).unwrap();
        assert!(written.contains("log file check"));

        assert!(init(&config).is_err());
    }
}
