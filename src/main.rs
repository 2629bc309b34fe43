//! # Main Entry Point
//!
//! Bridges the POTA spotting API onto APRS-IS:
//! - Domain: Configuration, Types, Passcode
//! - Infrastructure: APRS-IS client, Packet parser, POTA API
//! - Application: Session, Dispatcher, Formatter, Frames, Logging
//!

mod application;
mod domain;
mod infrastructure;
mod strings;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::application::session::SessionManager;
use crate::domain::config::{AppConfig, DEFAULT_CONFIG_PATH, LoggingConfig};
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(version, about = "Answer APRS spot requests with live POTA activations")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, short, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. Load Configuration
    let loaded = AppConfig::load(&cli.config);

    // 2. Logging Setup (falls back to defaults so load errors are still logged)
    let logging = match &loaded {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    let _guard = match application::logging::init(&logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{e:#}");
            None
        }
    };

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", logs::config_load_fail(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };
    config.apply_env_overrides();

    // 3. Run Session
    let mut session = SessionManager::new(config);
    match session.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
