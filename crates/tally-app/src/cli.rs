//! CLI argument definitions for the Tally application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use tally_core::error::TallyError;
use tally_core::types::AppScreen;

/// Tally — voice-guided logging of academic contributions.
#[derive(Parser, Debug)]
#[command(name = "tally", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Application screen to simulate (landing, dashboard, new-entry, history).
    #[arg(short = 's', long = "screen", default_value = "new-entry")]
    pub screen: String,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TALLY_CONFIG env var > platform default
    /// (~/.tally/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TALLY_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    /// Returns `None` if not overridden.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Resolve the simulated application screen.
    pub fn resolve_screen(&self) -> Result<AppScreen, TallyError> {
        match self.screen.as_str() {
            "landing" => Ok(AppScreen::Landing),
            "dashboard" => Ok(AppScreen::Dashboard),
            "new-entry" => Ok(AppScreen::NewEntry),
            "history" => Ok(AppScreen::History),
            other => Err(TallyError::Config(format!("Unknown screen: {other}"))),
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".tally").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".tally").join("config.toml");
    }
    PathBuf::from("config.toml")
}
