mod config;
pub mod state;

pub use config::{Config, GenerationConfig, NotificationsConfig, SuggestionsConfig};
pub use state::{AppState, CognitiveMode, StateStore, Theme, UserSettings, WeeklyRoutine};

use std::path::PathBuf;

/// Returns `~/.config/cogniwell[-dev]/` based on COGNIWELL_ENV.
///
/// Set COGNIWELL_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("COGNIWELL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cogniwell-dev")
    } else {
        base_dir.join("cogniwell")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
