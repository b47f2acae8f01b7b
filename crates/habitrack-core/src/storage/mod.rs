mod config;

pub use config::{AnalyticsConfig, Config, PreferencesConfig, UtcOffset};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/habitrack[-dev]/` based on HABITRACK_ENV.
///
/// Set HABITRACK_ENV=dev to use development data directory.
/// HABITRACK_CONFIG_DIR replaces the directory entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HABITRACK_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITRACK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitrack-dev")
            } else {
                base_dir.join("habitrack")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
