//! Core TOML settings loading: read from path or platform default.

use crate::schema::TilingSettings;
use crate::validation;
use std::path::Path;
use tracing::{info, warn};
use weft_common::ConfigError;

use super::paths::{create_default_config, default_config_path};

/// Parse settings from TOML text, filling missing fields with defaults.
pub fn load_from_str(content: &str) -> Result<TilingSettings, ConfigError> {
    let settings: TilingSettings = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&settings) {
        warn!("settings validation warning: {e}; keeping parsed values");
    }
    Ok(settings)
}

/// Load settings from a specific TOML file path.
///
/// A missing file is reported as [`ConfigError::FileNotFound`]. Validation
/// failures are logged and the parsed settings are returned as-is.
pub fn load_from_path(path: &Path) -> Result<TilingSettings, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let settings = load_from_str(&content)?;
    info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Load settings from the platform default path
/// (`<config_dir>/weft/settings.toml`).
///
/// If the file does not exist, a commented default file is created and
/// defaults are returned.
pub fn load_default() -> Result<TilingSettings, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(settings) => Ok(settings),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no settings found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(TilingSettings::default())
        }
        Err(e) => Err(e),
    }
}
