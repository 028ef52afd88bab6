//! Core TOML settings loading.

use crate::schema::UserConfig;
use crate::validation;
use harbor_common::ConfigError;
use std::path::Path;
use tracing::{debug, warn};

/// Load settings from a specific TOML file.
///
/// Missing fields take their serde defaults. A config that fails validation
/// is still returned; the problems are logged.
pub fn load_from_path(path: &Path) -> Result<UserConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config: UserConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "settings validation warning: {e}");
    }

    debug!(path = %path.display(), "loaded settings");
    Ok(config)
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable. Never fails.
pub fn load_or_default(path: &Path) -> UserConfig {
    match load_from_path(path) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) => {
            debug!(path = %path.display(), "no settings file, using defaults");
            UserConfig::default()
        }
        Err(e) => {
            warn!(path = %path.display(), "failed to load settings, using defaults: {e}");
            UserConfig::default()
        }
    }
}
