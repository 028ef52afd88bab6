//! Write profile settings to TOML on disk.
//!
//! Writes are atomic (write to `.tmp`, then rename) so a crash mid-write
//! never leaves a truncated settings file behind.

use std::path::Path;

use harbor_common::ConfigError;

use crate::schema::UserConfig;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Write `config` to `path` as pretty TOML, creating parent directories.
pub fn save_config_to_path(config: &UserConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::WriteError(format!("failed to serialize config to TOML: {e}")))?;
    write_atomic(path, &toml_str)?;

    tracing::debug!(path = %path.display(), "Settings saved to disk");
    Ok(())
}

/// Write `contents` to `path` through a sibling `.tmp` file.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::WriteError(format!(
                "failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(|e| {
        ConfigError::WriteError(format!("failed to write {}: {e}", tmp_path.display()))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Rename can fail across filesystems or on Windows; fall back.
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        let _ = std::fs::remove_file(&tmp_path);
        std::fs::write(path, contents).map_err(|e2| {
            ConfigError::WriteError(format!("failed to write {}: {e2}", path.display()))
        })?;
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ChromeStyle, ThemeMode};
    use tempfile::TempDir;

    #[test]
    fn save_config_writes_valid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut config = UserConfig::default();
        config.appearance.style = ChromeStyle::Left;
        config.appearance.theme = ThemeMode::Dark;
        save_config_to_path(&config, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: UserConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn save_config_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile").join("settings.toml");

        save_config_to_path(&UserConfig::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_config_cleans_up_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        save_config_to_path(&UserConfig::default(), &path).unwrap();

        let tmp_path = dir.path().join("settings.toml.tmp");
        assert!(
            !tmp_path.exists(),
            "tmp file should be cleaned up after rename"
        );
    }

    #[test]
    fn write_atomic_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
