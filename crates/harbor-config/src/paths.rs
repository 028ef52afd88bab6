//! On-disk layout of the browser's data directory.
//!
//! ```text
//! <data_dir>/
//!   config.json            global profile list
//!   <profile-id>/
//!     settings.toml
//!     history.jsonl
//! ```

use harbor_common::ConfigError;
use std::path::{Path, PathBuf};

pub const GLOBAL_CONFIG_FILE: &str = "config.json";
pub const SETTINGS_FILE: &str = "settings.toml";
pub const HISTORY_FILE: &str = "history.jsonl";

/// Platform data directory: `~/.local/share/harbor` on Linux,
/// `~/Library/Application Support/harbor` on macOS.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine data directory".into()))?;
    Ok(data_dir.join("harbor"))
}

/// Resolves every path under one data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Paths rooted at [`default_data_dir`].
    pub fn platform_default() -> Result<Self, ConfigError> {
        default_data_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn global_config(&self) -> PathBuf {
        self.root.join(GLOBAL_CONFIG_FILE)
    }

    pub fn profile_dir(&self, profile_id: &str) -> PathBuf {
        self.root.join(profile_id)
    }

    pub fn settings(&self, profile_id: &str) -> PathBuf {
        self.profile_dir(profile_id).join(SETTINGS_FILE)
    }

    pub fn history(&self, profile_id: &str) -> PathBuf {
        self.profile_dir(profile_id).join(HISTORY_FILE)
    }

    /// Default location for saved pages and downloads.
    pub fn downloads_dir(&self) -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| self.root.join("downloads"))
    }
}
