//! Reading and writing the global profile list.

use harbor_common::ConfigError;
use harbor_config::{DataPaths, GlobalConfig};
use tracing::{debug, warn};

use super::ProfileManager;

impl ProfileManager {
    /// Snapshot of the persisted state: normal profile ids and the last user.
    pub(super) fn global_config(&self) -> GlobalConfig {
        GlobalConfig {
            users: self
                .normal_profiles()
                .map(|p| p.id().as_str().to_string())
                .collect(),
            last_user: self.last_user_id.as_ref().map(|id| id.as_str().to_string()),
        }
    }

    /// Write the global config, logging failures.
    pub(super) fn persist(&self) {
        if let Err(e) = write_global(&self.paths, &self.global_config()) {
            warn!("failed to write global config: {e}");
        }
    }
}

pub(super) fn read_global(paths: &DataPaths) -> Result<GlobalConfig, ConfigError> {
    let config = GlobalConfig::load(&paths.global_config())?;
    debug!(users = config.users.len(), "global config read");
    Ok(config)
}

pub(super) fn write_global(paths: &DataPaths, config: &GlobalConfig) -> Result<(), ConfigError> {
    config.save(&paths.global_config())
}
