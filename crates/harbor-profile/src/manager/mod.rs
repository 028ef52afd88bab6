//! The process-wide set of profiles.
//!
//! Normal profiles are listed in `config.json` and each owns a directory
//! under the data root. Incognito profiles exist only in memory.

mod storage;


use harbor_common::{ProfileError, ProfileId};
use harbor_config::{DataPaths, GlobalConfig};
use tracing::{info, warn};

use crate::profile::Profile;

pub struct ProfileManager {
    paths: DataPaths,
    /// Insertion order.
    profiles: Vec<Profile>,
    last_user_id: Option<ProfileId>,
    loaded: bool,
}

impl ProfileManager {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            profiles: Vec::new(),
            last_user_id: None,
            loaded: false,
        }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load every profile listed in the global config.
    ///
    /// A missing or corrupt global config is replaced with an empty one and
    /// no profiles are loaded. Never fails.
    pub fn loads(&mut self) -> &[Profile] {
        match storage::read_global(&self.paths) {
            Ok(global) => {
                for id in global.users {
                    let id = ProfileId::from(id);
                    if self.get(&id).is_none() {
                        let profile = Profile::open(id, &self.paths);
                        self.add(profile);
                    }
                }
                self.last_user_id = global.last_user.map(ProfileId::from);
                self.persist();
            }
            Err(e) => {
                warn!("resetting global config: {e}");
                self.last_user_id = None;
                if let Err(e) = storage::write_global(&self.paths, &GlobalConfig::default()) {
                    warn!("failed to write global config: {e}");
                }
            }
        }

        self.loaded = true;
        info!(count = self.profiles.len(), "profiles loaded");
        &self.profiles
    }

    /// Create and register a new normal profile with default settings.
    pub fn create(&mut self) -> Result<&Profile, ProfileError> {
        let id = ProfileId::new();
        let dir = self.paths.profile_dir(id.as_str());
        std::fs::create_dir_all(&dir).map_err(|e| {
            ProfileError::Storage(format!("failed to create {}: {e}", dir.display()))
        })?;

        let profile = Profile::open(id, &self.paths);
        profile
            .settings()
            .save()
            .map_err(|e| ProfileError::Storage(e.to_string()))?;

        info!(profile = %profile.id(), "profile created");
        let profile = self.add(profile);
        let id = profile.id().clone();
        self.persist();
        self.get(&id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))
    }

    /// Create an incognito profile inheriting `origin`'s settings.
    pub fn create_incognito(&mut self, origin: &ProfileId) -> Result<&Profile, ProfileError> {
        let origin = self
            .get(origin)
            .ok_or_else(|| ProfileError::NotFound(origin.to_string()))?;
        let profile = Profile::incognito(origin);
        info!(profile = %profile.id(), origin = %origin.id(), "incognito profile created");
        Ok(self.add(profile))
    }

    /// Delete a normal profile and its directory.
    ///
    /// Returns `false` without touching the collection when the id is
    /// unknown, its directory is missing, or removal fails.
    pub fn delete(&mut self, id: &ProfileId) -> bool {
        if self.get(id).is_none() {
            return false;
        }

        let dir = self.paths.profile_dir(id.as_str());
        if !dir.is_dir() {
            return false;
        }
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            warn!(profile = %id, "failed to remove profile directory: {e}");
            return false;
        }

        self.remove(id);
        if self.last_user_id.as_ref() == Some(id) {
            self.last_user_id = None;
        }
        self.persist();
        info!(profile = %id, "profile deleted");
        true
    }

    pub fn get(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: &ProfileId) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id() == id)
    }

    /// Register `profile`, replacing any profile with the same id.
    pub fn add(&mut self, profile: Profile) -> &Profile {
        let index = match self.profiles.iter().position(|p| p.id() == profile.id()) {
            Some(index) => {
                self.profiles[index] = profile;
                index
            }
            None => {
                self.profiles.push(profile);
                self.profiles.len() - 1
            }
        };
        &self.profiles[index]
    }

    /// Unregister without touching disk.
    pub fn remove(&mut self, id: &ProfileId) -> Option<Profile> {
        let index = self.profiles.iter().position(|p| p.id() == id)?;
        Some(self.profiles.remove(index))
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn normal_profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter().filter(|p| !p.is_incognito())
    }

    pub fn incognito_profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter().filter(|p| p.is_incognito())
    }

    pub fn last_user_id(&self) -> Option<&ProfileId> {
        self.last_user_id.as_ref()
    }

    /// Set the last-used profile and persist the global config.
    pub fn set_last_user_id(&mut self, id: Option<ProfileId>) {
        self.last_user_id = id;
        self.persist();
    }
}
