//! A browsing identity: settings plus history.

use harbor_common::ProfileId;
use harbor_config::{DataPaths, UserConfig, UserConfigPatch};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::history::History;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProfileKind {
    Normal,
    /// Settings were copied from `origin` at creation.
    Incognito { origin: ProfileId },
}

impl ProfileKind {
    /// `"normal"` or `"incognito"`, as reported to the UI.
    pub fn name(&self) -> &'static str {
        match self {
            ProfileKind::Normal => "normal",
            ProfileKind::Incognito { .. } => "incognito",
        }
    }
}

/// A profile's settings tree, persisted to `settings.toml` when it has a path.
#[derive(Debug)]
pub struct ProfileSettings {
    config: UserConfig,
    path: Option<PathBuf>,
}

impl ProfileSettings {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            config: harbor_config::load_or_default(&path),
            path: Some(path),
        }
    }

    pub fn ephemeral(config: UserConfig) -> Self {
        Self { config, path: None }
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Merge `patch` into the config and persist it. Persistence failures are
    /// logged; the in-memory config is updated regardless.
    pub fn update(&mut self, patch: &UserConfigPatch) -> &UserConfig {
        self.config.apply(patch);
        if let Err(e) = self.save() {
            warn!("failed to persist settings: {e}");
        }
        &self.config
    }

    pub fn save(&self) -> Result<(), harbor_common::ConfigError> {
        match &self.path {
            Some(path) => harbor_config::save_config_to_path(&self.config, path),
            None => Ok(()),
        }
    }

    pub fn startup_urls(&self) -> Vec<String> {
        self.config.pages.startup_urls()
    }

    pub fn home_url(&self) -> String {
        self.config.pages.home_url()
    }
}

#[derive(Debug)]
pub struct Profile {
    id: ProfileId,
    kind: ProfileKind,
    settings: ProfileSettings,
    history: History,
}

impl Profile {
    /// Open a normal profile stored under `paths`.
    pub fn open(id: ProfileId, paths: &DataPaths) -> Self {
        let settings = ProfileSettings::load(paths.settings(id.as_str()));
        let history = History::open(paths.history(id.as_str()));
        info!(profile = %id, "profile loaded");
        Self {
            id,
            kind: ProfileKind::Normal,
            settings,
            history,
        }
    }

    /// A fresh incognito profile inheriting `origin`'s current settings.
    pub fn incognito(origin: &Profile) -> Self {
        Self {
            id: ProfileId::new(),
            kind: ProfileKind::Incognito {
                origin: origin.id.clone(),
            },
            settings: ProfileSettings::ephemeral(origin.settings.config().clone()),
            history: History::ephemeral(),
        }
    }

    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    pub fn kind(&self) -> &ProfileKind {
        &self.kind
    }

    pub fn is_incognito(&self) -> bool {
        matches!(self.kind, ProfileKind::Incognito { .. })
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ProfileSettings {
        &mut self.settings
    }

    pub fn config(&self) -> &UserConfig {
        self.settings.config()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_config::schema::{ChromeStyle, ThemeMode};
    use harbor_config::merge::AppearancePatch;
    use tempfile::TempDir;

    fn theme_patch(theme: ThemeMode) -> UserConfigPatch {
        UserConfigPatch {
            appearance: Some(AppearancePatch {
                theme: Some(theme),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(ProfileKind::Normal.name(), "normal");
        let kind = ProfileKind::Incognito {
            origin: ProfileId::from("a"),
        };
        assert_eq!(kind.name(), "incognito");
    }

    #[test]
    fn kind_serialization() {
        let json = serde_json::to_string(&ProfileKind::Normal).unwrap();
        assert_eq!(json, r#"{"type":"normal"}"#);
    }

    #[test]
    fn settings_update_persists() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        let id = ProfileId::from("p1");

        let mut profile = Profile::open(id.clone(), &paths);
        profile.settings_mut().update(&theme_patch(ThemeMode::Dark));

        let reopened = Profile::open(id, &paths);
        assert_eq!(reopened.config().appearance.theme, ThemeMode::Dark);
    }

    #[test]
    fn incognito_copies_settings_without_sharing() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());

        let mut origin = Profile::open(ProfileId::from("p1"), &paths);
        origin.settings_mut().update(&UserConfigPatch {
            appearance: Some(AppearancePatch {
                style: Some(ChromeStyle::Left),
                ..Default::default()
            }),
            ..Default::default()
        });

        let mut incognito = Profile::incognito(&origin);
        assert!(incognito.is_incognito());
        assert_ne!(incognito.id(), origin.id());
        assert_eq!(incognito.config().appearance.style, ChromeStyle::Left);

        incognito
            .settings_mut()
            .update(&theme_patch(ThemeMode::Light));
        assert_eq!(incognito.config().appearance.theme, ThemeMode::Light);
        assert_eq!(origin.config().appearance.theme, ThemeMode::System);
    }

    #[test]
    fn incognito_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        let origin = Profile::open(ProfileId::from("p1"), &paths);

        let mut incognito = Profile::incognito(&origin);
        incognito
            .settings_mut()
            .update(&theme_patch(ThemeMode::Dark));
        incognito
            .history_mut()
            .record("A", "https://a.example", None);

        assert!(!paths.profile_dir(incognito.id().as_str()).exists());
    }
}
