//! Partial config updates.
//!
//! A `UserConfigPatch` mirrors `UserConfig` with every field optional. It
//! deserializes from the partial JSON the settings page sends and is merged
//! field by field: present scalars overwrite, nested sections recurse, lists
//! are replaced wholesale.

use serde::{Deserialize, Serialize};

use crate::schema::{
    AppearanceConfig, ChromeStyle, HomeMode, HomePage, PagesConfig, SearchConfig, SearchEngine,
    SidebarConfig, SidebarState, StartupMode, StartupPages, ThemeMode, UserConfig,
};

/// Overwrite `target` when `value` is present.
fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Later value wins; falls back to the earlier one.
fn pick<T: Clone>(first: &Option<T>, second: &Option<T>) -> Option<T> {
    second.clone().or_else(|| first.clone())
}

/// Combine two optional nested patches with `then`.
fn nest<T: Clone>(first: &Option<T>, second: &Option<T>, then: fn(&T, &T) -> T) -> Option<T> {
    match (first, second) {
        (Some(a), Some(b)) => Some(then(a, b)),
        (a, b) => pick(a, b),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfigPatch {
    pub appearance: Option<AppearancePatch>,
    pub pages: Option<PagesPatch>,
    pub search: Option<SearchPatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppearancePatch {
    pub style: Option<ChromeStyle>,
    pub theme: Option<ThemeMode>,
    pub fullscreen_showing_toolbar: Option<bool>,
    pub sidebar: Option<SidebarPatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SidebarPatch {
    pub extended: Option<bool>,
    pub state: Option<SidebarState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagesPatch {
    pub startup: Option<StartupPatch>,
    pub home: Option<HomePatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartupPatch {
    pub mode: Option<StartupMode>,
    pub urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HomePatch {
    pub mode: Option<HomeMode>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchPatch {
    pub engines: Option<Vec<SearchEngine>>,
    pub default_engine: Option<usize>,
}

// =============================================================================
// APPLY
// =============================================================================

impl UserConfig {
    /// Merge `patch` into this config in place.
    pub fn apply(&mut self, patch: &UserConfigPatch) {
        if let Some(p) = &patch.appearance {
            self.appearance.apply(p);
        }
        if let Some(p) = &patch.pages {
            self.pages.apply(p);
        }
        if let Some(p) = &patch.search {
            self.search.apply(p);
        }
    }

    /// Non-mutating form of [`UserConfig::apply`].
    pub fn merged(&self, patch: &UserConfigPatch) -> UserConfig {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

impl AppearanceConfig {
    fn apply(&mut self, patch: &AppearancePatch) {
        set(&mut self.style, &patch.style);
        set(&mut self.theme, &patch.theme);
        set(
            &mut self.fullscreen_showing_toolbar,
            &patch.fullscreen_showing_toolbar,
        );
        if let Some(p) = &patch.sidebar {
            self.sidebar.apply(p);
        }
    }
}

impl SidebarConfig {
    fn apply(&mut self, patch: &SidebarPatch) {
        set(&mut self.extended, &patch.extended);
        set(&mut self.state, &patch.state);
    }
}

impl PagesConfig {
    fn apply(&mut self, patch: &PagesPatch) {
        if let Some(p) = &patch.startup {
            self.startup.apply(p);
        }
        if let Some(p) = &patch.home {
            self.home.apply(p);
        }
    }
}

impl StartupPages {
    fn apply(&mut self, patch: &StartupPatch) {
        set(&mut self.mode, &patch.mode);
        set(&mut self.urls, &patch.urls);
    }
}

impl HomePage {
    fn apply(&mut self, patch: &HomePatch) {
        set(&mut self.mode, &patch.mode);
        set(&mut self.url, &patch.url);
    }
}

impl SearchConfig {
    fn apply(&mut self, patch: &SearchPatch) {
        set(&mut self.engines, &patch.engines);
        set(&mut self.default_engine, &patch.default_engine);
    }
}

// =============================================================================
// COMPOSE
// =============================================================================

impl UserConfigPatch {
    /// A patch equivalent to applying `self` and then `other`.
    pub fn then(&self, other: &UserConfigPatch) -> UserConfigPatch {
        UserConfigPatch {
            appearance: nest(&self.appearance, &other.appearance, AppearancePatch::then),
            pages: nest(&self.pages, &other.pages, PagesPatch::then),
            search: nest(&self.search, &other.search, SearchPatch::then),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == UserConfigPatch::default()
    }

    /// Parse the partial JSON sent by the settings page.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl AppearancePatch {
    fn then(&self, other: &AppearancePatch) -> AppearancePatch {
        AppearancePatch {
            style: pick(&self.style, &other.style),
            theme: pick(&self.theme, &other.theme),
            fullscreen_showing_toolbar: pick(
                &self.fullscreen_showing_toolbar,
                &other.fullscreen_showing_toolbar,
            ),
            sidebar: nest(&self.sidebar, &other.sidebar, SidebarPatch::then),
        }
    }
}

impl SidebarPatch {
    fn then(&self, other: &SidebarPatch) -> SidebarPatch {
        SidebarPatch {
            extended: pick(&self.extended, &other.extended),
            state: pick(&self.state, &other.state),
        }
    }
}

impl PagesPatch {
    fn then(&self, other: &PagesPatch) -> PagesPatch {
        PagesPatch {
            startup: nest(&self.startup, &other.startup, StartupPatch::then),
            home: nest(&self.home, &other.home, HomePatch::then),
        }
    }
}

impl StartupPatch {
    fn then(&self, other: &StartupPatch) -> StartupPatch {
        StartupPatch {
            mode: pick(&self.mode, &other.mode),
            urls: pick(&self.urls, &other.urls),
        }
    }
}

impl HomePatch {
    fn then(&self, other: &HomePatch) -> HomePatch {
        HomePatch {
            mode: pick(&self.mode, &other.mode),
            url: pick(&self.url, &other.url),
        }
    }
}

impl SearchPatch {
    fn then(&self, other: &SearchPatch) -> SearchPatch {
        SearchPatch {
            engines: pick(&self.engines, &other.engines),
            default_engine: pick(&self.default_engine, &other.default_engine),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
