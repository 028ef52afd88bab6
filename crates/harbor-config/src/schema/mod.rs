//! Per-profile configuration schema.
//!
//! All structs use `serde(default)` so partial settings files load.

mod appearance;
mod pages;
mod search;

pub use appearance::*;
pub use pages::*;
pub use search::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root of a profile's settings tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    pub appearance: AppearanceConfig,
    pub pages: PagesConfig,
    pub search: SearchConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn partial_json_keeps_other_sections() {
        let json = r#"{"appearance":{"theme":"dark"}}"#;
        let config: UserConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.appearance.theme, ThemeMode::Dark);
        assert_eq!(config.appearance.style, ChromeStyle::TopSingle);
        assert_eq!(config.pages, PagesConfig::default());
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let config = UserConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
