//! Harbor configuration system.
//!
//! Per-profile settings live in TOML with defaults for every field, so
//! partial files work. The global `config.json` lists the profiles. Partial
//! updates from the settings page go through [`UserConfigPatch`].

pub mod global;
pub mod merge;
pub mod paths;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;

// Re-export core types for convenience
pub use global::GlobalConfig;
pub use merge::UserConfigPatch;
pub use paths::DataPaths;
pub use schema::{UserConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{load_from_path, load_or_default};
pub use toml_writer::save_config_to_path;

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &UserConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

/// Serialize a config to a JSON value for IPC replies.
pub fn config_to_value(config: &UserConfig) -> serde_json::Value {
    serde_json::to_value(config).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&UserConfig::default());
        assert!(json.contains("\"appearance\""));
        assert!(json.contains("\"pages\""));
        assert!(json.contains("\"search\""));
        assert!(json.contains("\"top_single\""));
    }

    #[test]
    fn config_to_value_round_trips() {
        let config = UserConfig::default();
        let value = config_to_value(&config);
        let parsed: UserConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }
}
