//! The global `config.json`: which profiles exist and which was used last.

use harbor_common::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Ids of normal profiles, in creation order.
    pub users: Vec<String>,
    #[serde(rename = "lastUser", default, skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,
}

impl GlobalConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
            _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
        })?;

        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse global config: {e}")))
    }

    /// Atomic write: `.tmp` then rename.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string(self)
            .map_err(|e| ConfigError::WriteError(format!("failed to serialize global config: {e}")))?;
        crate::toml_writer::write_atomic(path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn wire_format_uses_last_user_key() {
        let config = GlobalConfig {
            users: vec!["a".into(), "b".into()],
            last_user: Some("b".into()),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"users":["a","b"],"lastUser":"b"}"#);
    }

    #[test]
    fn missing_last_user_is_none() {
        let config: GlobalConfig = serde_json::from_str(r#"{"users":[]}"#).unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = GlobalConfig {
            users: vec!["x".into()],
            last_user: Some("x".into()),
        };

        config.save(&path).unwrap();
        assert_eq!(GlobalConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn load_missing_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let err = GlobalConfig::load(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_corrupt_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ users: nope").unwrap();
        let err = GlobalConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
