//! Tests for TOML settings loading.

use super::*;
use crate::schema::{ChromeStyle, SidebarState, ThemeMode, UserConfig};
use harbor_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_harbor_settings.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
[appearance]
style = "top_double"
theme = "dark"

[appearance.sidebar]
state = "downloads"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.appearance.style, ChromeStyle::TopDouble);
    assert_eq!(config.appearance.theme, ThemeMode::Dark);
    assert_eq!(config.appearance.sidebar.state, SidebarState::Downloads);
    // Defaults preserved
    assert!(!config.appearance.sidebar.extended);
    assert_eq!(config.pages, UserConfig::default().pages);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_still_returns_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
[pages.home]
mode = "custom"
url = "not a url"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.pages.home.url, "not a url");
    // Falls back when read
    assert_eq!(config.pages.home_url(), "harbor://home");
}

#[test]
fn load_or_default_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(&dir.path().join("settings.toml"));
    assert_eq!(config, UserConfig::default());
}

#[test]
fn load_or_default_when_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[appearance\nstyle=").unwrap();
    assert_eq!(load_or_default(&path), UserConfig::default());
}
