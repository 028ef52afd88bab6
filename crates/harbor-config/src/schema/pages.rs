//! Startup and home page configuration.

use harbor_common::url::{is_url, INTERNAL_SCHEME};
use serde::{Deserialize, Serialize};

/// Internal page shown for new tabs and as the default home page.
pub const HOME_PAGE_HOST: &str = "home";

/// `harbor://home`
pub fn home_page_url() -> String {
    format!("{INTERNAL_SCHEME}://{HOME_PAGE_HOST}")
}

/// What to open when a window starts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StartupMode {
    #[default]
    NewTab,
    PrevSessions,
    Custom,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HomeMode {
    #[default]
    Default,
    Custom,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartupPages {
    pub mode: StartupMode,
    /// Used only in `custom` mode.
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HomePage {
    pub mode: HomeMode,
    /// Used only in `custom` mode. Empty means unset.
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagesConfig {
    pub startup: StartupPages,
    pub home: HomePage,
}

impl PagesConfig {
    /// URLs to open in a fresh window. Empty for `prev_sessions`; custom
    /// entries that are not URLs are dropped.
    pub fn startup_urls(&self) -> Vec<String> {
        match self.startup.mode {
            StartupMode::NewTab => vec![home_page_url()],
            StartupMode::PrevSessions => Vec::new(),
            StartupMode::Custom => self
                .startup
                .urls
                .iter()
                .filter(|url| is_url(url))
                .cloned()
                .collect(),
        }
    }

    /// The configured home page, falling back to `harbor://home`.
    pub fn home_url(&self) -> String {
        match self.home.mode {
            HomeMode::Custom if is_url(&self.home.url) => self.home.url.clone(),
            _ => home_page_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_startup_opens_home() {
        let pages = PagesConfig::default();
        assert_eq!(pages.startup_urls(), vec!["harbor://home".to_string()]);
        assert_eq!(pages.home_url(), "harbor://home");
    }

    #[test]
    fn prev_sessions_opens_nothing() {
        let mut pages = PagesConfig::default();
        pages.startup.mode = StartupMode::PrevSessions;
        assert!(pages.startup_urls().is_empty());
    }

    #[test]
    fn custom_startup_filters_non_urls() {
        let mut pages = PagesConfig::default();
        pages.startup.mode = StartupMode::Custom;
        pages.startup.urls = vec![
            "https://example.com".into(),
            "".into(),
            "not a url".into(),
            "rust-lang.org".into(),
        ];
        assert_eq!(
            pages.startup_urls(),
            vec!["https://example.com".to_string(), "rust-lang.org".to_string()]
        );
    }

    #[test]
    fn custom_home_requires_url() {
        let mut pages = PagesConfig::default();
        pages.home.mode = HomeMode::Custom;
        assert_eq!(pages.home_url(), "harbor://home");

        pages.home.url = "https://example.com".into();
        assert_eq!(pages.home_url(), "https://example.com");

        pages.home.mode = HomeMode::Default;
        assert_eq!(pages.home_url(), "harbor://home");
    }

    #[test]
    fn startup_mode_serialization() {
        let json = serde_json::to_string(&StartupMode::PrevSessions).unwrap();
        assert_eq!(json, "\"prev_sessions\"");
    }
}
