//! Search engine configuration.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the encoded query in an engine's URL template.
pub const QUERY_PLACEHOLDER: &str = "%s";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchEngine {
    pub name: String,
    /// URL template containing `%s`.
    pub url: String,
}

impl SearchEngine {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        self.url
            .replace(QUERY_PLACEHOLDER, &urlencoding::encode(query))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub engines: Vec<SearchEngine>,
    /// Index into `engines`.
    pub default_engine: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engines: vec![
                SearchEngine::new("Google", "https://www.google.com/search?q=%s"),
                SearchEngine::new("Bing", "https://www.bing.com/search?q=%s"),
                SearchEngine::new("DuckDuckGo", "https://duckduckgo.com/?q=%s"),
            ],
            default_engine: 0,
        }
    }
}

impl SearchConfig {
    /// The selected engine, or the first one when the index is stale.
    pub fn engine(&self) -> Option<&SearchEngine> {
        self.engines
            .get(self.default_engine)
            .or_else(|| self.engines.first())
    }

    /// Build a search URL for `query` with the selected engine.
    pub fn search_url(&self, query: &str) -> Option<String> {
        self.engine().map(|engine| engine.search_url(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.engines.len(), 3);
        assert_eq!(config.engine().unwrap().name, "Google");
    }

    #[test]
    fn search_url_encodes_query() {
        let config = SearchConfig::default();
        assert_eq!(
            config.search_url("rust lang & co").as_deref(),
            Some("https://www.google.com/search?q=rust%20lang%20%26%20co")
        );
    }

    #[test]
    fn stale_index_falls_back_to_first() {
        let config = SearchConfig {
            default_engine: 9,
            ..SearchConfig::default()
        };
        assert_eq!(config.engine().unwrap().name, "Google");
    }

    #[test]
    fn no_engines_means_no_url() {
        let config = SearchConfig {
            engines: Vec::new(),
            default_engine: 0,
        };
        assert!(config.search_url("x").is_none());
    }
}
