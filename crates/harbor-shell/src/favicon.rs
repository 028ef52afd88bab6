//! Process-wide favicon cache, keyed by page origin.

use std::collections::HashMap;

/// Cache key for a page: `scheme://host[:port]` of http(s) URLs.
pub fn normalize(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
        None => format!("{}://{host}", parsed.scheme()),
    })
}

#[derive(Debug, Default)]
pub struct FaviconCache {
    entries: HashMap<String, String>,
}

impl FaviconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached icon (as a data URL) for the page's origin.
    pub fn get(&self, page_url: &str) -> Option<&str> {
        let key = normalize(page_url)?;
        self.entries.get(&key).map(String::as_str)
    }

    /// Returns false when the page has no cacheable origin.
    pub fn insert(&mut self, page_url: &str, icon: String) -> bool {
        match normalize(page_url) {
            Some(key) => {
                self.entries.insert(key, icon);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_origin_only() {
        assert_eq!(
            normalize("https://a.example/path?q=1#x").as_deref(),
            Some("https://a.example")
        );
        assert_eq!(
            normalize("http://localhost:8080/index.html").as_deref(),
            Some("http://localhost:8080")
        );
        // Default ports are dropped by the parser.
        assert_eq!(normalize("https://a.example:443/").as_deref(), Some("https://a.example"));
        assert_eq!(normalize("harbor://home"), None);
        assert_eq!(normalize("file:///tmp/a.html"), None);
        assert_eq!(normalize("garbage"), None);
    }

    #[test]
    fn cache_shared_across_paths() {
        let mut cache = FaviconCache::new();
        assert!(cache.insert("https://a.example/one", "data:icon".into()));
        assert_eq!(cache.get("https://a.example/two"), Some("data:icon"));
        assert_eq!(cache.get("http://a.example/"), None);
        assert!(!cache.insert("harbor://home", "data:icon".into()));
        assert_eq!(cache.len(), 1);
    }
}
