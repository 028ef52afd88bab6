//! URL classification helpers shared by menus, config validation and the
//! address bar.

use regex::Regex;
use std::sync::LazyLock;

/// Scheme used for pages served by the browser itself (`harbor://home`).
pub const INTERNAL_SCHEME: &str = "harbor";

/// Schemes accepted as a URL even without a dotted host.
const KNOWN_SCHEMES: &[&str] = &[
    "http",
    "https",
    "file",
    "ftp",
    "data",
    "about",
    "view-source",
    INTERNAL_SCHEME,
];

/// Bare host forms: `example.com`, `localhost:8080/path`, `10.0.0.1`.
static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i)(localhost|(\d{1,3}\.){3}\d{1,3}|([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,})(:\d{1,5})?([/?#]\S*)?$",
    )
    .expect("url: static host pattern must compile")
});

/// Returns true when `text` reads as a URL: either a known scheme that
/// parses, or a bare host name with an optional port and path.
pub fn is_url(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }

    if let Ok(parsed) = url::Url::parse(text) {
        if KNOWN_SCHEMES.contains(&parsed.scheme()) {
            return true;
        }
    }

    HOST_RE.is_match(text)
}

/// Trims and collapses internal whitespace runs to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prefixes `https://` when `text` is a bare host, otherwise returns it as is.
pub fn with_default_scheme(text: &str) -> String {
    let text = text.trim();
    match url::Url::parse(text) {
        Ok(parsed) if KNOWN_SCHEMES.contains(&parsed.scheme()) => text.to_string(),
        _ => format!("https://{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemed_urls() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://localhost:3000/a?b=c"));
        assert!(is_url("file:///tmp/index.html"));
        assert!(is_url("harbor://home"));
        assert!(is_url("view-source:https://example.com"));
    }

    #[test]
    fn bare_hosts() {
        assert!(is_url("example.com"));
        assert!(is_url("www.rust-lang.org/learn"));
        assert!(is_url("localhost:8080"));
        assert!(is_url("192.168.0.1/admin"));
    }

    #[test]
    fn plain_text_is_not_url() {
        assert!(!is_url(""));
        assert!(!is_url("   "));
        assert!(!is_url("hello world"));
        assert!(!is_url("rust"));
        assert!(!is_url("example.com is great"));
        assert!(!is_url("mailto-ish:thing"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(is_url("  https://example.com \n"));
    }

    #[test]
    fn collapse() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn default_scheme() {
        assert_eq!(with_default_scheme("example.com"), "https://example.com");
        assert_eq!(
            with_default_scheme("http://example.com"),
            "http://example.com"
        );
        assert_eq!(with_default_scheme("harbor://home"), "harbor://home");
    }
}
