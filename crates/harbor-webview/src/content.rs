//! Bundled pages served over the `harbor://` custom protocol.
//!
//! `harbor://home` maps to `{base_dir}/home/index.html` and
//! `harbor://history/app.js` to `{base_dir}/history/app.js`, so the chrome,
//! dialogs and internal pages load without a local HTTP server.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use harbor_common::url::INTERNAL_SCHEME;

/// Served for a page's directory (`harbor://home/`).
const INDEX_FILE: &str = "index.html";

/// Serves files from a base directory, plus in-memory overrides.
pub struct ContentProvider {
    base_dir: PathBuf,
    overrides: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Register an asset that is served from memory instead of disk.
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    /// Resolve a request URI (`harbor://home/app.js`) to MIME type and bytes.
    pub fn resolve_uri(&self, uri: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        self.resolve(&asset_path(uri)?)
    }

    /// Resolve a relative asset path to MIME type and bytes.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.trim_start_matches('/');

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the base.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Owned(mime.to_string()), Cow::Owned(data)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Turn a `harbor://` request URI into an asset path.
///
/// WebView2 rewrites custom protocols as `http://harbor.<host>/`, so that
/// form is accepted too. Query and fragment are dropped.
pub fn asset_path(uri: &str) -> Option<String> {
    let custom = format!("{INTERNAL_SCHEME}://");
    let rewritten_http = format!("http://{INTERNAL_SCHEME}.");
    let rewritten_https = format!("https://{INTERNAL_SCHEME}.");

    let rest = uri
        .strip_prefix(custom.as_str())
        .or_else(|| uri.strip_prefix(rewritten_http.as_str()))
        .or_else(|| uri.strip_prefix(rewritten_https.as_str()))?;
    let rest = rest.split(['?', '#']).next().unwrap_or("");

    // Page names never contain dots, which keeps `https://harbor.example.com`
    // from passing as the rewritten form.
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    if host.is_empty() || host.contains(['.', ':']) {
        return None;
    }
    if path.is_empty() || path.ends_with('/') {
        return Some(format!("{host}/{path}{INDEX_FILE}"));
    }
    Some(format!("{host}/{path}"))
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        std::fs::write(dir.path().join("home/index.html"), "<html>home</html>").unwrap();
        std::fs::write(dir.path().join("home/app.js"), "start()").unwrap();
        std::fs::write(dir.path().join("secret.txt"), "outside").unwrap();
        dir
    }

    // -----------------------------------------------------------------
    // URI mapping
    // -----------------------------------------------------------------

    #[test]
    fn page_root_maps_to_index() {
        assert_eq!(asset_path("harbor://home").as_deref(), Some("home/index.html"));
        assert_eq!(asset_path("harbor://home/").as_deref(), Some("home/index.html"));
        assert_eq!(
            asset_path("harbor://history/?q=rust#top").as_deref(),
            Some("history/index.html")
        );
    }

    #[test]
    fn nested_asset_keeps_path() {
        assert_eq!(asset_path("harbor://home/app.js").as_deref(), Some("home/app.js"));
        assert_eq!(
            asset_path("harbor://find/css/bar.css?v=2").as_deref(),
            Some("find/css/bar.css")
        );
    }

    #[test]
    fn webview2_rewritten_uri_is_accepted() {
        assert_eq!(
            asset_path("http://harbor.information/").as_deref(),
            Some("information/index.html")
        );
        assert_eq!(
            asset_path("https://harbor.chrome/main.js").as_deref(),
            Some("chrome/main.js")
        );
    }

    #[test]
    fn foreign_uris_are_rejected() {
        assert!(asset_path("https://example.com/index.html").is_none());
        assert!(asset_path("harbor://").is_none());
        assert!(asset_path("file:///etc/passwd").is_none());
        assert!(asset_path("https://harbor.example.com/").is_none());
    }

    // -----------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------

    #[test]
    fn resolves_page_and_asset() {
        let dir = assets();
        let cp = ContentProvider::new(dir.path());

        let (mime, data) = cp.resolve_uri("harbor://home").unwrap();
        assert_eq!(mime.as_ref(), "text/html");
        assert_eq!(data.as_ref(), b"<html>home</html>");

        let (mime, _) = cp.resolve_uri("harbor://home/app.js").unwrap();
        assert_eq!(mime.as_ref(), "application/javascript");
    }

    #[test]
    fn traversal_is_blocked() {
        let dir = assets();
        let cp = ContentProvider::new(dir.path().join("home"));
        assert!(cp.resolve("../secret.txt").is_none());
        assert!(cp.resolve("/etc/passwd").is_none());
        assert!(cp.resolve_uri("harbor://home/../../secret.txt").is_none());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = assets();
        let cp = ContentProvider::new(dir.path());
        assert!(cp.resolve_uri("harbor://settings").is_none());
    }

    #[test]
    fn override_takes_precedence() {
        let dir = assets();
        let mut cp = ContentProvider::new(dir.path());
        cp.add_override("home/index.html", "text/html", b"<html>override</html>".to_vec());
        cp.add_override("find/index.html", "text/html", b"<html>find</html>".to_vec());

        let (_, data) = cp.resolve_uri("harbor://home").unwrap();
        assert_eq!(data.as_ref(), b"<html>override</html>");
        let (_, data) = cp.resolve_uri("harbor://find").unwrap();
        assert_eq!(data.as_ref(), b"<html>find</html>");
    }

    // -----------------------------------------------------------------
    // MIME types
    // -----------------------------------------------------------------

    #[test]
    fn mime_types() {
        assert_eq!(mime_from_extension(Path::new("a.htm")), "text/html");
        assert_eq!(mime_from_extension(Path::new("a.mjs")), "application/javascript");
        assert_eq!(mime_from_extension(Path::new("icon.svg")), "image/svg+xml");
        assert_eq!(
            mime_from_extension(Path::new("data.xyz")),
            "application/octet-stream"
        );
    }
}
