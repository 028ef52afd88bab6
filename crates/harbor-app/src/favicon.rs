//! Favicon downloads for the shell's `FetchFavicon` tasks.
//!
//! Icons are handed to the chrome page as `data:` URLs so it never has to
//! load third-party images itself.

use std::time::Duration;

use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Icons larger than this are dropped.
const MAX_ICON_BYTES: usize = 512 * 1024;

/// HTTP client shared by all favicon fetches.
pub fn client() -> Option<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("harbor/", env!("CARGO_PKG_VERSION")))
        .build()
        .ok()
}

/// Download `icon_url` and encode it as a data URL. `None` on any failure.
pub async fn fetch_favicon(client: &reqwest::Client, icon_url: &str) -> Option<String> {
    if icon_url.starts_with("data:") {
        return Some(icon_url.to_string());
    }
    if !(icon_url.starts_with("http://") || icon_url.starts_with("https://")) {
        return None;
    }

    let response = match client.get(icon_url).send().await {
        Ok(r) => r,
        Err(e) => {
            debug!(icon_url, "favicon request failed: {e}");
            return None;
        }
    };
    if !response.status().is_success() {
        debug!(icon_url, status = %response.status(), "favicon not available");
        return None;
    }

    let mime = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .filter(|m| m.starts_with("image/"))
        .map(str::to_string)
        .unwrap_or_else(|| mime_from_url(icon_url).to_string());

    let bytes = read_capped(response, icon_url).await?;
    if bytes.is_empty() {
        debug!(icon_url, "favicon body empty");
        return None;
    }
    Some(data_url(&mime, &bytes))
}

/// Read the body chunk by chunk, giving up as soon as it grows past
/// [`MAX_ICON_BYTES`]. A declared oversized length is rejected unread.
async fn read_capped(mut response: reqwest::Response, icon_url: &str) -> Option<Vec<u8>> {
    if let Some(length) = response.content_length() {
        if length > MAX_ICON_BYTES as u64 {
            debug!(icon_url, length, "favicon size rejected");
            return None;
        }
    }

    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if body.len() + chunk.len() > MAX_ICON_BYTES {
                    debug!(icon_url, "favicon body exceeds size limit");
                    return None;
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => return Some(body),
            Err(e) => {
                debug!(icon_url, "favicon body failed: {e}");
                return None;
            }
        }
    }
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

fn mime_from_url(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/x-icon",
    }
}
