use std::sync::{Arc, Mutex};

use harbor_common::url::INTERNAL_SCHEME;
use harbor_common::WindowId;
use harbor_shell::host::{SurfaceEvent, SurfaceId, WindowDisposition};
use harbor_shell::IpcSender;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::content::asset_path;
use crate::events::{classify_page_message, page_load_events, HostEvent, PageMessage};

use super::page::PageState;
use super::EventSink;

// =============================================================================
// NAVIGATION POLICY
// =============================================================================

/// Schemes a tab may navigate to. `javascript:` and `data:` top-level
/// navigations are refused.
pub const ALLOWED_SCHEMES: &[&str] = &[
    "http",
    "https",
    INTERNAL_SCHEME,
    "about",
    "file",
    "view-source",
];

fn scheme(url: &str) -> Option<String> {
    let (scheme, _) = url.split_once(':')?;
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| scheme.to_ascii_lowercase())
}

/// Whether a tab may navigate to `url`.
pub fn is_navigation_allowed(url: &str) -> bool {
    scheme(url.trim()).is_some_and(|s| ALLOWED_SCHEMES.contains(&s.as_str()))
}

/// Whether a chrome or dialog page may navigate to `url`: only bundled
/// pages and `about:blank`.
pub fn is_internal_navigation_allowed(url: &str) -> bool {
    url == "about:blank" || asset_path(url).is_some()
}

/// Whether `url` is one of the browser's own pages. Only those may send
/// shell requests from a tab.
pub fn is_internal_page(url: &str) -> bool {
    asset_path(url).is_some()
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn is_valid_json(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body).is_ok()
}

fn lock_page(page: &Mutex<PageState>) -> Option<std::sync::MutexGuard<'_, PageState>> {
    page.lock().ok()
}

pub(super) fn attach_surface_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    sink: EventSink,
    page: Arc<Mutex<PageState>>,
    id: SurfaceId,
    trusted: bool,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body();
        match classify_page_message(body) {
            PageMessage::Surface(event) => {
                if let Some(mut p) = lock_page(&page) {
                    match event {
                        SurfaceEvent::MediaStarted { .. } => p.audible = true,
                        SurfaceEvent::MediaPaused => p.audible = false,
                        _ => {}
                    }
                }
                sink.push_surface(id, event);
            }
            PageMessage::Malformed(kind) => {
                warn!(surface_id = %id, kind, "malformed page event dropped");
            }
            PageMessage::Request => {
                let internal = lock_page(&page).is_some_and(|p| is_internal_page(&p.url));
                if !trusted && !internal {
                    warn!(surface_id = %id, "IPC request from web content rejected");
                    return;
                }
                if !is_valid_json(body) {
                    warn!(
                        surface_id = %id,
                        body_len = body.len(),
                        "IPC message rejected: invalid JSON"
                    );
                    return;
                }
                debug!(surface_id = %id, body_len = body.len(), "IPC message from page");
                sink.push(HostEvent::Ipc {
                    sender: IpcSender::Surface(id),
                    body: body.clone(),
                });
            }
        }
    })
}

pub(super) fn attach_chrome_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    sink: EventSink,
    window: WindowId,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body();
        if !is_valid_json(body) {
            warn!(
                window_id = %window,
                body_len = body.len(),
                "IPC message rejected: invalid JSON"
            );
            return;
        }
        debug!(window_id = %window, body_len = body.len(), "IPC message from chrome");
        sink.push(HostEvent::Ipc {
            sender: IpcSender::Window(window),
            body: body.clone(),
        });
    })
}

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    sink: EventSink,
    page: Arc<Mutex<PageState>>,
    id: SurfaceId,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        debug!(surface_id = %id, ?event, url = %url, "page load");
        if let Some(mut p) = lock_page(&page) {
            match event {
                wry::PageLoadEvent::Started => {
                    p.loading = true;
                    p.title.clear();
                }
                wry::PageLoadEvent::Finished => {
                    p.loading = false;
                    p.history.commit(&url);
                }
            }
            p.url = url.clone();
        }
        for e in page_load_events(event, &url) {
            sink.push_surface(id, e);
        }
    })
}

pub(super) fn attach_chrome_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    sink: EventSink,
    window: WindowId,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, _url| {
        if matches!(event, wry::PageLoadEvent::Finished) {
            debug!(window_id = %window, "chrome loaded");
            sink.chrome_loaded(window);
        }
    })
}

pub(super) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    sink: EventSink,
    page: Arc<Mutex<PageState>>,
    id: SurfaceId,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(surface_id = %id, title = %title, "title changed");
        if let Some(mut p) = lock_page(&page) {
            p.title = title.clone();
        }
        sink.push_surface(id, SurfaceEvent::PageTitleUpdated { title });
    })
}

pub(super) fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    id: SurfaceId,
    internal_only: bool,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        let allowed = if internal_only {
            is_internal_navigation_allowed(&url)
        } else {
            is_navigation_allowed(&url)
        };
        if !allowed {
            warn!(surface_id = %id, url = %url, "navigation blocked");
        }
        allowed
    })
}

pub(super) fn attach_internal_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    window: WindowId,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        let allowed = is_internal_navigation_allowed(&url);
        if !allowed {
            warn!(window_id = %window, url = %url, "chrome navigation blocked");
        }
        allowed
    })
}

/// Pages asking for a new window become shell requests; the engine never
/// opens one itself.
pub(super) fn attach_new_window_handler<'a>(
    builder: WebViewBuilder<'a>,
    sink: EventSink,
    id: SurfaceId,
) -> WebViewBuilder<'a> {
    builder.with_new_window_req_handler(move |url| {
        debug!(surface_id = %id, url = %url, "new window requested");
        sink.push_surface(
            id,
            SurfaceEvent::NewWindowRequested {
                url,
                frame_name: String::new(),
                disposition: WindowDisposition::ForegroundTab,
            },
        );
        false
    })
}

pub(super) fn attach_download_handler<'a>(
    builder: WebViewBuilder<'a>,
    id: SurfaceId,
) -> WebViewBuilder<'a> {
    builder.with_download_started_handler(move |url, destination| {
        if let Some(dir) = dirs::download_dir() {
            if let Some(name) = destination.file_name() {
                *destination = dir.join(name);
            }
        }
        debug!(surface_id = %id, url = %url, path = %destination.display(), "download started");
        true
    })
}

// =============================================================================
// TESTS
// =============================================================================
