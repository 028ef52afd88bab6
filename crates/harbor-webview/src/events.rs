//! Events collected from WebViews and windows for the shell.

use harbor_common::WindowId;
use harbor_shell::host::{MediaKind, SurfaceEvent, SurfaceId, WindowEvent};
use harbor_shell::menu::ContextMenuParams;
use harbor_shell::IpcSender;
use serde::Deserialize;

use crate::ipc::SURFACE_KIND_PREFIX;

/// Everything the application loop forwards to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Surface {
        surface: SurfaceId,
        event: SurfaceEvent,
    },
    Window {
        window: WindowId,
        event: WindowEvent,
    },
    /// A shell request posted by a page.
    Ipc { sender: IpcSender, body: String },
}

/// Surface events for one wry page-load callback.
///
/// wry reports only start and finish, so the finer-grained lifecycle is
/// synthesized in the order the shell expects.
pub fn page_load_events(event: wry::PageLoadEvent, url: &str) -> Vec<SurfaceEvent> {
    match event {
        wry::PageLoadEvent::Started => vec![
            SurfaceEvent::DidStartLoading,
            SurfaceEvent::DidStartNavigation {
                url: url.to_string(),
                in_place: false,
                main_frame: true,
            },
        ],
        wry::PageLoadEvent::Finished => vec![
            SurfaceEvent::DidNavigate {
                url: url.to_string(),
            },
            SurfaceEvent::DidFrameFinishLoad { main_frame: true },
            SurfaceEvent::DidFinishLoad,
            SurfaceEvent::DidStopLoading,
        ],
    }
}

#[derive(Deserialize)]
struct RawMessage {
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct FaviconPayload {
    favicons: Vec<String>,
}

#[derive(Deserialize)]
struct ThemeColorPayload {
    color: Option<String>,
}

#[derive(Deserialize)]
struct MediaPayload {
    kind: MediaKind,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoundPayload {
    active_match_ordinal: u32,
    matches: u32,
    final_update: bool,
}

/// What an IPC body from a content surface turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum PageMessage {
    /// Posted by the page script; already translated.
    Surface(SurfaceEvent),
    /// A `surface:*` message that did not parse.
    Malformed(String),
    /// Anything else: a request for the shell.
    Request,
}

/// Classify an IPC body posted by a surface.
pub fn classify_page_message(body: &str) -> PageMessage {
    let Ok(raw) = serde_json::from_str::<RawMessage>(body) else {
        return PageMessage::Request;
    };
    let Some(event) = raw.kind.strip_prefix(SURFACE_KIND_PREFIX) else {
        return PageMessage::Request;
    };
    match surface_event(event, raw.payload) {
        Some(e) => PageMessage::Surface(e),
        None => PageMessage::Malformed(raw.kind),
    }
}

fn surface_event(event: &str, payload: serde_json::Value) -> Option<SurfaceEvent> {
    let e = match event {
        "dom-ready" => SurfaceEvent::DomReady,
        "favicon" => {
            let p: FaviconPayload = serde_json::from_value(payload).ok()?;
            SurfaceEvent::PageFaviconUpdated {
                favicons: p.favicons,
            }
        }
        "theme-color" => {
            let p: ThemeColorPayload = serde_json::from_value(payload).ok()?;
            SurfaceEvent::DidChangeThemeColor { color: p.color }
        }
        "media-started" => {
            let p: MediaPayload = serde_json::from_value(payload).ok()?;
            SurfaceEvent::MediaStarted { kind: p.kind }
        }
        "media-paused" => SurfaceEvent::MediaPaused,
        "enter-fullscreen" => SurfaceEvent::EnterHtmlFullScreen,
        "leave-fullscreen" => SurfaceEvent::LeaveHtmlFullScreen,
        "context-menu" => {
            let p: ContextMenuParams = serde_json::from_value(payload).ok()?;
            SurfaceEvent::ContextMenu(p)
        }
        "found-in-page" => {
            let p: FoundPayload = serde_json::from_value(payload).ok()?;
            SurfaceEvent::FoundInPage {
                active_match_ordinal: p.active_match_ordinal,
                matches: p.matches,
                final_update: p.final_update,
            }
        }
        _ => return None,
    };
    Some(e)
}
