use harbor_common::Size;
use serde::{Deserialize, Serialize};

use crate::menu::ContextMenuParams;

/// Where the engine wants a page-opened link to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowDisposition {
    NewWindow,
    ForegroundTab,
    BackgroundTab,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

/// Lifecycle events of a content surface, delivered in order on the
/// shell's thread.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    DidStartLoading,
    DidStopLoading,
    DidFinishLoad,
    DidFailLoad {
        code: i32,
        description: String,
    },
    DidStartNavigation {
        url: String,
        in_place: bool,
        main_frame: bool,
    },
    DidNavigate {
        url: String,
    },
    DidFrameFinishLoad {
        main_frame: bool,
    },
    DomReady,
    PageTitleUpdated {
        title: String,
    },
    PageFaviconUpdated {
        favicons: Vec<String>,
    },
    DidChangeThemeColor {
        color: Option<String>,
    },
    FoundInPage {
        active_match_ordinal: u32,
        matches: u32,
        final_update: bool,
    },
    MediaStarted {
        kind: MediaKind,
    },
    MediaPaused,
    EnterHtmlFullScreen,
    LeaveHtmlFullScreen,
    ContextMenu(ContextMenuParams),
    NewWindowRequested {
        url: String,
        frame_name: String,
        disposition: WindowDisposition,
    },
    Destroyed,
}

/// Events of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Resized(Size),
    FullscreenChanged(bool),
    MaximizedChanged(bool),
    Focused,
    CloseRequested,
}
