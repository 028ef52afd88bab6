//! The seam between the shell and the embedding host runtime.
//!
//! The shell never talks to a browser engine or windowing system directly.
//! Everything it needs goes through these traits: [`HostRuntime`] creates
//! windows and surfaces, [`HostWindow`] is one OS window, and
//! [`ContentSurface`] is one embedded web-content area (a tab or a dialog).
//!
//! `headless` is an in-memory implementation that records every call.

mod events;
pub mod headless;

pub use events::*;

use std::fmt;
use std::path::{Path, PathBuf};

use harbor_common::{EditCommand, HostError, ProfileId, Rect, Size, WindowId};
use harbor_config::schema::ThemeMode;
use serde::{Deserialize, Serialize};

use crate::menu::{Menu, TouchBar};

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Host-assigned identifier of a content surface. Views and dialogs reuse it
/// as their own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// A browsing tab.
    View,
    /// An overlay dialog page.
    Dialog,
}

/// What to create a surface for.
#[derive(Debug, Clone)]
pub struct SurfaceSpec {
    pub url: String,
    pub kind: SurfaceKind,
    pub profile: ProfileId,
    pub incognito: bool,
}

#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub title: String,
    pub profile: ProfileId,
    pub incognito: bool,
}

/// Options for a find-in-page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    pub forward: bool,
    /// `true` starts a new search, `false` moves within the current one.
    pub find_next: bool,
    pub match_case: bool,
}

/// What to do with the current selection when a find session stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopFindAction {
    ClearSelection,
    #[default]
    KeepSelection,
    ActivateSelection,
}

/// A captured frame of a surface, as a PNG data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

/// One embedded web-content area.
pub trait ContentSurface {
    fn id(&self) -> SurfaceId;

    // -- Navigation --
    fn load_url(&mut self, url: &str);
    fn url(&self) -> String;
    fn title(&self) -> String;
    fn is_loading(&self) -> bool;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self, ignore_cache: bool);
    fn stop(&mut self);

    // -- Audio / zoom --
    fn is_audio_muted(&self) -> bool;
    fn set_audio_muted(&mut self, muted: bool);
    fn is_currently_audible(&self) -> bool;
    fn zoom_factor(&self) -> f64;
    fn set_zoom_factor(&mut self, factor: f64);

    // -- Find --
    fn find_in_page(&mut self, text: &str, options: FindOptions);
    fn stop_find_in_page(&mut self, action: StopFindAction);

    // -- Geometry --
    fn bounds(&self) -> Rect;
    fn set_bounds(&mut self, bounds: Rect);

    // -- Page operations --
    fn capture_page(&mut self, area: Rect) -> HostResult<Thumbnail>;
    fn save_page(&mut self, path: &Path) -> HostResult<()>;
    fn print(&mut self);
    fn open_devtools(&mut self);
    fn edit(&mut self, command: EditCommand);
    fn download_url(&mut self, url: &str);
    fn toggle_picture_in_picture(&mut self);

    /// Push a message to the page on `channel`.
    fn send(&mut self, channel: &str, payload: serde_json::Value);
    fn focus(&mut self);

    fn is_destroyed(&self) -> bool;
    fn destroy(&mut self);
}

/// One top-level OS window. It also hosts the chrome UI that receives
/// pushes from [`HostWindow::send`].
pub trait HostWindow {
    fn id(&self) -> WindowId;
    fn content_size(&self) -> Size;
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn is_maximized(&self) -> bool;
    fn title(&self) -> String;
    fn set_title(&mut self, title: &str);

    /// Show `surface` in this window, topmost.
    fn attach_surface(&mut self, surface: SurfaceId);
    fn detach_surface(&mut self, surface: SurfaceId);

    /// Push a message to the chrome UI on `channel`.
    fn send(&mut self, channel: &str, payload: serde_json::Value);

    fn set_application_menu(&mut self, menu: &Menu);
    fn supports_touch_bar(&self) -> bool {
        false
    }
    fn set_touch_bar(&mut self, _touch_bar: &TouchBar) {}
    fn popup_menu(&mut self, menu: &Menu);

    fn focus(&mut self);
    fn close(&mut self);
}

/// Factory and process-level services of the host.
pub trait HostRuntime {
    fn create_window(&mut self, spec: &WindowSpec) -> HostResult<Box<dyn HostWindow>>;
    fn create_surface(
        &mut self,
        window: WindowId,
        spec: &SurfaceSpec,
    ) -> HostResult<Box<dyn ContentSurface>>;

    fn write_clipboard_text(&mut self, text: &str) -> HostResult<()>;
    /// Ask the user where to save; `None` when cancelled.
    fn show_save_dialog(&mut self, default_path: &Path) -> Option<PathBuf>;
    fn set_theme(&mut self, theme: ThemeMode);

    fn is_emoji_panel_supported(&self) -> bool {
        false
    }
    fn show_emoji_panel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_id_display() {
        assert_eq!(SurfaceId(3).to_string(), "surface-3");
    }

    #[test]
    fn stop_find_action_serialization() {
        let json = serde_json::to_string(&StopFindAction::ClearSelection).unwrap();
        assert_eq!(json, "\"clearSelection\"");
        assert_eq!(StopFindAction::default(), StopFindAction::KeepSelection);
    }
}
