use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use harbor_common::{Rect, Size, WindowId};
use harbor_shell::host::{SurfaceId, SurfaceKind, SurfaceSpec, WindowSpec};
use wry::WebView;

use super::page::PageState;

/// One shell window. `window` and `chrome` stay `None` until realized.
pub(crate) struct WindowEntry {
    pub spec: WindowSpec,
    pub window: Option<Rc<winit::window::Window>>,
    /// Full-window page that renders tabs, toolbar and menus.
    pub chrome: Option<WebView>,
    pub size: Size,
    pub title: String,
    pub fullscreen: bool,
    pub maximized: bool,
    /// Attached surfaces, bottom to top.
    pub attached: Vec<SurfaceId>,
    /// Latest payload per chrome channel, replayed when the chrome reloads.
    pub pushed: BTreeMap<String, serde_json::Value>,
}

impl WindowEntry {
    pub fn new(spec: WindowSpec, size: Size) -> Self {
        Self {
            title: spec.title.clone(),
            spec,
            window: None,
            chrome: None,
            size,
            fullscreen: false,
            maximized: false,
            attached: Vec::new(),
            pushed: BTreeMap::new(),
        }
    }

    pub fn is_realized(&self) -> bool {
        self.window.is_some()
    }
}

/// One tab or dialog. `webview` stays `None` until its window is realized,
/// and again while it is being moved to another window.
pub(crate) struct SurfaceEntry {
    pub window: WindowId,
    pub spec: SurfaceSpec,
    pub webview: Option<WebView>,
    pub page: Arc<Mutex<PageState>>,
    pub bounds: Rect,
    pub zoom: f64,
    pub muted: bool,
    pub visible: bool,
    pub destroyed: bool,
}

impl SurfaceEntry {
    pub fn new(window: WindowId, spec: SurfaceSpec) -> Self {
        Self {
            window,
            page: Arc::new(Mutex::new(PageState::new(&spec.url))),
            spec,
            webview: None,
            bounds: Rect::default(),
            zoom: 1.0,
            muted: false,
            visible: false,
            destroyed: false,
        }
    }

    pub fn is_dialog(&self) -> bool {
        self.spec.kind == SurfaceKind::Dialog
    }
}

/// Every window and surface the host has handed out.
#[derive(Default)]
pub(crate) struct Registry {
    pub windows: BTreeMap<WindowId, WindowEntry>,
    pub surfaces: BTreeMap<SurfaceId, SurfaceEntry>,
    next_window: u32,
    next_surface: u32,
}

impl Registry {
    pub fn insert_window(&mut self, spec: WindowSpec, size: Size) -> WindowId {
        self.next_window += 1;
        let id = WindowId(self.next_window);
        self.windows.insert(id, WindowEntry::new(spec, size));
        id
    }

    pub fn insert_surface(&mut self, window: WindowId, spec: SurfaceSpec) -> SurfaceId {
        self.next_surface += 1;
        let id = SurfaceId(self.next_surface);
        self.surfaces.insert(id, SurfaceEntry::new(window, spec));
        id
    }

    /// Show `surface` topmost in `window`, detaching it from any other.
    /// Returns the window it previously belonged to when that differs.
    pub fn attach(&mut self, window: WindowId, surface: SurfaceId) -> Option<WindowId> {
        let previous = self.surfaces.get(&surface).map(|s| s.window)?;
        if !self.windows.contains_key(&window) {
            return None;
        }
        if previous != window {
            if let Some(old) = self.windows.get_mut(&previous) {
                old.attached.retain(|s| *s != surface);
            }
        }
        if let Some(entry) = self.windows.get_mut(&window) {
            entry.attached.retain(|s| *s != surface);
            entry.attached.push(surface);
        }
        if let Some(entry) = self.surfaces.get_mut(&surface) {
            entry.window = window;
            entry.visible = true;
        }
        (previous != window).then_some(previous)
    }

    pub fn detach(&mut self, window: WindowId, surface: SurfaceId) {
        if let Some(entry) = self.windows.get_mut(&window) {
            entry.attached.retain(|s| *s != surface);
        }
        if let Some(entry) = self.surfaces.get_mut(&surface) {
            if entry.window == window {
                entry.visible = false;
            }
        }
    }

    /// Windows still waiting for an OS window.
    pub fn unrealized_windows(&self) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|(_, w)| !w.is_realized())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Live surfaces in a realized window that have no WebView yet.
    pub fn unbuilt_surfaces(&self) -> Vec<SurfaceId> {
        self.surfaces
            .iter()
            .filter(|(_, s)| {
                !s.destroyed
                    && s.webview.is_none()
                    && self
                        .windows
                        .get(&s.window)
                        .is_some_and(WindowEntry::is_realized)
            })
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn window_for_os_window(&self, os: winit::window::WindowId) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|(_, w)| w.window.as_ref().is_some_and(|win| win.id() == os))
            .map(|(id, _)| *id)
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
