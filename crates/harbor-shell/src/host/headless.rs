//! In-memory host runtime.
//!
//! Every window and surface writes into one shared [`HostState`], so a test
//! (or `harbor --headless`) can drive the shell and then inspect exactly
//! what the host was asked to do. Navigation completes synchronously.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use harbor_common::{EditCommand, HostError, Rect, Size, WindowId};
use harbor_config::schema::ThemeMode;

use super::{
    ContentSurface, FindOptions, HostResult, HostRuntime, HostWindow, StopFindAction, SurfaceId,
    SurfaceKind, SurfaceSpec, Thumbnail, WindowSpec,
};
use crate::menu::{Menu, TouchBar};

pub const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 1280,
    height: 800,
};

#[derive(Debug, Clone)]
pub struct SurfaceRecord {
    pub id: SurfaceId,
    pub window: WindowId,
    pub kind: SurfaceKind,
    /// Session history; `index` points at the current entry.
    pub history: Vec<String>,
    pub index: usize,
    pub title: String,
    pub loading: bool,
    pub muted: bool,
    pub audible: bool,
    pub zoom: f64,
    pub bounds: Rect,
    pub reloads: Vec<bool>,
    pub stops: u32,
    pub find_requests: Vec<(String, FindOptions)>,
    pub find_stopped: Vec<StopFindAction>,
    pub sent: Vec<(String, serde_json::Value)>,
    pub edits: Vec<EditCommand>,
    pub downloads: Vec<String>,
    pub saved: Vec<PathBuf>,
    pub prints: u32,
    pub devtools_opened: u32,
    pub pip_toggles: u32,
    pub captures: u32,
    pub focused: bool,
    pub fail_capture: bool,
    pub fail_save: bool,
    pub destroyed: bool,
}

impl SurfaceRecord {
    fn new(id: SurfaceId, window: WindowId, spec: &SurfaceSpec) -> Self {
        Self {
            id,
            window,
            kind: spec.kind,
            history: vec![spec.url.clone()],
            index: 0,
            title: String::new(),
            loading: false,
            muted: false,
            audible: false,
            zoom: 1.0,
            bounds: Rect::default(),
            reloads: Vec::new(),
            stops: 0,
            find_requests: Vec::new(),
            find_stopped: Vec::new(),
            sent: Vec::new(),
            edits: Vec::new(),
            downloads: Vec::new(),
            saved: Vec::new(),
            prints: 0,
            devtools_opened: 0,
            pip_toggles: 0,
            captures: 0,
            focused: false,
            fail_capture: false,
            fail_save: false,
            destroyed: false,
        }
    }

    pub fn url(&self) -> &str {
        self.history.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// Messages sent on `channel`, oldest first.
    pub fn sent_on(&self, channel: &str) -> Vec<&serde_json::Value> {
        self.sent
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, v)| v)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub incognito: bool,
    pub size: Size,
    pub fullscreen: bool,
    pub maximized: bool,
    /// Attached surfaces, bottom to top.
    pub attached: Vec<SurfaceId>,
    pub sent: Vec<(String, serde_json::Value)>,
    pub application_menu: Option<Menu>,
    pub touch_bar: Option<TouchBar>,
    pub popups: Vec<Menu>,
    pub focused: bool,
    pub closed: bool,
}

impl WindowRecord {
    pub fn sent_on(&self, channel: &str) -> Vec<&serde_json::Value> {
        self.sent
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn top_surface(&self) -> Option<SurfaceId> {
        self.attached.last().copied()
    }
}

#[derive(Debug, Default)]
pub struct HostState {
    pub windows: BTreeMap<WindowId, WindowRecord>,
    pub surfaces: BTreeMap<SurfaceId, SurfaceRecord>,
    pub clipboard: Option<String>,
    pub theme: Option<ThemeMode>,
    /// Answer for the next save dialog; `None` cancels.
    pub save_dialog_answer: Option<PathBuf>,
    pub save_dialog_requests: Vec<PathBuf>,
    pub emoji_panel_supported: bool,
    pub emoji_panel_shown: u32,
    pub touch_bar_supported: bool,
    pub fail_create_surface: bool,
    next_window: u32,
    next_surface: u32,
}

impl HostState {
    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.get(&id)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&SurfaceRecord> {
        self.surfaces.get(&id)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceRecord> {
        self.surfaces.get_mut(&id)
    }

    pub fn live_surfaces(&self) -> impl Iterator<Item = &SurfaceRecord> {
        self.surfaces.values().filter(|s| !s.destroyed)
    }
}

/// Handle to the shared headless state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost(Rc<RefCell<HostState>>);

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runtime(&self) -> Box<dyn HostRuntime> {
        Box::new(HeadlessRuntime { state: self.clone() })
    }

    pub fn state(&self) -> Ref<'_, HostState> {
        self.0.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, HostState> {
        self.0.borrow_mut()
    }

    /// Build a standalone surface, for tests that need a view without a shell.
    pub fn surface(&self, window: WindowId, url: &str) -> Box<dyn ContentSurface> {
        let spec = SurfaceSpec {
            url: url.to_string(),
            kind: SurfaceKind::View,
            profile: harbor_common::ProfileId::from("test"),
            incognito: false,
        };
        Box::new(self.new_surface(window, &spec))
    }

    fn new_surface(&self, window: WindowId, spec: &SurfaceSpec) -> HeadlessSurface {
        let mut state = self.state_mut();
        state.next_surface += 1;
        let id = SurfaceId(state.next_surface);
        state
            .surfaces
            .insert(id, SurfaceRecord::new(id, window, spec));
        HeadlessSurface {
            id,
            host: self.clone(),
        }
    }

    fn with_surface<R>(&self, id: SurfaceId, f: impl FnOnce(&mut SurfaceRecord) -> R) -> Option<R> {
        self.state_mut().surfaces.get_mut(&id).map(f)
    }

    fn read_surface<R>(&self, id: SurfaceId, f: impl FnOnce(&SurfaceRecord) -> R) -> Option<R> {
        self.state().surfaces.get(&id).map(f)
    }

    fn with_window<R>(&self, id: WindowId, f: impl FnOnce(&mut WindowRecord) -> R) -> Option<R> {
        self.state_mut().windows.get_mut(&id).map(f)
    }

    fn read_window<R>(&self, id: WindowId, f: impl FnOnce(&WindowRecord) -> R) -> Option<R> {
        self.state().windows.get(&id).map(f)
    }
}

// =============================================================================
// RUNTIME
// =============================================================================

struct HeadlessRuntime {
    state: HeadlessHost,
}

impl HostRuntime for HeadlessRuntime {
    fn create_window(&mut self, spec: &WindowSpec) -> HostResult<Box<dyn HostWindow>> {
        let mut state = self.state.state_mut();
        state.next_window += 1;
        let id = WindowId(state.next_window);
        state.windows.insert(
            id,
            WindowRecord {
                id,
                title: spec.title.clone(),
                incognito: spec.incognito,
                size: DEFAULT_WINDOW_SIZE,
                fullscreen: false,
                maximized: false,
                attached: Vec::new(),
                sent: Vec::new(),
                application_menu: None,
                touch_bar: None,
                popups: Vec::new(),
                focused: true,
                closed: false,
            },
        );
        Ok(Box::new(HeadlessWindow {
            id,
            host: self.state.clone(),
        }))
    }

    fn create_surface(
        &mut self,
        window: WindowId,
        spec: &SurfaceSpec,
    ) -> HostResult<Box<dyn ContentSurface>> {
        {
            let state = self.state.state();
            if state.fail_create_surface {
                return Err(HostError::Engine("surface creation disabled".into()));
            }
            if !state.windows.contains_key(&window) {
                return Err(HostError::WindowNotFound(window.to_string()));
            }
        }
        Ok(Box::new(self.state.new_surface(window, spec)))
    }

    fn write_clipboard_text(&mut self, text: &str) -> HostResult<()> {
        self.state.state_mut().clipboard = Some(text.to_string());
        Ok(())
    }

    fn show_save_dialog(&mut self, default_path: &Path) -> Option<PathBuf> {
        let mut state = self.state.state_mut();
        state.save_dialog_requests.push(default_path.to_path_buf());
        state.save_dialog_answer.clone()
    }

    fn set_theme(&mut self, theme: ThemeMode) {
        self.state.state_mut().theme = Some(theme);
    }

    fn is_emoji_panel_supported(&self) -> bool {
        self.state.state().emoji_panel_supported
    }

    fn show_emoji_panel(&mut self) {
        self.state.state_mut().emoji_panel_shown += 1;
    }
}

// =============================================================================
// WINDOW
// =============================================================================

struct HeadlessWindow {
    id: WindowId,
    host: HeadlessHost,
}

impl HostWindow for HeadlessWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn content_size(&self) -> Size {
        self.host
            .read_window(self.id, |w| w.size)
            .unwrap_or_default()
    }

    fn is_fullscreen(&self) -> bool {
        self.host
            .read_window(self.id, |w| w.fullscreen)
            .unwrap_or(false)
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.host.with_window(self.id, |w| w.fullscreen = fullscreen);
    }

    fn is_maximized(&self) -> bool {
        self.host
            .read_window(self.id, |w| w.maximized)
            .unwrap_or(false)
    }

    fn title(&self) -> String {
        self.host
            .read_window(self.id, |w| w.title.clone())
            .unwrap_or_default()
    }

    fn set_title(&mut self, title: &str) {
        self.host
            .with_window(self.id, |w| w.title = title.to_string());
    }

    fn attach_surface(&mut self, surface: SurfaceId) {
        self.host.with_window(self.id, |w| {
            w.attached.retain(|s| *s != surface);
            w.attached.push(surface);
        });
        self.host.with_surface(surface, |s| s.window = self.id);
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        self.host
            .with_window(self.id, |w| w.attached.retain(|s| *s != surface));
    }

    fn send(&mut self, channel: &str, payload: serde_json::Value) {
        self.host
            .with_window(self.id, |w| w.sent.push((channel.to_string(), payload)));
    }

    fn set_application_menu(&mut self, menu: &Menu) {
        self.host
            .with_window(self.id, |w| w.application_menu = Some(menu.clone()));
    }

    fn supports_touch_bar(&self) -> bool {
        self.host.state().touch_bar_supported
    }

    fn set_touch_bar(&mut self, touch_bar: &TouchBar) {
        self.host
            .with_window(self.id, |w| w.touch_bar = Some(touch_bar.clone()));
    }

    fn popup_menu(&mut self, menu: &Menu) {
        self.host
            .with_window(self.id, |w| w.popups.push(menu.clone()));
    }

    fn focus(&mut self) {
        self.host.with_window(self.id, |w| w.focused = true);
    }

    fn close(&mut self) {
        self.host.with_window(self.id, |w| {
            w.closed = true;
            w.attached.clear();
        });
    }
}

// =============================================================================
// SURFACE
// =============================================================================

struct HeadlessSurface {
    id: SurfaceId,
    host: HeadlessHost,
}

impl ContentSurface for HeadlessSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load_url(&mut self, url: &str) {
        self.host.with_surface(self.id, |s| {
            s.history.truncate(s.index + 1);
            s.history.push(url.to_string());
            s.index = s.history.len() - 1;
        });
    }

    fn url(&self) -> String {
        self.host
            .read_surface(self.id, |s| s.url().to_string())
            .unwrap_or_default()
    }

    fn title(&self) -> String {
        self.host
            .read_surface(self.id, |s| {
                if s.title.is_empty() {
                    s.url().to_string()
                } else {
                    s.title.clone()
                }
            })
            .unwrap_or_default()
    }

    fn is_loading(&self) -> bool {
        self.host.read_surface(self.id, |s| s.loading).unwrap_or(false)
    }

    fn can_go_back(&self) -> bool {
        self.host.read_surface(self.id, |s| s.index > 0).unwrap_or(false)
    }

    fn can_go_forward(&self) -> bool {
        self.host
            .read_surface(self.id, |s| s.index + 1 < s.history.len())
            .unwrap_or(false)
    }

    fn go_back(&mut self) {
        self.host.with_surface(self.id, |s| {
            s.index = s.index.saturating_sub(1);
        });
    }

    fn go_forward(&mut self) {
        self.host.with_surface(self.id, |s| {
            if s.index + 1 < s.history.len() {
                s.index += 1;
            }
        });
    }

    fn reload(&mut self, ignore_cache: bool) {
        self.host
            .with_surface(self.id, |s| s.reloads.push(ignore_cache));
    }

    fn stop(&mut self) {
        self.host.with_surface(self.id, |s| {
            s.stops += 1;
            s.loading = false;
        });
    }

    fn is_audio_muted(&self) -> bool {
        self.host.read_surface(self.id, |s| s.muted).unwrap_or(false)
    }

    fn set_audio_muted(&mut self, muted: bool) {
        self.host.with_surface(self.id, |s| s.muted = muted);
    }

    fn is_currently_audible(&self) -> bool {
        self.host.read_surface(self.id, |s| s.audible).unwrap_or(false)
    }

    fn zoom_factor(&self) -> f64 {
        self.host.read_surface(self.id, |s| s.zoom).unwrap_or(1.0)
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        self.host.with_surface(self.id, |s| s.zoom = factor);
    }

    fn find_in_page(&mut self, text: &str, options: FindOptions) {
        self.host.with_surface(self.id, |s| {
            s.find_requests.push((text.to_string(), options))
        });
    }

    fn stop_find_in_page(&mut self, action: StopFindAction) {
        self.host
            .with_surface(self.id, |s| s.find_stopped.push(action));
    }

    fn bounds(&self) -> Rect {
        self.host.read_surface(self.id, |s| s.bounds).unwrap_or_default()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.host.with_surface(self.id, |s| s.bounds = bounds);
    }

    fn capture_page(&mut self, area: Rect) -> HostResult<Thumbnail> {
        self.host
            .with_surface(self.id, |s| {
                s.captures += 1;
                if s.fail_capture {
                    Err(HostError::Engine("capture failed".into()))
                } else {
                    Ok(Thumbnail {
                        width: area.width,
                        height: area.height,
                        data_url: "data:image/png;base64,".into(),
                    })
                }
            })
            .unwrap_or_else(|| Err(HostError::SurfaceDestroyed(self.id.to_string())))
    }

    fn save_page(&mut self, path: &Path) -> HostResult<()> {
        self.host
            .with_surface(self.id, |s| {
                if s.fail_save {
                    Err(HostError::Engine("save failed".into()))
                } else {
                    s.saved.push(path.to_path_buf());
                    Ok(())
                }
            })
            .unwrap_or_else(|| Err(HostError::SurfaceDestroyed(self.id.to_string())))
    }

    fn print(&mut self) {
        self.host.with_surface(self.id, |s| s.prints += 1);
    }

    fn open_devtools(&mut self) {
        self.host.with_surface(self.id, |s| s.devtools_opened += 1);
    }

    fn edit(&mut self, command: EditCommand) {
        self.host.with_surface(self.id, |s| s.edits.push(command));
    }

    fn download_url(&mut self, url: &str) {
        self.host
            .with_surface(self.id, |s| s.downloads.push(url.to_string()));
    }

    fn toggle_picture_in_picture(&mut self) {
        self.host.with_surface(self.id, |s| s.pip_toggles += 1);
    }

    fn send(&mut self, channel: &str, payload: serde_json::Value) {
        self.host
            .with_surface(self.id, |s| s.sent.push((channel.to_string(), payload)));
    }

    fn focus(&mut self) {
        self.host.with_surface(self.id, |s| s.focused = true);
    }

    fn is_destroyed(&self) -> bool {
        self.host.read_surface(self.id, |s| s.destroyed).unwrap_or(true)
    }

    fn destroy(&mut self) {
        let window = self.host.with_surface(self.id, |s| {
            s.destroyed = true;
            s.window
        });
        if let Some(window) = window {
            let id = self.id;
            self.host
                .with_window(window, |w| w.attached.retain(|s| *s != id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_common::ProfileId;

    fn window_spec() -> WindowSpec {
        WindowSpec {
            title: "Harbor".into(),
            profile: ProfileId::from("p"),
            incognito: false,
        }
    }

    fn surface_spec(url: &str) -> SurfaceSpec {
        SurfaceSpec {
            url: url.into(),
            kind: SurfaceKind::View,
            profile: ProfileId::from("p"),
            incognito: false,
        }
    }

    #[test]
    fn navigation_history() {
        let host = HeadlessHost::new();
        let mut surface = host.surface(WindowId(1), "https://a.example");
        assert!(!surface.can_go_back());

        surface.load_url("https://b.example");
        assert!(surface.can_go_back());
        assert!(!surface.can_go_forward());

        surface.go_back();
        assert_eq!(surface.url(), "https://a.example");
        assert!(surface.can_go_forward());

        surface.load_url("https://c.example");
        assert!(!surface.can_go_forward());
        assert_eq!(host.state().surface(surface.id()).unwrap().history.len(), 2);
    }

    #[test]
    fn title_falls_back_to_url() {
        let host = HeadlessHost::new();
        let surface = host.surface(WindowId(1), "https://a.example");
        assert_eq!(surface.title(), "https://a.example");

        host.state_mut().surface_mut(surface.id()).unwrap().title = "A".into();
        assert_eq!(surface.title(), "A");
    }

    #[test]
    fn window_attach_keeps_topmost_last() {
        let host = HeadlessHost::new();
        let mut runtime = host.runtime();
        let mut window = runtime.create_window(&window_spec()).unwrap();
        let a = runtime.create_surface(window.id(), &surface_spec("a")).unwrap();
        let b = runtime.create_surface(window.id(), &surface_spec("b")).unwrap();

        window.attach_surface(a.id());
        window.attach_surface(b.id());
        window.attach_surface(a.id());

        let state = host.state();
        let record = state.window(window.id()).unwrap();
        assert_eq!(record.attached, vec![b.id(), a.id()]);
        assert_eq!(record.top_surface(), Some(a.id()));
    }

    #[test]
    fn destroy_detaches() {
        let host = HeadlessHost::new();
        let mut runtime = host.runtime();
        let mut window = runtime.create_window(&window_spec()).unwrap();
        let mut surface = runtime.create_surface(window.id(), &surface_spec("a")).unwrap();
        window.attach_surface(surface.id());

        surface.destroy();
        assert!(surface.is_destroyed());
        assert!(host.state().window(window.id()).unwrap().attached.is_empty());
    }

    #[test]
    fn create_surface_for_unknown_window_fails() {
        let host = HeadlessHost::new();
        let mut runtime = host.runtime();
        let result = runtime.create_surface(WindowId(42), &surface_spec("a"));
        assert!(matches!(result, Err(HostError::WindowNotFound(_))));
    }

    #[test]
    fn save_dialog_answer() {
        let host = HeadlessHost::new();
        let mut runtime = host.runtime();
        assert!(runtime.show_save_dialog(Path::new("/tmp/page.html")).is_none());

        host.state_mut().save_dialog_answer = Some(PathBuf::from("/tmp/out.html"));
        assert_eq!(
            runtime.show_save_dialog(Path::new("/tmp/page.html")),
            Some(PathBuf::from("/tmp/out.html"))
        );
        assert_eq!(host.state().save_dialog_requests.len(), 2);
    }
}
