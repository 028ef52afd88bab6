//! [`HostRuntime`], [`HostWindow`] and [`ContentSurface`] over the registry.
//!
//! Handles are ids plus a [`WryHost`]; every call looks its entry up. A call
//! on an entry without a WebView yet is recorded (URL, bounds, zoom) and
//! applied when the WebView is built, or dropped when it has no lasting
//! effect.

use std::path::{Path, PathBuf};

use harbor_common::{EditCommand, HostError, Rect, Size, WindowId};
use harbor_config::schema::ThemeMode;
use harbor_shell::host::{
    ContentSurface, FindOptions, HostResult, HostRuntime, HostWindow, StopFindAction, SurfaceId,
    SurfaceSpec, Thumbnail, WindowSpec,
};
use harbor_shell::menu::Menu;
use tracing::{debug, info, warn};
use winit::window::Fullscreen;

use crate::clipboard::Clipboard;
use crate::ipc::{js_dispatch_message, APPLICATION_MENU_CHANNEL, POPUP_MENU_CHANNEL};
use crate::scripts;

use super::page::PageState;
use super::registry::{SurfaceEntry, WindowEntry};
use super::{winit_theme, wry_rect, WryHost};

fn engine_error(e: wry::Error) -> HostError {
    HostError::Engine(e.to_string())
}

// =============================================================================
// RUNTIME
// =============================================================================

pub(super) struct WryRuntime {
    pub(super) host: WryHost,
}

impl HostRuntime for WryRuntime {
    fn create_window(&mut self, spec: &WindowSpec) -> HostResult<Box<dyn HostWindow>> {
        let mut shared = self.host.shared.borrow_mut();
        let size = shared.config.window_size;
        let id = shared.registry.insert_window(spec.clone(), size);
        debug!(window_id = %id, profile = %spec.profile, "window requested");
        Ok(Box::new(WryWindow {
            id,
            host: self.host.clone(),
        }))
    }

    fn create_surface(
        &mut self,
        window: WindowId,
        spec: &SurfaceSpec,
    ) -> HostResult<Box<dyn ContentSurface>> {
        let (id, realized) = {
            let mut shared = self.host.shared.borrow_mut();
            let realized = match shared.registry.windows.get(&window) {
                Some(entry) => entry.is_realized(),
                None => return Err(HostError::WindowNotFound(window.to_string())),
            };
            (shared.registry.insert_surface(window, spec.clone()), realized)
        };
        if realized {
            if let Err(e) = self.host.build_surface(id) {
                self.host.shared.borrow_mut().registry.surfaces.remove(&id);
                return Err(HostError::Engine(e.to_string()));
            }
        }
        Ok(Box::new(WrySurface {
            id,
            host: self.host.clone(),
        }))
    }

    fn write_clipboard_text(&mut self, text: &str) -> HostResult<()> {
        let mut shared = self.host.shared.borrow_mut();
        if shared.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| HostError::Engine(e.to_string()))?;
            shared.clipboard = Some(clipboard);
        }
        match shared.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| HostError::Engine(e.to_string())),
            None => Err(HostError::Unsupported("clipboard".into())),
        }
    }

    /// There is no native file picker; pages are saved straight into the
    /// downloads directory under the suggested name.
    fn show_save_dialog(&mut self, default_path: &Path) -> Option<PathBuf> {
        let dir = dirs::download_dir().or_else(dirs::home_dir)?;
        let name = default_path.file_name()?;
        let path = dir.join(name);
        info!(path = %path.display(), "saving without prompt");
        Some(path)
    }

    fn set_theme(&mut self, theme: ThemeMode) {
        let mut shared = self.host.shared.borrow_mut();
        shared.theme = theme;
        for entry in shared.registry.windows.values() {
            if let Some(window) = &entry.window {
                window.set_theme(winit_theme(theme));
            }
        }
    }
}

// =============================================================================
// WINDOW
// =============================================================================

struct WryWindow {
    id: WindowId,
    host: WryHost,
}

impl WryWindow {
    fn with_entry<R>(&self, f: impl FnOnce(&mut WindowEntry) -> R) -> Option<R> {
        self.host
            .shared
            .borrow_mut()
            .registry
            .windows
            .get_mut(&self.id)
            .map(f)
    }

    fn read_entry<R>(&self, f: impl FnOnce(&WindowEntry) -> R) -> Option<R> {
        self.host
            .shared
            .borrow()
            .registry
            .windows
            .get(&self.id)
            .map(f)
    }

    /// Push to the chrome page. Remembered payloads are replayed after the
    /// chrome reloads.
    fn dispatch(&mut self, channel: &str, payload: serde_json::Value, remember: bool) {
        let id = self.id;
        self.with_entry(|entry| {
            if let Some(chrome) = &entry.chrome {
                if let Err(e) = chrome.evaluate_script(&js_dispatch_message(channel, &payload)) {
                    debug!(window_id = %id, channel, "chrome push failed: {e}");
                }
            }
            if remember {
                entry.pushed.insert(channel.to_string(), payload);
            }
        });
    }
}

impl HostWindow for WryWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn content_size(&self) -> Size {
        self.read_entry(|w| w.size).unwrap_or_default()
    }

    fn is_fullscreen(&self) -> bool {
        self.read_entry(|w| w.fullscreen).unwrap_or(false)
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.with_entry(|w| {
            w.fullscreen = fullscreen;
            if let Some(window) = &w.window {
                window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
            }
        });
    }

    fn is_maximized(&self) -> bool {
        self.read_entry(|w| w.maximized).unwrap_or(false)
    }

    fn title(&self) -> String {
        self.read_entry(|w| w.title.clone()).unwrap_or_default()
    }

    fn set_title(&mut self, title: &str) {
        self.with_entry(|w| {
            w.title = title.to_string();
            if let Some(window) = &w.window {
                window.set_title(title);
            }
        });
    }

    fn attach_surface(&mut self, surface: SurfaceId) {
        let mut shared = self.host.shared.borrow_mut();
        let moved_from = shared.registry.attach(self.id, surface);
        let Some(entry) = shared.registry.surfaces.get_mut(&surface) else {
            return;
        };
        if let Some(previous) = moved_from {
            // A WebView cannot change parents; it is rebuilt in this window
            // from the URL it was showing.
            debug!(surface_id = %surface, from = %previous, to = %self.id, "surface moved");
            entry.webview = None;
        } else if let Some(webview) = &entry.webview {
            if let Err(e) = webview.set_visible(true) {
                debug!(surface_id = %surface, "show failed: {e}");
            }
        }
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        let mut shared = self.host.shared.borrow_mut();
        shared.registry.detach(self.id, surface);
        let Some(entry) = shared.registry.surfaces.get(&surface) else {
            return;
        };
        if entry.visible {
            return;
        }
        if let Some(webview) = &entry.webview {
            if let Err(e) = webview.set_visible(false) {
                debug!(surface_id = %surface, "hide failed: {e}");
            }
        }
    }

    fn send(&mut self, channel: &str, payload: serde_json::Value) {
        self.dispatch(channel, payload, true);
    }

    fn set_application_menu(&mut self, menu: &Menu) {
        match serde_json::to_value(menu) {
            Ok(value) => self.dispatch(APPLICATION_MENU_CHANNEL, value, true),
            Err(e) => warn!(window_id = %self.id, "application menu not serializable: {e}"),
        }
    }

    /// The chrome page draws the menu and answers with an `action` request.
    fn popup_menu(&mut self, menu: &Menu) {
        match serde_json::to_value(menu) {
            Ok(value) => self.dispatch(POPUP_MENU_CHANNEL, value, false),
            Err(e) => warn!(window_id = %self.id, "popup menu not serializable: {e}"),
        }
    }

    fn focus(&mut self) {
        self.read_entry(|w| {
            if let Some(window) = &w.window {
                window.focus_window();
            }
        });
    }

    fn close(&mut self) {
        self.host.discard_window(self.id);
    }
}

// =============================================================================
// SURFACE
// =============================================================================

struct WrySurface {
    id: SurfaceId,
    host: WryHost,
}

impl WrySurface {
    fn with_entry<R>(&self, f: impl FnOnce(&mut SurfaceEntry) -> R) -> Option<R> {
        self.host
            .shared
            .borrow_mut()
            .registry
            .surfaces
            .get_mut(&self.id)
            .filter(|s| !s.destroyed)
            .map(f)
    }

    fn read_entry<R>(&self, f: impl FnOnce(&SurfaceEntry) -> R) -> Option<R> {
        self.host
            .shared
            .borrow()
            .registry
            .surfaces
            .get(&self.id)
            .filter(|s| !s.destroyed)
            .map(f)
    }

    fn read_page<R>(&self, f: impl FnOnce(&PageState) -> R) -> Option<R> {
        self.read_entry(|s| s.page.lock().ok().map(|p| f(&p)))
            .flatten()
    }

    fn with_page<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> Option<R> {
        self.read_entry(|s| s.page.lock().ok().map(|mut p| f(&mut p)))
            .flatten()
    }

    /// Run `js` in the page; dropped while the WebView does not exist.
    fn eval(&self, js: &str) {
        let id = self.id;
        self.read_entry(|s| match &s.webview {
            Some(webview) => {
                if let Err(e) = webview.evaluate_script(js) {
                    debug!(surface_id = %id, "script failed: {e}");
                }
            }
            None => debug!(surface_id = %id, "script dropped: webview not built"),
        });
    }

    fn with_webview(&self, name: &str, f: impl FnOnce(&wry::WebView) -> wry::Result<()>) {
        let id = self.id;
        self.read_entry(|s| {
            if let Some(webview) = &s.webview {
                if let Err(e) = f(webview) {
                    warn!(surface_id = %id, "{name} failed: {e}");
                }
            }
        });
    }
}

impl ContentSurface for WrySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    // -- Navigation --

    fn load_url(&mut self, url: &str) {
        self.with_page(|p| p.url = url.to_string());
        self.with_webview("load_url", |w| w.load_url(url));
    }

    fn url(&self) -> String {
        self.read_page(|p| p.url.clone()).unwrap_or_default()
    }

    fn title(&self) -> String {
        self.read_page(PageState::display_title).unwrap_or_default()
    }

    fn is_loading(&self) -> bool {
        self.read_page(|p| p.loading).unwrap_or(false)
    }

    fn can_go_back(&self) -> bool {
        self.read_page(|p| p.history.can_go_back()).unwrap_or(false)
    }

    fn can_go_forward(&self) -> bool {
        self.read_page(|p| p.history.can_go_forward())
            .unwrap_or(false)
    }

    fn go_back(&mut self) {
        if self.with_page(|p| p.history.begin_back()) == Some(true) {
            self.eval(scripts::GO_BACK);
        }
    }

    fn go_forward(&mut self) {
        if self.with_page(|p| p.history.begin_forward()) == Some(true) {
            self.eval(scripts::GO_FORWARD);
        }
    }

    fn reload(&mut self, ignore_cache: bool) {
        if ignore_cache {
            debug!(surface_id = %self.id, "cache bypass not available, plain reload");
        }
        self.eval(scripts::RELOAD);
    }

    fn stop(&mut self) {
        self.eval(scripts::STOP);
    }

    // -- Audio / zoom --

    fn is_audio_muted(&self) -> bool {
        self.read_entry(|s| s.muted).unwrap_or(false)
    }

    fn set_audio_muted(&mut self, muted: bool) {
        self.with_entry(|s| s.muted = muted);
        self.eval(&scripts::set_muted(muted));
    }

    fn is_currently_audible(&self) -> bool {
        !self.is_audio_muted() && self.read_page(|p| p.audible).unwrap_or(false)
    }

    fn zoom_factor(&self) -> f64 {
        self.read_entry(|s| s.zoom).unwrap_or(1.0)
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        self.with_entry(|s| s.zoom = factor);
        self.with_webview("zoom", |w| w.zoom(factor));
    }

    // -- Find --

    fn find_in_page(&mut self, text: &str, options: FindOptions) {
        self.eval(&scripts::find(text, options));
    }

    fn stop_find_in_page(&mut self, action: StopFindAction) {
        self.eval(&scripts::stop_find(action));
    }

    // -- Geometry --

    fn bounds(&self) -> Rect {
        self.read_entry(|s| s.bounds).unwrap_or_default()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.with_entry(|s| s.bounds = bounds);
        self.with_webview("set_bounds", |w| w.set_bounds(wry_rect(bounds)));
    }

    // -- Page operations --

    fn capture_page(&mut self, _area: Rect) -> HostResult<Thumbnail> {
        Err(HostError::Unsupported("capture_page".into()))
    }

    /// Writes the serialized document once the page hands it back.
    fn save_page(&mut self, path: &Path) -> HostResult<()> {
        let id = self.id;
        let target = path.to_path_buf();
        self.read_entry(|s| {
            let webview = s
                .webview
                .as_ref()
                .ok_or_else(|| HostError::SurfaceDestroyed(id.to_string()))?;
            webview
                .evaluate_script_with_callback(scripts::OUTER_HTML, move |result| {
                    let html = match serde_json::from_str::<String>(&result) {
                        Ok(html) => html,
                        Err(e) => {
                            warn!(surface_id = %id, "page source unreadable: {e}");
                            return;
                        }
                    };
                    match std::fs::write(&target, html) {
                        Ok(()) => info!(surface_id = %id, path = %target.display(), "page saved"),
                        Err(e) => warn!(surface_id = %id, path = %target.display(), "save failed: {e}"),
                    }
                })
                .map_err(engine_error)
        })
        .unwrap_or_else(|| Err(HostError::SurfaceDestroyed(id.to_string())))
    }

    fn print(&mut self) {
        self.with_webview("print", |w| w.print());
    }

    fn open_devtools(&mut self) {
        self.with_webview("open_devtools", |w| {
            w.open_devtools();
            Ok(())
        });
    }

    fn edit(&mut self, command: EditCommand) {
        self.eval(&scripts::edit(command));
    }

    fn download_url(&mut self, url: &str) {
        self.eval(&scripts::download(url));
    }

    fn toggle_picture_in_picture(&mut self) {
        self.eval(scripts::TOGGLE_PICTURE_IN_PICTURE);
    }

    fn send(&mut self, channel: &str, payload: serde_json::Value) {
        self.eval(&js_dispatch_message(channel, &payload));
    }

    fn focus(&mut self) {
        self.with_webview("focus", |w| w.focus());
    }

    fn is_destroyed(&self) -> bool {
        self.read_entry(|_| ()).is_none()
    }

    fn destroy(&mut self) {
        let mut shared = self.host.shared.borrow_mut();
        let Some(entry) = shared.registry.surfaces.remove(&self.id) else {
            return;
        };
        if let Some(window) = shared.registry.windows.get_mut(&entry.window) {
            window.attached.retain(|s| *s != self.id);
        }
        drop(entry.webview);
        debug!(surface_id = %self.id, "surface destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::WebViewConfig;
    use harbor_common::ProfileId;
    use harbor_shell::host::SurfaceKind;

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

    /// Before realization nothing touches wry, so calls can be observed
    /// through the recorded state.
    #[test]
    fn unrealized_surface_records_state() {
        let host = WryHost::new(WebViewConfig::default());
        let mut runtime = host.runtime();
        let mut window = runtime.create_window(&window_spec()).unwrap();
        let mut surface = runtime
            .create_surface(window.id(), &surface_spec("https://a.example/"))
            .unwrap();

        assert_eq!(surface.url(), "https://a.example/");
        assert_eq!(surface.title(), "https://a.example/");
        surface.load_url("https://b.example/");
        surface.set_bounds(Rect::new(0, 50, 1280, 750));
        surface.set_zoom_factor(1.5);
        surface.set_audio_muted(true);

        assert_eq!(surface.url(), "https://b.example/");
        assert_eq!(surface.bounds(), Rect::new(0, 50, 1280, 750));
        assert_eq!(surface.zoom_factor(), 1.5);
        assert!(surface.is_audio_muted());
        assert!(!surface.is_currently_audible());
        assert!(!surface.can_go_back());
        assert!(surface.capture_page(Rect::default()).is_err());
        assert!(surface.save_page(Path::new("/tmp/x.html")).is_err());

        window.attach_surface(surface.id());
        window.set_title("B - Harbor");
        assert_eq!(window.title(), "B - Harbor");

        surface.destroy();
        assert!(surface.is_destroyed());
        assert_eq!(surface.url(), "");
    }

    #[test]
    fn surface_for_unknown_window_fails() {
        let host = WryHost::new(WebViewConfig::default());
        let mut runtime = host.runtime();
        let err = runtime
            .create_surface(WindowId(9), &surface_spec("https://a.example/"))
            .err()
            .unwrap();
        assert!(matches!(err, HostError::WindowNotFound(_)));
    }

    #[test]
    fn closing_window_destroys_its_surfaces() {
        let host = WryHost::new(WebViewConfig::default());
        let mut runtime = host.runtime();
        let mut window = runtime.create_window(&window_spec()).unwrap();
        let surface = runtime
            .create_surface(window.id(), &surface_spec("https://a.example/"))
            .unwrap();

        window.close();
        assert!(surface.is_destroyed());
        assert_eq!(host.window_count(), 0);
        assert_eq!(window.content_size(), Size::default());
    }

    #[test]
    fn fullscreen_is_remembered_until_realized() {
        let host = WryHost::new(WebViewConfig::default());
        let mut runtime = host.runtime();
        let mut window = runtime.create_window(&window_spec()).unwrap();
        window.set_fullscreen(true);
        assert!(window.is_fullscreen());
        assert!(!window.supports_touch_bar());
    }
}
