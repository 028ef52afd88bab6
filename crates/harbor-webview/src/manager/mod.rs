//! WebView and window lifecycle management.
//!
//! [`WryHost`] owns every OS window and WebView. The shell reaches it
//! through the [`HostRuntime`] returned by [`WryHost::runtime`]; the
//! application loop calls [`WryHost::realize`], forwards winit window
//! events to [`WryHost::handle_window_event`] and feeds
//! [`WryHost::drain_events`] back to the shell.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use harbor_common::{Rect, Size, WindowId};
use harbor_config::schema::ThemeMode;
use harbor_shell::host::{HostRuntime, SurfaceEvent, SurfaceId, WindowEvent};
use thiserror::Error;
use tracing::debug;

use crate::clipboard::Clipboard;
use crate::content::ContentProvider;
use crate::events::HostEvent;
use crate::ipc::js_dispatch_message;

mod handle;
pub mod handlers;
mod lifecycle;
mod page;
mod registry;
mod types;

pub use page::{NavHistory, PageState};
pub use types::WebViewConfig;

use registry::Registry;

#[derive(Debug, Error)]
pub enum RealizeError {
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("webview creation failed: {0}")]
    WebView(#[from] wry::Error),

    #[error("{0} no longer exists")]
    Gone(String),
}

/// Where wry callbacks leave their events until the loop drains them.
#[derive(Clone, Default)]
pub(crate) struct EventSink {
    events: Arc<Mutex<Vec<HostEvent>>>,
    chrome_loaded: Arc<Mutex<Vec<WindowId>>>,
}

impl EventSink {
    pub fn push(&self, event: HostEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    pub fn push_surface(&self, surface: SurfaceId, event: SurfaceEvent) {
        self.push(HostEvent::Surface { surface, event });
    }

    pub fn push_window(&self, window: WindowId, event: WindowEvent) {
        self.push(HostEvent::Window { window, event });
    }

    pub fn chrome_loaded(&self, window: WindowId) {
        if let Ok(mut loaded) = self.chrome_loaded.lock() {
            loaded.push(window);
        }
    }

    fn take_events(&self) -> Vec<HostEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn take_chrome_loaded(&self) -> Vec<WindowId> {
        self.chrome_loaded
            .lock()
            .map(|mut loaded| std::mem::take(&mut *loaded))
            .unwrap_or_default()
    }
}

pub(crate) struct HostShared {
    pub registry: Registry,
    pub config: WebViewConfig,
    pub content: Option<Arc<ContentProvider>>,
    pub clipboard: Option<Clipboard>,
    pub theme: ThemeMode,
    pub sink: EventSink,
}

/// Handle to the wry host. Clones share the same windows and WebViews.
#[derive(Clone)]
pub struct WryHost {
    pub(crate) shared: Rc<RefCell<HostShared>>,
}

impl WryHost {
    pub fn new(config: WebViewConfig) -> Self {
        Self {
            shared: Rc::new(RefCell::new(HostShared {
                registry: Registry::default(),
                config,
                content: None,
                clipboard: None,
                theme: ThemeMode::default(),
                sink: EventSink::default(),
            })),
        }
    }

    /// Serve `harbor://` from `provider`.
    pub fn set_content_provider(&self, provider: ContentProvider) {
        self.shared.borrow_mut().content = Some(Arc::new(provider));
    }

    /// The runtime to hand to the shell.
    pub fn runtime(&self) -> Box<dyn HostRuntime> {
        Box::new(handle::WryRuntime { host: self.clone() })
    }

    /// True while some window or surface still waits for [`Self::realize`].
    pub fn needs_realize(&self) -> bool {
        let shared = self.shared.borrow();
        !shared.registry.unrealized_windows().is_empty()
            || !shared.registry.unbuilt_surfaces().is_empty()
    }

    /// Drain pending events. Chrome pages that finished loading get the
    /// latest payload of every channel again first.
    pub fn drain_events(&self) -> Vec<HostEvent> {
        let shared = self.shared.borrow();
        for window in shared.sink.take_chrome_loaded() {
            let Some(entry) = shared.registry.windows.get(&window) else {
                continue;
            };
            let Some(chrome) = &entry.chrome else {
                continue;
            };
            debug!(window_id = %window, channels = entry.pushed.len(), "replaying chrome state");
            for (channel, payload) in &entry.pushed {
                if let Err(e) = chrome.evaluate_script(&js_dispatch_message(channel, payload)) {
                    debug!(window_id = %window, channel, "chrome replay failed: {e}");
                }
            }
        }
        shared.sink.take_events()
    }

    /// Translate a winit window event for the shell.
    pub fn handle_window_event(
        &self,
        os_window: winit::window::WindowId,
        event: &winit::event::WindowEvent,
    ) {
        let mut shared = self.shared.borrow_mut();
        let Some(id) = shared.registry.window_for_os_window(os_window) else {
            return;
        };
        let sink = shared.sink.clone();
        let Some(entry) = shared.registry.windows.get_mut(&id) else {
            return;
        };

        match event {
            winit::event::WindowEvent::Resized(physical) => {
                let Some(window) = entry.window.clone() else {
                    return;
                };
                let logical = physical.to_logical::<u32>(window.scale_factor());
                entry.size = Size::new(logical.width, logical.height);
                if let Some(chrome) = &entry.chrome {
                    if let Err(e) = chrome.set_bounds(wry_rect(full_rect(entry.size))) {
                        debug!(window_id = %id, "chrome resize failed: {e}");
                    }
                }

                let fullscreen = window.fullscreen().is_some();
                if fullscreen != entry.fullscreen {
                    entry.fullscreen = fullscreen;
                    sink.push_window(id, WindowEvent::FullscreenChanged(fullscreen));
                }
                let maximized = window.is_maximized();
                if maximized != entry.maximized {
                    entry.maximized = maximized;
                    sink.push_window(id, WindowEvent::MaximizedChanged(maximized));
                }
                sink.push_window(id, WindowEvent::Resized(entry.size));
            }
            winit::event::WindowEvent::Focused(true) => {
                sink.push_window(id, WindowEvent::Focused);
            }
            winit::event::WindowEvent::CloseRequested => {
                sink.push_window(id, WindowEvent::CloseRequested);
            }
            _ => {}
        }
    }

    /// How many shell windows exist, realized or not.
    pub fn window_count(&self) -> usize {
        self.shared.borrow().registry.windows.len()
    }
}

pub(crate) fn full_rect(size: Size) -> Rect {
    Rect::new(0, 0, size.width, size.height)
}

pub(crate) fn wry_rect(rect: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::LogicalPosition::new(rect.x, rect.y).into(),
        size: wry::dpi::LogicalSize::new(rect.width, rect.height).into(),
    }
}

pub(crate) fn winit_theme(theme: ThemeMode) -> Option<winit::window::Theme> {
    match theme {
        ThemeMode::System => None,
        ThemeMode::Light => Some(winit::window::Theme::Light),
        ThemeMode::Dark => Some(winit::window::Theme::Dark),
    }
}
