use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use harbor_common::url::INTERNAL_SCHEME;
use harbor_common::WindowId;
use harbor_shell::host::{SurfaceEvent, SurfaceId, WindowEvent};
use tracing::{debug, error, info, warn};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window};
use wry::http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use wry::http::{Response, StatusCode};
use wry::WebViewBuilder;

use crate::content::ContentProvider;
use crate::ipc::init_script;
use crate::scripts::PAGE_SCRIPT;

use super::handlers;
use super::types::WebViewConfig;
use super::{full_rect, winit_theme, wry_rect, RealizeError, WryHost};

/// The chrome page every window loads underneath its surfaces.
pub const CHROME_URL: &str = "harbor://chrome";

impl WryHost {
    /// Create OS windows and WebViews for everything the shell asked for
    /// since the last call. Must run inside the event loop.
    pub fn realize(&self, event_loop: &ActiveEventLoop) {
        let windows = self.shared.borrow().registry.unrealized_windows();
        for id in windows {
            if let Err(e) = self.realize_window(event_loop, id) {
                error!(window_id = %id, "failed to realize window: {e}");
                // Let the shell close it like any other window.
                self.shared
                    .borrow()
                    .sink
                    .push_window(id, WindowEvent::CloseRequested);
                self.discard_window(id);
            }
        }

        let surfaces = self.shared.borrow().registry.unbuilt_surfaces();
        for id in surfaces {
            if let Err(e) = self.build_surface(id) {
                error!(surface_id = %id, "failed to build webview: {e}");
                let mut shared = self.shared.borrow_mut();
                if let Some(entry) = shared.registry.surfaces.get_mut(&id) {
                    entry.destroyed = true;
                }
                shared.sink.push_surface(id, SurfaceEvent::Destroyed);
            }
        }
    }

    fn realize_window(
        &self,
        event_loop: &ActiveEventLoop,
        id: WindowId,
    ) -> Result<(), RealizeError> {
        let mut shared = self.shared.borrow_mut();
        let theme = shared.theme;
        let sink = shared.sink.clone();
        let config = shared.config.clone();
        let content = shared.content.clone();
        let entry = shared
            .registry
            .windows
            .get_mut(&id)
            .ok_or_else(|| RealizeError::Gone(id.to_string()))?;

        let attrs = Window::default_attributes()
            .with_title(entry.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(entry.size.width),
                f64::from(entry.size.height),
            ))
            .with_theme(winit_theme(theme));
        let window = Rc::new(event_loop.create_window(attrs)?);
        if entry.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let mut builder = base_builder(&config, content.as_ref())
            .with_bounds(wry_rect(full_rect(entry.size)))
            .with_url(CHROME_URL);
        builder = handlers::attach_chrome_ipc_handler(builder, sink.clone(), id);
        builder = handlers::attach_chrome_load_handler(builder, sink, id);
        builder = handlers::attach_internal_navigation_handler(builder, id);
        let chrome = builder.build_as_child(&*window)?;

        entry.window = Some(window);
        entry.chrome = Some(chrome);
        info!(window_id = %id, profile = %entry.spec.profile, "window realized");
        Ok(())
    }

    /// Build the WebView of a surface inside its (realized) window.
    pub(crate) fn build_surface(&self, id: SurfaceId) -> Result<(), RealizeError> {
        let mut shared = self.shared.borrow_mut();
        let sink = shared.sink.clone();
        let config = shared.config.clone();
        let content = shared.content.clone();

        let (window_id, url, bounds, visible, zoom, page, dialog) = {
            let entry = shared
                .registry
                .surfaces
                .get(&id)
                .ok_or_else(|| RealizeError::Gone(id.to_string()))?;
            let url = entry
                .page
                .lock()
                .map(|p| p.url.clone())
                .unwrap_or_else(|_| entry.spec.url.clone());
            (
                entry.window,
                url,
                entry.bounds,
                entry.visible,
                entry.zoom,
                Arc::clone(&entry.page),
                entry.is_dialog(),
            )
        };
        let window = shared
            .registry
            .windows
            .get(&window_id)
            .and_then(|w| w.window.clone())
            .ok_or_else(|| RealizeError::Gone(window_id.to_string()))?;

        let mut builder = base_builder(&config, content.as_ref())
            .with_initialization_script(PAGE_SCRIPT)
            .with_bounds(wry_rect(bounds))
            .with_visible(visible)
            .with_url(url.as_str());
        builder = handlers::attach_surface_ipc_handler(
            builder,
            sink.clone(),
            Arc::clone(&page),
            id,
            dialog,
        );
        builder = handlers::attach_page_load_handler(builder, sink.clone(), Arc::clone(&page), id);
        builder = handlers::attach_title_handler(builder, sink.clone(), page, id);
        builder = handlers::attach_navigation_handler(builder, id, dialog);
        builder = handlers::attach_new_window_handler(builder, sink, id);
        builder = handlers::attach_download_handler(builder, id);

        let webview = builder.build_as_child(&*window)?;
        if (zoom - 1.0).abs() > f64::EPSILON {
            if let Err(e) = webview.zoom(zoom) {
                warn!(surface_id = %id, "zoom restore failed: {e}");
            }
        }

        if let Some(entry) = shared.registry.surfaces.get_mut(&id) {
            entry.webview = Some(webview);
        }
        debug!(surface_id = %id, window_id = %window_id, url = %url, "webview built");
        Ok(())
    }

    /// Drop a window and everything in it.
    pub(crate) fn discard_window(&self, id: WindowId) {
        let mut shared = self.shared.borrow_mut();
        let Some(entry) = shared.registry.windows.remove(&id) else {
            return;
        };
        for surface in shared.registry.surfaces.values_mut() {
            if surface.window == id {
                surface.webview = None;
                surface.destroyed = true;
            }
        }
        // WebViews must go before their parent window.
        drop(entry.chrome);
        drop(entry.window);
        debug!(window_id = %id, "window discarded");
    }
}

/// Builder settings shared by chrome and surface WebViews.
fn base_builder<'a>(
    config: &WebViewConfig,
    content: Option<&Arc<ContentProvider>>,
) -> WebViewBuilder<'a> {
    let mut builder = WebViewBuilder::new()
        .with_devtools(config.devtools)
        .with_clipboard(config.clipboard)
        .with_autoplay(config.autoplay)
        .with_focused(false)
        .with_initialization_script(&init_script());

    if let Some(ua) = &config.user_agent {
        builder = builder.with_user_agent(ua);
    }
    if let Some(provider) = content {
        builder = attach_custom_protocol(builder, Arc::clone(provider));
    }
    builder
}

fn attach_custom_protocol<'a>(
    builder: WebViewBuilder<'a>,
    provider: Arc<ContentProvider>,
) -> WebViewBuilder<'a> {
    builder.with_custom_protocol(INTERNAL_SCHEME.to_string(), move |_webview_id, request| {
        let uri = request.uri().to_string();
        match provider.resolve_uri(&uri) {
            Some((mime, data)) => protocol_response(StatusCode::OK, &mime, data.into_owned()),
            None => {
                warn!(uri = %uri, "custom protocol: asset not found");
                protocol_response(StatusCode::NOT_FOUND, "text/plain", b"Not Found".to_vec())
            }
        }
    })
}

fn protocol_response(status: StatusCode, mime: &str, body: Vec<u8>) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::from(body));
    *response.status_mut() = status;
    if let Ok(value) = HeaderValue::from_str(mime) {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }
    let origin = format!("{INTERNAL_SCHEME}://");
    if let Ok(value) = HeaderValue::from_str(&origin) {
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    response
}
