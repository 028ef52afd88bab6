//! Host event routing.
//!
//! Surface events are dispatched synchronously: the shell looks up the view
//! (or dialog) that owns the surface and applies the reaction in place.

use harbor_common::{ViewId, WindowId};
use tracing::{debug, warn};

use super::core::Shell;
use crate::dialog::DialogKind;
use crate::host::{SurfaceEvent, SurfaceId, WindowDisposition, WindowEvent};
use crate::menu::{context_menu, ContextMenuContext, ContextMenuParams};
use crate::task::Task;
use crate::view::MediaStatus;

impl Shell {
    /// Route one event from a content surface.
    pub fn handle_surface_event(&mut self, surface: SurfaceId, event: SurfaceEvent) {
        if self.dialogs.dialog_for_surface(surface).is_some() {
            self.handle_dialog_event(surface, event);
            return;
        }

        let view = ViewId(surface.0);
        let Some(window) = self.windows.window_for_view(view) else {
            debug!(view_id = %view, ?event, "event for unknown view");
            return;
        };

        match event {
            SurfaceEvent::DidStartLoading => {
                let cached = self.windows.view(view).and_then(|v| {
                    self.favicons.get(&v.url()).map(str::to_string)
                });
                if let (Some(icon), Some(v)) = (cached, self.windows.view_mut(view)) {
                    v.set_favicon(Some(icon));
                }
                self.update_view(view);
            }
            SurfaceEvent::DidStopLoading | SurfaceEvent::DidFinishLoad => {
                self.update_view(view);
            }
            SurfaceEvent::DidFailLoad { code, description } => {
                debug!(view_id = %view, code, "load failed: {description}");
                self.update_view(view);
            }
            SurfaceEvent::DidStartNavigation {
                in_place,
                main_frame,
                ..
            } => {
                if in_place || !main_frame {
                    return;
                }
                if let Some(v) = self.windows.view_mut(view) {
                    v.begin_navigation();
                }
                self.update_view(view);
            }
            SurfaceEvent::DidNavigate { url } => {
                if let Some(v) = self.windows.view_mut(view) {
                    v.refresh_request_state(Some(&url));
                }
            }
            SurfaceEvent::DidFrameFinishLoad { main_frame } => {
                if !main_frame {
                    return;
                }
                if let Some(v) = self.windows.view_mut(view) {
                    v.refresh_request_state(None);
                }
                self.update_view(view);
                self.record_history(view);
            }
            SurfaceEvent::DomReady => {
                if let Some(v) = self.windows.view_mut(view) {
                    v.capture_thumbnail();
                }
                if let Some(w) = self.windows.get_mut(window) {
                    w.update_touch_bar();
                }
            }
            SurfaceEvent::PageTitleUpdated { .. } => {
                self.update_view(view);
                self.record_history(view);
            }
            SurfaceEvent::PageFaviconUpdated { favicons } => {
                let (Some(icon_url), Some(v)) = (favicons.into_iter().next(), self.windows.view(view))
                else {
                    return;
                };
                self.tasks.push(Task::FetchFavicon {
                    view,
                    page_url: v.url(),
                    icon_url,
                });
            }
            SurfaceEvent::DidChangeThemeColor { color } => {
                if let Some(v) = self.windows.view_mut(view) {
                    v.set_color(color);
                }
                self.update_view(view);
            }
            SurfaceEvent::FoundInPage {
                active_match_ordinal,
                matches,
                final_update,
            } => {
                self.found_in_page(view, active_match_ordinal, matches, final_update);
            }
            SurfaceEvent::MediaStarted { kind } => {
                if let Some(v) = self.windows.view_mut(view) {
                    v.set_media(MediaStatus::from(kind));
                }
                self.update_view(view);
            }
            SurfaceEvent::MediaPaused => {
                if let Some(v) = self.windows.view_mut(view) {
                    v.set_media(MediaStatus::None);
                }
                self.update_view(view);
            }
            SurfaceEvent::EnterHtmlFullScreen => self.set_html_fullscreen(window, true),
            SurfaceEvent::LeaveHtmlFullScreen => self.set_html_fullscreen(window, false),
            SurfaceEvent::ContextMenu(params) => self.show_context_menu(window, view, &params),
            SurfaceEvent::NewWindowRequested {
                url,
                frame_name,
                disposition,
            } => self.open_requested(window, view, &url, &frame_name, disposition),
            SurfaceEvent::Destroyed => {
                self.remove_view(view);
            }
        }
    }

    fn handle_dialog_event(&mut self, surface: SurfaceId, event: SurfaceEvent) {
        if event != SurfaceEvent::Destroyed {
            return;
        }
        let kind = self
            .dialogs
            .dialog_for_surface(surface)
            .and_then(|id| self.dialogs.get(id))
            .map(|d| d.kind());
        self.dialogs.remove_surface(surface);
        if let Some(DialogKind::Find { view }) = kind {
            self.forget_find_dialog(view);
        }
    }

    /// Route one event from a host window.
    pub fn handle_window_event(&mut self, window: WindowId, event: WindowEvent) {
        if !self.windows.contains(window) {
            return;
        }
        match event {
            WindowEvent::Resized(_) | WindowEvent::MaximizedChanged(_) => {
                self.window_bounds_changed(window);
            }
            WindowEvent::FullscreenChanged(fullscreen) => {
                if let Some(w) = self.windows.get_mut(window) {
                    if !fullscreen {
                        w.set_html_fullscreen(false);
                    }
                }
                self.window_bounds_changed(window);
            }
            WindowEvent::Focused => {
                let profile = self
                    .windows
                    .get(window)
                    .filter(|w| !w.is_incognito())
                    .map(|w| w.profile().clone());
                if profile.is_some() && profile.as_ref() != self.profiles.last_user_id() {
                    self.profiles.set_last_user_id(profile);
                }
            }
            WindowEvent::CloseRequested => {
                self.close_window(window);
            }
        }
    }

    /// Dialogs react, the selected view is laid out again, and the menus
    /// pick up the new fullscreen state.
    pub(super) fn window_bounds_changed(&mut self, window: WindowId) {
        self.dialogs.window_bounds_changed(window, &mut self.windows);
        self.layout(window);
        if let Some(w) = self.windows.get_mut(window) {
            w.update_chrome();
        }
    }

    pub(super) fn set_html_fullscreen(&mut self, window: WindowId, html: bool) {
        let Some(w) = self.windows.get_mut(window) else {
            return;
        };
        w.set_html_fullscreen(html);
        w.host_mut().set_fullscreen(html);
        self.window_bounds_changed(window);
    }

    fn show_context_menu(&mut self, window: WindowId, view: ViewId, params: &ContextMenuParams) {
        let emoji_panel_supported = self.runtime.is_emoji_panel_supported();
        let menu = {
            let (Some(w), Some(v)) = (self.windows.get(window), self.windows.view(view)) else {
                return;
            };
            let url = v.url();
            let search_engine = self
                .profiles
                .get(v.profile())
                .and_then(|p| p.config().search.engine());
            context_menu(
                params,
                &ContextMenuContext {
                    view,
                    url: &url,
                    can_go_back: v.can_go_back(),
                    can_go_forward: v.can_go_forward(),
                    is_loading: v.is_loading(),
                    is_muted: v.is_muted(),
                    is_audible: v.is_audible(),
                    window_fullscreen: w.is_fullscreen(),
                    emoji_panel_supported,
                    search_engine,
                },
            )
        };
        if let Some(w) = self.windows.get_mut(window) {
            w.host_mut().popup_menu(&menu);
        }
    }

    /// Links asking for a new window or tab.
    fn open_requested(
        &mut self,
        window: WindowId,
        view: ViewId,
        url: &str,
        frame_name: &str,
        disposition: WindowDisposition,
    ) {
        let result = match disposition {
            WindowDisposition::NewWindow if frame_name == "_self" => {
                if let Some(v) = self.windows.view_mut(view) {
                    v.load(url);
                }
                Ok(())
            }
            WindowDisposition::NewWindow => {
                let Some(profile) = self.windows.get(window).map(|w| w.profile().clone()) else {
                    return;
                };
                self.open_window(&profile, vec![url.to_string()]).map(drop)
            }
            WindowDisposition::ForegroundTab => self.add_view(window, Some(url), true).map(drop),
            WindowDisposition::BackgroundTab => self.add_view(window, Some(url), false).map(drop),
            WindowDisposition::Other => {
                debug!(view_id = %view, url, "ignored window request");
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(view_id = %view, url, "failed to open requested page: {e}");
        }
    }

    /// Record the current page once it has stopped loading. A repeat visit
    /// only refreshes the favicon of the existing entry.
    pub(super) fn record_history(&mut self, view: ViewId) {
        let Some(v) = self.windows.view(view) else {
            return;
        };
        if v.is_loading() {
            return;
        }
        let (title, url, favicon) = (v.title(), v.url(), v.favicon().map(str::to_string));
        let profile = v.profile().clone();
        let Some(p) = self.profiles.get_mut(&profile) else {
            return;
        };
        let history = p.history_mut();
        if !history.record(&title, &url, favicon.clone()) {
            if let Some(icon) = favicon {
                history.set_favicon(&url, &icon);
            }
        }
    }
}
