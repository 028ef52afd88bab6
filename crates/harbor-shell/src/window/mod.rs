//! One browser window: a host window plus its tabs.

mod manager;

pub use manager::WindowManager;

use harbor_common::{ProfileId, Rect, Size, ViewId, WindowId};
use harbor_config::schema::AppearanceConfig;
use tracing::debug;

use crate::bounds::{self, BoundsInput, FullscreenState, SidebarLayout};
use crate::host::HostWindow;
use crate::ipc::channels;
use crate::menu::{application_menu, touch_bar, ApplicationMenuContext, SelectedView, TabMenuContext};
use crate::view_manager::ViewManager;
use crate::APPLICATION_NAME;

pub struct Window {
    id: WindowId,
    profile: ProfileId,
    incognito: bool,
    host: Box<dyn HostWindow>,
    views: ViewManager,
    /// A page element is fullscreen (as opposed to the user toggling it).
    html_fullscreen: bool,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("profile", &self.profile)
            .field("incognito", &self.incognito)
            .field("views", &self.views)
            .finish_non_exhaustive()
    }
}

impl Window {
    pub fn new(host: Box<dyn HostWindow>, profile: ProfileId, incognito: bool) -> Self {
        Self {
            id: host.id(),
            profile,
            incognito,
            host,
            views: ViewManager::new(),
            html_fullscreen: false,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn profile(&self) -> &ProfileId {
        &self.profile
    }

    pub fn is_incognito(&self) -> bool {
        self.incognito
    }

    pub fn host(&self) -> &dyn HostWindow {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn HostWindow {
        self.host.as_mut()
    }

    pub fn views(&self) -> &ViewManager {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut ViewManager {
        &mut self.views
    }

    pub fn content_size(&self) -> Size {
        self.host.content_size()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.host.is_fullscreen()
    }

    pub fn is_maximized(&self) -> bool {
        self.host.is_maximized()
    }

    pub fn is_html_fullscreen(&self) -> bool {
        self.html_fullscreen
    }

    pub fn set_html_fullscreen(&mut self, html: bool) {
        self.html_fullscreen = html;
    }

    pub fn fullscreen_state(&self, appearance: &AppearanceConfig) -> FullscreenState {
        FullscreenState::resolve(
            self.host.is_fullscreen(),
            self.html_fullscreen,
            appearance.fullscreen_showing_toolbar,
        )
    }

    pub fn bounds_input(&self, appearance: &AppearanceConfig) -> BoundsInput {
        BoundsInput {
            content_size: self.host.content_size(),
            style: appearance.style,
            fullscreen: self.fullscreen_state(appearance),
            maximized: self.host.is_maximized(),
            sidebar: SidebarLayout::from(&appearance.sidebar),
        }
    }

    /// Size the selected view's surface and raise it above the others.
    pub fn layout_selected(&mut self, appearance: &AppearanceConfig) -> Option<Rect> {
        let rect = bounds::view_bounds(&self.bounds_input(appearance));
        let view = self.views.selected_mut()?;
        view.surface_mut().set_bounds(rect);
        let surface = view.surface().id();
        self.host.attach_surface(surface);
        debug!(window_id = %self.id, view_id = %ViewId(surface.0), ?rect, "view laid out");
        Some(rect)
    }

    /// Take a view's surface off screen; the view itself is untouched.
    pub fn detach_view(&mut self, id: ViewId) {
        if let Some(view) = self.views.get(id) {
            let surface = view.surface().id();
            self.host.detach_surface(surface);
        }
    }

    /// Navigation state of the selected view, for menus and the touch bar.
    pub fn selected_view(&self) -> Option<SelectedView> {
        self.views.selected().map(|view| SelectedView {
            view: view.id(),
            can_go_back: view.can_go_back(),
            can_go_forward: view.can_go_forward(),
            is_loading: view.is_loading(),
            is_pinned: view.is_pinned(),
            is_muted: view.is_muted(),
        })
    }

    pub fn tab_menu_context(&self, id: ViewId) -> Option<TabMenuContext> {
        let view = self.views.get(id)?;
        Some(TabMenuContext {
            view: id,
            is_loading: view.is_loading(),
            is_pinned: view.is_pinned(),
            is_muted: view.is_muted(),
            has_others: !self.views.other_views(id).is_empty(),
            has_lefts: !self.views.left_views(id).is_empty(),
            has_rights: !self.views.right_views(id).is_empty(),
        })
    }

    /// Refresh after a view's visible state changed: window title (selected
    /// view only), application menu, touch bar, then push the view state.
    pub fn update_view(&mut self, id: ViewId) {
        let Some(view) = self.views.get(id) else {
            return;
        };
        if view.is_destroyed() {
            return;
        }
        let state = view.state();

        if self.views.selected_id() == Some(id) {
            self.host.set_title(&window_title(Some(&state.title)));
        }
        self.update_menus();

        match serde_json::to_value(&state) {
            Ok(payload) => self.host.send(&channels::view(self.id), payload),
            Err(e) => debug!(window_id = %self.id, view_id = %id, "failed to encode view state: {e}"),
        }
        self.push_tabs();
    }

    /// Title, menu and touch bar from the current selection.
    pub fn update_chrome(&mut self) {
        let title = self.views.selected().map(|v| v.title());
        self.host.set_title(&window_title(title.as_deref()));
        self.update_menus();
        self.push_tabs();
    }

    /// `{views, selected}` on `tabs-{window}`, so the chrome can drop
    /// closed tabs and follow the selection.
    fn push_tabs(&mut self) {
        let payload = serde_json::json!({
            "views": self.views.ids(),
            "selected": self.views.selected_id(),
        });
        self.host.send(&channels::tabs(self.id), payload);
    }

    fn update_menus(&mut self) {
        let selected = self.selected_view();
        let menu = application_menu(&ApplicationMenuContext {
            selected,
            is_fullscreen: self.host.is_fullscreen(),
        });
        self.host.set_application_menu(&menu);
        self.update_touch_bar();
    }

    pub fn update_touch_bar(&mut self) {
        if self.host.supports_touch_bar() {
            let bar = touch_bar(self.selected_view().as_ref());
            self.host.set_touch_bar(&bar);
        }
    }

    /// Push a message to the chrome UI of this window.
    pub fn send(&mut self, channel: &str, payload: serde_json::Value) {
        self.host.send(channel, payload);
    }
}

/// `"{title} - Harbor"`, or the bare application name.
pub fn window_title(page_title: Option<&str>) -> String {
    match page_title {
        Some(title) if !title.is_empty() => format!("{title} - {APPLICATION_NAME}"),
        _ => APPLICATION_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests;
