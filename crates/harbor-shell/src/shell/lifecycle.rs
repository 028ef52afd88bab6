//! Window and view lifecycle: open, close, select, move, lay out.

use harbor_common::events::Event;
use harbor_common::{HarborError, HostError, ProfileError, ProfileId, ViewId, WindowId};
use harbor_config::schema::home_page_url;
use tracing::{debug, info, warn};

use super::core::Shell;
use crate::bounds::find_dialog_bounds;
use crate::dialog::DialogKind;
use crate::host::{SurfaceKind, SurfaceSpec, WindowSpec};
use crate::view::View;
use crate::window::Window;
use crate::APPLICATION_NAME;

impl Shell {
    // =========================================================================
    // WINDOWS
    // =========================================================================

    /// Open a window for `profile` with one tab per URL.
    ///
    /// With no URLs the profile's startup pages are used, and the new-tab
    /// page when those are empty too.
    pub fn open_window(
        &mut self,
        profile: &ProfileId,
        urls: Vec<String>,
    ) -> harbor_common::Result<WindowId> {
        let (incognito, startup) = {
            let p = self
                .profiles
                .get(profile)
                .ok_or_else(|| ProfileError::NotFound(profile.to_string()))?;
            (p.is_incognito(), p.settings().startup_urls())
        };

        let mut urls = if urls.is_empty() { startup } else { urls };
        if urls.is_empty() {
            urls.push(home_page_url());
        }

        let spec = WindowSpec {
            title: APPLICATION_NAME.to_string(),
            profile: profile.clone(),
            incognito,
        };
        let host = self.runtime.create_window(&spec)?;
        let id = self
            .windows
            .insert(Window::new(host, profile.clone(), incognito));
        self.publish(Event::WindowOpened(id));

        for (index, url) in urls.iter().enumerate() {
            if let Err(e) = self.add_view(id, Some(url), index == 0) {
                warn!(window_id = %id, url = %url, "failed to open tab: {e}");
            }
        }
        if !incognito {
            self.profiles.set_last_user_id(Some(profile.clone()));
        }
        Ok(id)
    }

    /// Open an incognito window inheriting `origin`'s settings. When
    /// `origin` is itself incognito, the new window joins that session.
    pub fn open_incognito_window(
        &mut self,
        origin: &ProfileId,
        urls: Vec<String>,
    ) -> harbor_common::Result<WindowId> {
        let is_incognito = self
            .profiles
            .get(origin)
            .ok_or_else(|| ProfileError::NotFound(origin.to_string()))?
            .is_incognito();
        let profile = if is_incognito {
            origin.clone()
        } else {
            let created = self.profiles.create_incognito(origin)?.id().clone();
            self.publish(Event::ProfileCreated(created.clone()));
            created
        };
        self.open_window(&profile, urls)
    }

    /// Close a window: its dialogs and views are destroyed. Closing the last
    /// window of an incognito profile drops that profile.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        if !self.windows.contains(id) {
            return false;
        }
        self.dialogs.destroy_for_window(id, &mut self.windows);

        let Some(mut window) = self.windows.remove(id) else {
            return false;
        };
        for mut view in window.views_mut().drain() {
            view.destroy();
            self.publish(Event::ViewClosed {
                window: id,
                view: view.id(),
            });
        }
        window.host_mut().close();
        self.publish(Event::WindowClosed(id));

        let profile = window.profile().clone();
        if window.is_incognito() && self.windows.windows_for_profile(&profile).is_empty() {
            self.profiles.remove(&profile);
            info!(profile = %profile, "incognito profile dropped");
            self.publish(Event::ProfileDeleted(profile));
        }
        true
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Open a tab in `window`. The new-tab page is used when `url` is `None`.
    pub fn add_view(
        &mut self,
        window: WindowId,
        url: Option<&str>,
        foreground: bool,
    ) -> harbor_common::Result<ViewId> {
        let (profile, incognito) = {
            let w = self
                .windows
                .get(window)
                .ok_or_else(|| HostError::WindowNotFound(window.to_string()))?;
            (w.profile().clone(), w.is_incognito())
        };
        let spec = SurfaceSpec {
            url: url.map(str::to_string).unwrap_or_else(home_page_url),
            kind: SurfaceKind::View,
            profile: profile.clone(),
            incognito,
        };
        let surface = self.runtime.create_surface(window, &spec)?;
        let view = View::new(window, profile, incognito, surface);

        let w = self
            .windows
            .get_mut(window)
            .ok_or_else(|| HostError::WindowNotFound(window.to_string()))?;
        let id = w.views_mut().add(view, foreground);
        let selected = w.views().selected_id() == Some(id);
        debug!(window_id = %window, view_id = %id, url = %spec.url, foreground, "view added");
        self.publish(Event::ViewOpened { window, view: id });

        if selected {
            self.refresh_selection(window);
        }
        self.update_view(id);
        Ok(id)
    }

    /// Remove one tab. Closing the last tab closes its window.
    pub fn remove_view(&mut self, view: ViewId) -> bool {
        let Some(window) = self.windows.window_for_view(view) else {
            return false;
        };
        let Some(w) = self.windows.get_mut(window) else {
            return false;
        };
        w.detach_view(view);
        let Some(removed) = w.views_mut().remove(view) else {
            return false;
        };
        let now_empty = w.views().is_empty();
        self.release_views(window, vec![removed]);

        if now_empty {
            self.close_window(window);
        } else {
            self.refresh_selection(window);
        }
        true
    }

    /// Destroy views already taken out of `window`, with their find bars.
    pub(super) fn release_views(&mut self, window: WindowId, views: Vec<View>) {
        for mut view in views {
            if let Some(dialog) = view.find_dialog() {
                self.dialogs.destroy(dialog, &mut self.windows);
            }
            if let Some(w) = self.windows.get_mut(window) {
                w.host_mut().detach_surface(view.surface().id());
            }
            view.destroy();
            debug!(window_id = %window, view_id = %view.id(), "view removed");
            self.publish(Event::ViewClosed {
                window,
                view: view.id(),
            });
        }
    }

    pub fn select_view(&mut self, view: ViewId) -> bool {
        let Some(window) = self.windows.window_for_view(view) else {
            return false;
        };
        let selected = self
            .windows
            .get_mut(window)
            .is_some_and(|w| w.views_mut().select(view));
        if selected {
            self.refresh_selection(window);
        }
        selected
    }

    /// Re-parent a view into `target`. Its find bar does not follow, and
    /// views never cross into another profile's window.
    pub fn move_view(&mut self, view: ViewId, target: WindowId) -> harbor_common::Result<()> {
        let source = self
            .windows
            .window_for_view(view)
            .ok_or_else(|| HarborError::Other(format!("no such view: {view}")))?;
        let target_profile = self
            .windows
            .get(target)
            .map(|w| w.profile().clone())
            .ok_or_else(|| HostError::WindowNotFound(target.to_string()))?;
        if source == target {
            return Ok(());
        }
        if self.windows.view(view).map(View::profile) != Some(&target_profile) {
            return Err(HarborError::Other(format!(
                "view {view} cannot move into window {target} of profile {target_profile}"
            )));
        }

        if let Some(dialog) = self.windows.view(view).and_then(View::find_dialog) {
            self.dialogs.destroy(dialog, &mut self.windows);
        }
        if let Some(v) = self.windows.view_mut(view) {
            v.set_find_dialog(None);
        }

        if self.windows.move_view(view, target) {
            let emptied = self
                .windows
                .get(source)
                .is_some_and(|w| w.views().is_empty());
            if emptied {
                self.close_window(source);
            } else {
                self.refresh_selection(source);
            }
            self.refresh_selection(target);
            self.update_view(view);
        }
        Ok(())
    }

    // =========================================================================
    // LAYOUT
    // =========================================================================

    /// Show only the selected view, lay it out, and refresh the chrome.
    pub(super) fn refresh_selection(&mut self, window: WindowId) {
        let Some(w) = self.windows.get_mut(window) else {
            return;
        };
        let selected = w.views().selected_id();
        let hidden: Vec<ViewId> = w
            .views()
            .ids()
            .into_iter()
            .filter(|id| Some(*id) != selected)
            .collect();
        for id in &hidden {
            w.detach_view(*id);
        }
        let hidden_dialogs: Vec<_> = hidden
            .iter()
            .filter_map(|id| w.views().get(*id).and_then(View::find_dialog))
            .collect();
        for dialog in hidden_dialogs {
            self.dialogs.detach(dialog, &mut self.windows);
        }

        self.layout(window);
        if let Some(w) = self.windows.get_mut(window) {
            w.update_chrome();
        }
        if let Some(view) = selected {
            self.publish(Event::ViewSelected { window, view });
        }
    }

    /// Size the selected view, re-anchor its find bar and keep visible
    /// dialogs above it.
    pub fn layout(&mut self, window: WindowId) {
        let appearance = self.appearance(window);
        let Some(w) = self.windows.get_mut(window) else {
            return;
        };
        w.layout_selected(&appearance);
        let size = w.content_size();
        let find = w.views().selected().and_then(View::find_dialog);

        if let Some(dialog) = find {
            if self
                .dialogs
                .get(dialog)
                .is_some_and(|d| matches!(d.kind(), DialogKind::Find { .. }))
            {
                let bounds = find_dialog_bounds(size, appearance.style);
                self.dialogs.rebind(dialog, window, bounds, &mut self.windows);
            }
        }

        let raised: Vec<_> = self
            .dialogs
            .dialogs_for(window)
            .into_iter()
            .filter(|id| Some(*id) != find)
            .filter(|id| self.dialogs.get(*id).is_some_and(|d| d.is_visible()))
            .collect();
        for dialog in raised {
            self.dialogs.show_existing(dialog, &mut self.windows);
        }
    }
}
