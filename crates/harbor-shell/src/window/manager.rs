use harbor_common::{ProfileId, ViewId, WindowId};
use tracing::info;

use super::Window;
use crate::view::View;

/// Every open window, in opening order.
#[derive(Debug, Default)]
pub struct WindowManager {
    windows: Vec<Window>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, window: Window) -> WindowId {
        let id = window.id();
        info!(window_id = %id, profile = %window.profile(), "window opened");
        self.windows.push(window);
        id
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(Window::id).collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn windows_for_profile(&self, profile: &ProfileId) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.profile() == profile)
            .map(Window::id)
            .collect()
    }

    pub fn window_for_view(&self, view: ViewId) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|w| w.views().contains(view))
            .map(Window::id)
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.windows.iter().find_map(|w| w.views().get(id))
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.windows.iter_mut().find_map(|w| w.views_mut().get_mut(id))
    }

    /// Take the window out of the registry. Its views and host window are
    /// the caller's to release.
    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        let index = self.windows.iter().position(|w| w.id() == id)?;
        info!(window_id = %id, "window removed");
        Some(self.windows.remove(index))
    }

    /// Re-parent a view into `target`, selecting it there. Both windows are
    /// checked before anything changes; returns false if either is missing
    /// or `target` belongs to another profile.
    pub fn move_view(&mut self, view: ViewId, target: WindowId) -> bool {
        let Some(from) = self.windows.iter().position(|w| w.views().contains(view)) else {
            return false;
        };
        let Some(to) = self.windows.iter().position(|w| w.id() == target) else {
            return false;
        };
        if from == to {
            return false;
        }
        let same_profile = self.windows[from]
            .views()
            .get(view)
            .is_some_and(|v| v.profile() == self.windows[to].profile());
        if !same_profile {
            return false;
        }

        let source = &mut self.windows[from];
        source.detach_view(view);
        let Some(mut moved) = source.views_mut().remove(view) else {
            return false;
        };
        let source_id = source.id();
        moved.set_window(target);
        self.windows[to].views_mut().add(moved, true);
        info!(view_id = %view, from = %source_id, to = %target, "view moved");
        true
    }
}
