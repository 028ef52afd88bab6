//! Find-in-page sessions and the per-view find bar.

use harbor_common::{DialogId, HostError, ViewId};
use serde_json::json;
use tracing::debug;

use super::core::Shell;
use crate::bounds::find_dialog_bounds;
use crate::dialog::{Dialog, DialogKind};
use crate::host::StopFindAction;
use crate::ipc::channels;
use crate::view::FindState;

impl Shell {
    /// Show the view's find bar, creating it on first use.
    pub fn open_find_dialog(&mut self, view: ViewId) -> harbor_common::Result<DialogId> {
        let window = self
            .windows
            .window_for_view(view)
            .ok_or_else(|| HostError::SurfaceDestroyed(view.to_string()))?;
        let style = self.appearance(window).style;
        let (bounds, profile, incognito, existing) = {
            let w = self
                .windows
                .get(window)
                .ok_or_else(|| HostError::WindowNotFound(window.to_string()))?;
            let v = w
                .views()
                .get(view)
                .ok_or_else(|| HostError::SurfaceDestroyed(view.to_string()))?;
            (
                find_dialog_bounds(w.content_size(), style),
                w.profile().clone(),
                w.is_incognito(),
                v.find_dialog(),
            )
        };

        let reused = match existing {
            Some(id) if self.dialogs.rebind(id, window, bounds, &mut self.windows) => Some(id),
            _ => None,
        };
        let id = match reused {
            Some(id) => id,
            None => {
                let kind = DialogKind::Find { view };
                let surface = self
                    .runtime
                    .create_surface(window, &kind.surface_spec(profile, incognito))?;
                let id = self
                    .dialogs
                    .show(Dialog::new(kind, window, bounds, surface), &mut self.windows);
                if let Some(v) = self.windows.view_mut(view) {
                    v.set_find_dialog(Some(id));
                }
                debug!(view_id = %view, dialog_id = %id, "find bar created");
                id
            }
        };

        if let Some(dialog) = self.dialogs.get_mut(id) {
            dialog.surface_mut().focus();
        }
        self.push_find_state(view);
        Ok(id)
    }

    /// Start a search in `view`, opening its find bar if needed.
    pub fn find_in_page(&mut self, view: ViewId, text: &str, match_case: bool) -> Option<FindState> {
        if let Err(e) = self.open_find_dialog(view) {
            debug!(view_id = %view, "find bar unavailable: {e}");
        }
        let state = self
            .windows
            .view_mut(view)
            .map(|v| v.find_in_page(text, match_case).clone())?;
        self.push_find_state(view);
        Some(state)
    }

    pub fn move_find_in_page(&mut self, view: ViewId, forward: bool) -> bool {
        let moved = self
            .windows
            .view_mut(view)
            .is_some_and(|v| v.move_find_in_page(forward));
        if moved {
            self.push_find_state(view);
        }
        moved
    }

    pub fn stop_find_in_page(&mut self, view: ViewId, action: StopFindAction) -> bool {
        let Some(v) = self.windows.view_mut(view) else {
            return false;
        };
        v.stop_find_in_page(action);
        self.push_find_state(view);
        true
    }

    /// Merge an engine result into the view's session and publish it.
    pub(super) fn found_in_page(&mut self, view: ViewId, index: u32, matches: u32, final_update: bool) {
        if let Some(v) = self.windows.view_mut(view) {
            v.apply_found_in_page(index, matches, final_update);
            self.push_find_state(view);
        }
    }

    /// Send `{view, state}` on `view-find-{window}` to the view's find bar,
    /// or to the window chrome when the view has none.
    pub(super) fn push_find_state(&mut self, view: ViewId) {
        let Some(window) = self.windows.window_for_view(view) else {
            return;
        };
        let Some(v) = self.windows.view(view) else {
            return;
        };
        let payload = json!({ "view": view, "state": v.find_state() });
        let channel = channels::view_find(window);

        match v.find_dialog().and_then(|id| self.dialogs.get_mut(id)) {
            Some(dialog) => dialog.send(&channel, payload),
            None => {
                if let Some(w) = self.windows.get_mut(window) {
                    w.send(&channel, payload);
                }
            }
        }
    }

    /// Forget a find bar that was hidden or destroyed.
    pub(super) fn forget_find_dialog(&mut self, view: ViewId) {
        if let Some(v) = self.windows.view_mut(view) {
            v.set_find_dialog(None);
        }
    }
}

