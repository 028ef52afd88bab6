use std::collections::HashMap;

use harbor_common::{DialogId, Rect, WindowId};
use tracing::{debug, info};

use super::{Dialog, DialogReaction};
use crate::host::{HostResult, SurfaceId};
use crate::window::WindowManager;

/// Process-wide registry of dialogs.
///
/// Every operation that changes what is on screen takes the
/// [`WindowManager`] so the dialog surface can be attached to, or detached
/// from, its owner's host window.
#[derive(Debug, Default)]
pub struct DialogManager {
    dialogs: Vec<Dialog>,
    dynamic: HashMap<String, DialogId>,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: DialogId) -> Option<&Dialog> {
        self.dialogs.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DialogId) -> Option<&mut Dialog> {
        self.dialogs.iter_mut().find(|d| d.id == id)
    }

    pub fn get_dynamic(&self, name: &str) -> Option<&Dialog> {
        self.dynamic.get(name).and_then(|id| self.get(*id))
    }

    pub fn dialogs(&self) -> &[Dialog] {
        &self.dialogs
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }

    pub fn dialogs_for(&self, window: WindowId) -> Vec<DialogId> {
        self.dialogs
            .iter()
            .filter(|d| d.owner == window)
            .map(Dialog::id)
            .collect()
    }

    pub fn dialog_for_surface(&self, surface: SurfaceId) -> Option<DialogId> {
        self.dialogs
            .iter()
            .find(|d| d.surface_id() == surface)
            .map(Dialog::id)
    }

    /// Register and show `dialog`.
    ///
    /// If a dialog with the same name is already registered, that instance
    /// is rebound to the new owner and bounds instead, and `dialog` is
    /// released. Returns the id of the dialog now on screen.
    pub fn show(&mut self, mut dialog: Dialog, windows: &mut WindowManager) -> DialogId {
        if let Some(existing) = dialog.name().and_then(|n| self.dynamic.get(n)).copied() {
            if self.get(existing).is_some() {
                let (owner, bounds) = (dialog.owner, dialog.bounds);
                dialog.surface.destroy();
                self.rebind(existing, owner, bounds, windows);
                return existing;
            }
        }

        let id = dialog.id;
        if let Some(name) = dialog.name.clone() {
            self.dynamic.insert(name, id);
        }
        info!(dialog_id = %id, kind = ?dialog.kind, window_id = %dialog.owner, "dialog created");
        self.dialogs.push(dialog);
        self.show_existing(id, windows);
        id
    }

    /// Show a named dialog owned by `owner` at `bounds`, rebinding the
    /// registered instance or creating one with `create`.
    pub fn show_dynamic(
        &mut self,
        name: &str,
        owner: WindowId,
        bounds: Rect,
        windows: &mut WindowManager,
        create: impl FnOnce() -> HostResult<Dialog>,
    ) -> HostResult<DialogId> {
        if let Some(id) = self.dynamic.get(name).copied() {
            if self.rebind(id, owner, bounds, windows) {
                return Ok(id);
            }
            self.dynamic.remove(name);
        }
        let dialog = create()?;
        Ok(self.show(dialog, windows))
    }

    /// Move a dialog to `owner` first, then to `bounds`, then show it.
    pub fn rebind(
        &mut self,
        id: DialogId,
        owner: WindowId,
        bounds: Rect,
        windows: &mut WindowManager,
    ) -> bool {
        let Some(dialog) = self.get_mut(id) else {
            return false;
        };
        if dialog.owner != owner {
            if let Some(previous) = windows.get_mut(dialog.owner) {
                previous.host_mut().detach_surface(dialog.surface.id());
            }
            debug!(dialog_id = %id, from = %dialog.owner, to = %owner, "dialog rebound");
            dialog.owner = owner;
        }
        dialog.bounds = bounds;
        self.show_existing(id, windows)
    }

    /// Apply a dialog's owner and bounds on the host and raise it.
    pub fn show_existing(&mut self, id: DialogId, windows: &mut WindowManager) -> bool {
        let Some(dialog) = self.dialogs.iter_mut().find(|d| d.id == id) else {
            return false;
        };
        let Some(window) = windows.get_mut(dialog.owner) else {
            return false;
        };
        dialog.surface.set_bounds(dialog.bounds);
        window.host_mut().attach_surface(dialog.surface.id());
        dialog.visible = true;
        true
    }

    /// Reposition a dialog, moving its surface if it is on screen.
    pub fn set_bounds(&mut self, id: DialogId, bounds: Rect) -> bool {
        let Some(dialog) = self.get_mut(id) else {
            return false;
        };
        dialog.bounds = bounds;
        if dialog.visible {
            dialog.surface.set_bounds(bounds);
        }
        true
    }

    /// Run the dialog's on-hide reaction.
    pub fn hide(&mut self, id: DialogId, windows: &mut WindowManager) -> bool {
        let Some(reaction) = self.get(id).map(Dialog::on_hide) else {
            return false;
        };
        self.react(id, reaction, windows);
        true
    }

    /// Take a dialog off screen, keeping it registered. Used when its view
    /// is no longer selected.
    pub fn detach(&mut self, id: DialogId, windows: &mut WindowManager) {
        let Some(dialog) = self.dialogs.iter_mut().find(|d| d.id == id) else {
            return;
        };
        if let Some(window) = windows.get_mut(dialog.owner) {
            window.host_mut().detach_surface(dialog.surface.id());
        }
        dialog.visible = false;
    }

    /// Unregister a dialog and release its surface.
    pub fn destroy(&mut self, id: DialogId, windows: &mut WindowManager) -> bool {
        let Some(index) = self.dialogs.iter().position(|d| d.id == id) else {
            return false;
        };
        let mut dialog = self.dialogs.remove(index);
        if let Some(name) = dialog.name() {
            if self.dynamic.get(name) == Some(&id) {
                self.dynamic.remove(name);
            }
        }
        if let Some(window) = windows.get_mut(dialog.owner) {
            window.host_mut().detach_surface(dialog.surface.id());
        }
        if !dialog.surface.is_destroyed() {
            dialog.surface.destroy();
        }
        info!(dialog_id = %id, "dialog destroyed");
        true
    }

    /// Forget a dialog whose surface the host already destroyed.
    pub fn remove_surface(&mut self, surface: SurfaceId) -> Option<DialogId> {
        let index = self.dialogs.iter().position(|d| d.surface_id() == surface)?;
        let dialog = self.dialogs.remove(index);
        self.dynamic.retain(|_, id| *id != dialog.id);
        Some(dialog.id)
    }

    /// Run the bounds-changed reaction of every dialog owned by `window`.
    pub fn window_bounds_changed(&mut self, window: WindowId, windows: &mut WindowManager) {
        for id in self.dialogs_for(window) {
            if let Some(reaction) = self.get(id).map(Dialog::on_window_bounds_changed) {
                self.react(id, reaction, windows);
            }
        }
    }

    /// Destroy every dialog owned by `window`.
    pub fn destroy_for_window(&mut self, window: WindowId, windows: &mut WindowManager) -> usize {
        let ids = self.dialogs_for(window);
        for id in &ids {
            self.destroy(*id, windows);
        }
        ids.len()
    }

    fn react(&mut self, id: DialogId, reaction: DialogReaction, windows: &mut WindowManager) {
        match reaction {
            DialogReaction::Destroy => {
                self.destroy(id, windows);
            }
            DialogReaction::Keep => {}
        }
    }
}
