//! Overlay dialogs: history, site information and find-in-page.
//!
//! A dialog is a content surface stacked above a window's selected view.
//! Named ("dynamic") dialogs are process-wide singletons: opening one from
//! another window rebinds the existing instance instead of creating a
//! second one.

mod manager;

pub use manager::DialogManager;

use harbor_common::url::INTERNAL_SCHEME;
use harbor_common::{DialogId, ProfileId, Rect, ViewId, WindowId};

use crate::host::{ContentSurface, SurfaceId, SurfaceKind, SurfaceSpec};

pub const HISTORY_DIALOG: &str = "history";
pub const INFORMATION_DIALOG: &str = "information";

/// What a dialog does when it is hidden or its window changes bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogReaction {
    /// Unregister and release the surface.
    Destroy,
    /// Do nothing.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    History,
    Information,
    /// Find bar of one view.
    Find { view: ViewId },
}

impl DialogKind {
    /// Singleton key, for the kinds that have one.
    pub fn name(self) -> Option<&'static str> {
        match self {
            DialogKind::History => Some(HISTORY_DIALOG),
            DialogKind::Information => Some(INFORMATION_DIALOG),
            DialogKind::Find { .. } => None,
        }
    }

    /// Internal page the dialog renders.
    pub fn url(self) -> String {
        let page = match self {
            DialogKind::History => "history",
            DialogKind::Information => "information",
            DialogKind::Find { .. } => "find",
        };
        format!("{INTERNAL_SCHEME}://{page}")
    }

    /// Every kind is released when hidden; a find bar is recreated by the
    /// next search.
    pub fn on_hide(self) -> DialogReaction {
        DialogReaction::Destroy
    }

    /// The find bar is re-anchored by window layout instead.
    pub fn on_window_bounds_changed(self) -> DialogReaction {
        match self {
            DialogKind::History | DialogKind::Information => DialogReaction::Destroy,
            DialogKind::Find { .. } => DialogReaction::Keep,
        }
    }

    pub fn surface_spec(self, profile: ProfileId, incognito: bool) -> SurfaceSpec {
        SurfaceSpec {
            url: self.url(),
            kind: SurfaceKind::Dialog,
            profile,
            incognito,
        }
    }
}

pub struct Dialog {
    id: DialogId,
    kind: DialogKind,
    name: Option<String>,
    owner: WindowId,
    bounds: Rect,
    surface: Box<dyn ContentSurface>,
    visible: bool,
    on_hide: DialogReaction,
    on_window_bounds_changed: DialogReaction,
}

impl std::fmt::Debug for Dialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("owner", &self.owner)
            .field("bounds", &self.bounds)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl Dialog {
    /// Wrap a surface created for `kind`. The dialog id is the surface id.
    pub fn new(
        kind: DialogKind,
        owner: WindowId,
        bounds: Rect,
        surface: Box<dyn ContentSurface>,
    ) -> Self {
        Self {
            id: DialogId(surface.id().0),
            kind,
            name: kind.name().map(str::to_string),
            owner,
            bounds,
            surface,
            visible: false,
            on_hide: kind.on_hide(),
            on_window_bounds_changed: kind.on_window_bounds_changed(),
        }
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn owner(&self) -> WindowId {
        self.owner
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface.id()
    }

    pub fn surface(&self) -> &dyn ContentSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn ContentSurface {
        self.surface.as_mut()
    }

    pub fn on_hide(&self) -> DialogReaction {
        self.on_hide
    }

    pub fn on_window_bounds_changed(&self) -> DialogReaction {
        self.on_window_bounds_changed
    }

    /// Send a message to the dialog page.
    pub fn send(&mut self, channel: &str, payload: serde_json::Value) {
        self.surface.send(channel, payload);
    }
}
