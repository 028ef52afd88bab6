//! Shell struct definition and constructor.

use harbor_common::events::{Event, EventBus};
use harbor_common::{ViewId, WindowId};
use harbor_config::schema::AppearanceConfig;
use harbor_profile::ProfileManager;

use crate::dialog::DialogManager;
use crate::favicon::FaviconCache;
use crate::host::HostRuntime;
use crate::task::Task;
use crate::view::View;
use crate::window::{Window, WindowManager};

pub struct Shell {
    pub(super) runtime: Box<dyn HostRuntime>,
    pub(super) profiles: ProfileManager,
    pub(super) windows: WindowManager,
    pub(super) dialogs: DialogManager,
    pub(super) favicons: FaviconCache,
    pub(super) event_bus: EventBus,

    // Async work waiting to be picked up by the application
    pub(super) tasks: Vec<Task>,
}

impl Shell {
    /// Build a shell over `runtime`. Profiles are loaded here if the caller
    /// has not done so already.
    pub fn new(runtime: Box<dyn HostRuntime>, mut profiles: ProfileManager) -> Self {
        if !profiles.is_loaded() {
            profiles.loads();
        }
        Self {
            runtime,
            profiles,
            windows: WindowManager::new(),
            dialogs: DialogManager::new(),
            favicons: FaviconCache::new(),
            event_bus: EventBus::default(),
            tasks: Vec::new(),
        }
    }

    pub fn profiles(&self) -> &ProfileManager {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut ProfileManager {
        &mut self.profiles
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn dialogs(&self) -> &DialogManager {
        &self.dialogs
    }

    pub fn favicons(&self) -> &FaviconCache {
        &self.favicons
    }

    pub fn events(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.windows.view(id)
    }

    /// Appearance settings of the window's profile.
    pub(super) fn appearance(&self, window: WindowId) -> AppearanceConfig {
        self.windows
            .get(window)
            .and_then(|w| self.profiles.get(w.profile()))
            .map(|p| p.config().appearance.clone())
            .unwrap_or_default()
    }

    pub(super) fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }

    /// Push a view's state and refresh its window's title and menus.
    pub(super) fn update_view(&mut self, view: ViewId) {
        if let Some(window) = self.windows.window_for_view(view) {
            if let Some(w) = self.windows.get_mut(window) {
                w.update_view(view);
            }
        }
    }
}
