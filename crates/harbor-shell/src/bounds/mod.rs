//! Content-area geometry: where a view's surface and the overlay dialogs sit
//! inside a window, for each chrome style and fullscreen state.

mod calculation;
mod dialogs;

pub use calculation::{chrome_height, sidebar_width, view_bounds};
pub use dialogs::{find_dialog_bounds, history_dialog_bounds, information_dialog_bounds};

use harbor_common::Size;
use harbor_config::schema::{ChromeStyle, SidebarConfig};

/// Height of the single-row toolbar, and the collapsed sidebar width.
pub const WINDOW_SINGLE_LENGTH: u32 = 50;
pub const WINDOW_DOUBLE_TITLE_BAR_HEIGHT: u32 = 36;
pub const WINDOW_DOUBLE_TOOL_BAR_HEIGHT: u32 = 42;
pub const WINDOW_EXTENDED_SIDEBAR_WIDTH: u32 = 350;
pub const WINDOW_EXTENDED_TAB_CONTAINER_WIDTH: u32 = 250;

/// How much chrome stays on screen while fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    #[default]
    None,
    /// A page element requested fullscreen.
    Html,
    WithToolbar,
    WithoutToolbar,
}

impl FullscreenState {
    /// Element fullscreen wins over the toolbar setting; neither applies
    /// unless the window itself is fullscreen.
    pub fn resolve(window_fullscreen: bool, html: bool, showing_toolbar: bool) -> Self {
        if !window_fullscreen {
            FullscreenState::None
        } else if html {
            FullscreenState::Html
        } else if showing_toolbar {
            FullscreenState::WithToolbar
        } else {
            FullscreenState::WithoutToolbar
        }
    }

    /// True when the view covers the whole window.
    pub fn hides_chrome(self) -> bool {
        matches!(self, FullscreenState::Html | FullscreenState::WithoutToolbar)
    }
}

/// Everything `view_bounds` depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsInput {
    pub content_size: Size,
    pub style: ChromeStyle,
    pub fullscreen: FullscreenState,
    pub maximized: bool,
    pub sidebar: SidebarLayout,
}

/// Sidebar state as far as geometry is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidebarLayout {
    pub extended: bool,
    pub tab_container: bool,
}

impl From<&SidebarConfig> for SidebarLayout {
    fn from(config: &SidebarConfig) -> Self {
        Self {
            extended: config.extended,
            tab_container: config.state == harbor_config::schema::SidebarState::TabContainer,
        }
    }
}

#[cfg(test)]
mod tests;
