//! Appearance configuration types.

use serde::{Deserialize, Serialize};

/// Layout of the browser chrome around the content area.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChromeStyle {
    #[default]
    TopSingle,
    TopDouble,
    Left,
    Right,
}

impl ChromeStyle {
    /// Vertical styles draw the tab strip as a sidebar.
    pub fn is_vertical(self) -> bool {
        matches!(self, ChromeStyle::Left | ChromeStyle::Right)
    }
}

/// Color scheme applied to native UI and pages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

/// Panel shown in the extended sidebar.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SidebarState {
    #[default]
    TabContainer,
    Bookmarks,
    History,
    Downloads,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SidebarConfig {
    pub extended: bool,
    pub state: SidebarState,
}

/// Appearance settings: chrome style, theme, sidebar, fullscreen toolbar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppearanceConfig {
    pub style: ChromeStyle,
    pub theme: ThemeMode,
    /// Keep the toolbar visible while the window is fullscreen.
    pub fullscreen_showing_toolbar: bool,
    pub sidebar: SidebarConfig,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            style: ChromeStyle::TopSingle,
            theme: ThemeMode::System,
            fullscreen_showing_toolbar: true,
            sidebar: SidebarConfig::default(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
