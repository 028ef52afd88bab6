//! Menu models: context, tab and application menus plus the touch bar.
//!
//! Menus are plain data. Every clickable entry carries an [`Action`]; the
//! host renders the menu and hands the chosen action back to the shell.

mod application;
mod context;
pub mod shortcuts;
mod tab;
mod touch_bar;

pub use application::{application_menu, ApplicationMenuContext};
pub use context::{context_menu, ContextMenuContext, ContextMenuParams, EditFlags, MenuMediaType};
pub use tab::{tab_menu, TabMenuContext};
pub use touch_bar::{touch_bar, TouchBar, TouchBarItem};

use harbor_common::{Action, ViewId};
use serde::Serialize;

/// Navigation state of the selected view, shared by the application menu and
/// the touch bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedView {
    pub view: ViewId,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub is_pinned: bool,
    pub is_muted: bool,
}

/// One clickable entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuAction {
    pub label: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<&'static str>,
    pub enabled: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MenuItem {
    Action(MenuAction),
    Separator,
    Submenu { label: String, items: Vec<MenuItem> },
}

impl MenuItem {
    /// An enabled, visible item labelled with the action's default label.
    pub fn action(action: Action) -> Self {
        Self::labelled(action.label(), action)
    }

    pub fn labelled(label: impl Into<String>, action: Action) -> Self {
        MenuItem::Action(MenuAction {
            label: label.into(),
            action,
            accelerator: None,
            enabled: true,
            visible: true,
        })
    }

    pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        MenuItem::Submenu {
            label: label.into(),
            items: normalize(items),
        }
    }

    pub fn accelerator(mut self, accelerator: &'static str) -> Self {
        if let MenuItem::Action(item) = &mut self {
            item.accelerator = Some(accelerator);
        }
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        if let MenuItem::Action(item) = &mut self {
            item.enabled = enabled;
        }
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        if let MenuItem::Action(item) = &mut self {
            item.visible = visible;
        }
        self
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }

    fn is_visible(&self) -> bool {
        match self {
            MenuItem::Action(item) => item.visible,
            MenuItem::Separator => true,
            MenuItem::Submenu { items, .. } => !items.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items: normalize(items),
        }
    }

    /// Join the present sections with single separators.
    pub fn from_sections(sections: Vec<Option<Vec<MenuItem>>>) -> Self {
        let mut items = Vec::new();
        for section in sections.into_iter().flatten() {
            items.push(MenuItem::Separator);
            items.extend(section);
        }
        Self::new(items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clickable entries, flattened through submenus.
    pub fn actions(&self) -> Vec<&MenuAction> {
        fn collect<'a>(items: &'a [MenuItem], out: &mut Vec<&'a MenuAction>) {
            for item in items {
                match item {
                    MenuItem::Action(action) => out.push(action),
                    MenuItem::Submenu { items, .. } => collect(items, out),
                    MenuItem::Separator => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.items, &mut out);
        out
    }

    /// First entry with the given label.
    pub fn find(&self, label: &str) -> Option<&MenuAction> {
        self.actions().into_iter().find(|a| a.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.actions().iter().map(|a| a.label.as_str()).collect()
    }
}

/// Drop hidden entries, then leading, trailing and doubled separators.
fn normalize(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut out: Vec<MenuItem> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(MenuItem::is_visible) {
        if item.is_separator() && out.last().map_or(true, MenuItem::is_separator) {
            continue;
        }
        out.push(item);
    }
    if out.last().is_some_and(MenuItem::is_separator) {
        out.pop();
    }
    out
}
