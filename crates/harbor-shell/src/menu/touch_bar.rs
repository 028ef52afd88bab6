//! macOS touch bar: back, forward, reload or stop, new tab.

use harbor_common::Action;
use serde::Serialize;

use super::SelectedView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TouchBarItem {
    /// Icon name understood by the host.
    pub icon: &'static str,
    pub action: Action,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TouchBar {
    pub items: Vec<TouchBarItem>,
}

/// Touch bar for the selected view, or just "new tab" when there is none.
pub fn touch_bar(selected: Option<&SelectedView>) -> TouchBar {
    let mut items = Vec::with_capacity(4);
    if let Some(&SelectedView {
        view,
        can_go_back,
        can_go_forward,
        is_loading,
        ..
    }) = selected
    {
        items.push(TouchBarItem {
            icon: "arrow_left",
            action: Action::Back(view),
            enabled: can_go_back,
        });
        items.push(TouchBarItem {
            icon: "arrow_right",
            action: Action::Forward(view),
            enabled: can_go_forward,
        });
        items.push(if is_loading {
            TouchBarItem {
                icon: "remove",
                action: Action::Stop(view),
                enabled: true,
            }
        } else {
            TouchBarItem {
                icon: "reload",
                action: Action::Reload(view),
                enabled: true,
            }
        });
    }
    items.push(TouchBarItem {
        icon: "tab_add",
        action: Action::NewTab {
            url: None,
            foreground: true,
        },
        enabled: true,
    });
    TouchBar { items }
}
