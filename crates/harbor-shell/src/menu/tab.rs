//! Menu shown when right-clicking a tab in the chrome.

use harbor_common::{Action, ViewId};

use super::context::reload_or_stop;
use super::shortcuts;
use super::{Menu, MenuItem};

#[derive(Debug, Clone, Copy)]
pub struct TabMenuContext {
    pub view: ViewId,
    pub is_loading: bool,
    pub is_pinned: bool,
    pub is_muted: bool,
    pub has_others: bool,
    pub has_lefts: bool,
    pub has_rights: bool,
}

pub fn tab_menu(ctx: &TabMenuContext) -> Menu {
    let view = ctx.view;
    Menu::new(vec![
        MenuItem::labelled(
            "New Tab",
            Action::NewTab {
                url: None,
                foreground: true,
            },
        )
        .accelerator(shortcuts::TAB_ADD),
        MenuItem::Separator,
        reload_or_stop(view, ctx.is_loading),
        MenuItem::action(Action::DuplicateTab(view)).accelerator(shortcuts::TAB_DUPLICATE),
        MenuItem::labelled(
            if ctx.is_pinned { "Unpin Tab" } else { "Pin Tab" },
            Action::TogglePin(view),
        )
        .accelerator(shortcuts::TAB_PIN),
        MenuItem::labelled(
            if ctx.is_muted { "Unmute Tab" } else { "Mute Tab" },
            Action::ToggleMute(view),
        )
        .accelerator(shortcuts::TAB_MUTE),
        MenuItem::Separator,
        MenuItem::action(Action::CloseTab(view)).accelerator(shortcuts::TAB_REMOVE),
        MenuItem::action(Action::CloseOtherTabs(view)).enabled(ctx.has_others),
        MenuItem::action(Action::CloseLeftTabs(view)).enabled(ctx.has_lefts),
        MenuItem::action(Action::CloseRightTabs(view)).enabled(ctx.has_rights),
    ])
}
