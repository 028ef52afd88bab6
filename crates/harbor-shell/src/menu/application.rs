//! Window-level application menu, rebuilt whenever the selected view changes.

use harbor_common::{Action, EditCommand};

use super::context::reload_or_stop;
use super::shortcuts;
use super::{Menu, MenuItem, SelectedView};

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationMenuContext {
    pub selected: Option<SelectedView>,
    pub is_fullscreen: bool,
}

pub fn application_menu(ctx: &ApplicationMenuContext) -> Menu {
    Menu::new(vec![
        MenuItem::submenu("File", file_items(ctx)),
        MenuItem::submenu("Edit", edit_items(ctx)),
        MenuItem::submenu("View", view_items(ctx)),
        MenuItem::submenu("Navigation", navigation_items(ctx)),
        MenuItem::submenu("Tab", tab_items(ctx)),
    ])
}

fn file_items(ctx: &ApplicationMenuContext) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::labelled(
            "New Tab",
            Action::NewTab {
                url: None,
                foreground: true,
            },
        )
        .accelerator(shortcuts::TAB_ADD),
        MenuItem::action(Action::NewWindow { url: None }).accelerator(shortcuts::WINDOW_ADD),
        MenuItem::action(Action::NewIncognitoWindow { url: None })
            .accelerator(shortcuts::WINDOW_INCOGNITO),
        MenuItem::Separator,
    ];
    if let Some(selected) = ctx.selected {
        items.push(MenuItem::action(Action::SavePage(selected.view)).accelerator(shortcuts::SAVE_AS));
        items.push(MenuItem::action(Action::Print(selected.view)).accelerator(shortcuts::PRINT));
        items.push(MenuItem::Separator);
        items.push(MenuItem::action(Action::CloseTab(selected.view)).accelerator(shortcuts::TAB_REMOVE));
    }
    items.push(MenuItem::action(Action::CloseWindow).accelerator(shortcuts::WINDOW_REMOVE));
    items
}

fn edit_items(ctx: &ApplicationMenuContext) -> Vec<MenuItem> {
    let Some(selected) = ctx.selected else {
        return Vec::new();
    };
    let edit = |command, accelerator| {
        MenuItem::action(Action::Edit {
            view: selected.view,
            command,
        })
        .accelerator(accelerator)
    };
    vec![
        edit(EditCommand::Undo, shortcuts::EDIT_UNDO),
        edit(EditCommand::Redo, shortcuts::EDIT_REDO),
        MenuItem::Separator,
        edit(EditCommand::Cut, shortcuts::EDIT_CUT),
        edit(EditCommand::Copy, shortcuts::EDIT_COPY),
        edit(EditCommand::PasteAndMatchStyle, shortcuts::EDIT_PASTE),
        edit(EditCommand::Paste, shortcuts::EDIT_PASTE_AS_PLAIN_TEXT),
        edit(EditCommand::SelectAll, shortcuts::EDIT_SELECT_ALL),
        MenuItem::Separator,
        MenuItem::action(Action::FindInPage(selected.view)).accelerator(shortcuts::EDIT_FIND),
    ]
}

fn view_items(ctx: &ApplicationMenuContext) -> Vec<MenuItem> {
    let mut items = Vec::new();
    if let Some(selected) = ctx.selected {
        let view = selected.view;
        items.extend([
            reload_or_stop(view, selected.is_loading),
            MenuItem::action(Action::ReloadIgnoringCache(view))
                .accelerator(shortcuts::NAVIGATION_RELOAD_IGNORING_CACHE),
            MenuItem::Separator,
            MenuItem::action(Action::ZoomIn(view)).accelerator(shortcuts::ZOOM_IN),
            MenuItem::action(Action::ZoomOut(view)).accelerator(shortcuts::ZOOM_OUT),
            MenuItem::action(Action::ZoomReset(view)).accelerator(shortcuts::ZOOM_RESET),
            MenuItem::Separator,
        ]);
    }
    items.push(
        MenuItem::labelled(
            if ctx.is_fullscreen {
                "Exit Full Screen"
            } else {
                "Enter Full Screen"
            },
            Action::ToggleFullscreen,
        )
        .accelerator(shortcuts::FULLSCREEN),
    );
    if let Some(selected) = ctx.selected {
        items.push(MenuItem::Separator);
        items.push(
            MenuItem::action(Action::ViewSource(selected.view)).accelerator(shortcuts::VIEW_SOURCE),
        );
        items.push(
            MenuItem::action(Action::OpenDevTools(selected.view))
                .accelerator(shortcuts::DEVELOPER_TOOLS),
        );
    }
    items
}

fn navigation_items(ctx: &ApplicationMenuContext) -> Vec<MenuItem> {
    let Some(selected) = ctx.selected else {
        return Vec::new();
    };
    vec![
        MenuItem::action(Action::Back(selected.view))
            .accelerator(shortcuts::NAVIGATION_BACK)
            .enabled(selected.can_go_back),
        MenuItem::action(Action::Forward(selected.view))
            .accelerator(shortcuts::NAVIGATION_FORWARD)
            .enabled(selected.can_go_forward),
        MenuItem::action(Action::Home(selected.view)).accelerator(shortcuts::NAVIGATION_HOME),
    ]
}

fn tab_items(ctx: &ApplicationMenuContext) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::action(Action::SelectNextTab).accelerator(shortcuts::TAB_NEXT),
        MenuItem::action(Action::SelectPreviousTab).accelerator(shortcuts::TAB_PREVIOUS),
    ];
    if let Some(selected) = ctx.selected {
        let view = selected.view;
        items.extend([
            MenuItem::Separator,
            MenuItem::action(Action::DuplicateTab(view)).accelerator(shortcuts::TAB_DUPLICATE),
            MenuItem::labelled(
                if selected.is_pinned { "Unpin Tab" } else { "Pin Tab" },
                Action::TogglePin(view),
            )
            .accelerator(shortcuts::TAB_PIN),
            MenuItem::labelled(
                if selected.is_muted { "Unmute Tab" } else { "Mute Tab" },
                Action::ToggleMute(view),
            )
            .accelerator(shortcuts::TAB_MUTE),
        ]);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_common::ViewId;

    fn selected() -> SelectedView {
        SelectedView {
            view: ViewId(4),
            can_go_back: true,
            can_go_forward: false,
            is_loading: false,
            is_pinned: true,
            is_muted: false,
        }
    }

    fn submenu_labels(menu: &Menu) -> Vec<&str> {
        menu.items
            .iter()
            .filter_map(|item| match item {
                MenuItem::Submenu { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn all_submenus_with_selection() {
        let menu = application_menu(&ApplicationMenuContext {
            selected: Some(selected()),
            is_fullscreen: false,
        });
        assert_eq!(
            submenu_labels(&menu),
            vec!["File", "Edit", "View", "Navigation", "Tab"]
        );
        assert_eq!(menu.find("Unpin Tab").unwrap().action, Action::TogglePin(ViewId(4)));
        assert!(!menu.find("Forward").unwrap().enabled);
        assert!(menu.find("Enter Full Screen").is_some());
    }

    #[test]
    fn empty_window_drops_view_submenus() {
        let menu = application_menu(&ApplicationMenuContext {
            selected: None,
            is_fullscreen: true,
        });
        assert_eq!(submenu_labels(&menu), vec!["File", "View", "Tab"]);
        assert!(menu.find("Close Tab").is_none());
        assert!(menu.find("Exit Full Screen").is_some());
    }
}
