//! Right-click menu for page content.

use harbor_common::url::{collapse_whitespace, is_url, with_default_scheme};
use harbor_common::{Action, EditCommand, ViewId};
use harbor_config::schema::SearchEngine;
use serde::{Deserialize, Serialize};

use super::shortcuts;
use super::{Menu, MenuItem};

/// Longest selection excerpt shown inside a menu label.
const LABEL_EXCERPT_CHARS: usize = 32;

const VIEW_SOURCE_PREFIX: &str = "view-source:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditFlags {
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_cut: bool,
    pub can_copy: bool,
    pub can_paste: bool,
    pub can_select_all: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuMediaType {
    #[default]
    None,
    Image,
    Audio,
    Video,
    Canvas,
    #[serde(other)]
    Other,
}

/// What was under the cursor, as reported by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextMenuParams {
    pub link_url: String,
    pub src_url: String,
    pub has_image_contents: bool,
    pub is_editable: bool,
    pub edit_flags: EditFlags,
    pub selection_text: String,
    pub media_type: MenuMediaType,
}

/// Shell-side state the menu depends on.
#[derive(Debug, Clone)]
pub struct ContextMenuContext<'a> {
    pub view: ViewId,
    pub url: &'a str,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub is_muted: bool,
    pub is_audible: bool,
    pub window_fullscreen: bool,
    pub emoji_panel_supported: bool,
    pub search_engine: Option<&'a SearchEngine>,
}

/// Build the context menu.
///
/// Link, image and selection sections win over the editable section, which
/// wins over the generic navigation menu. The developer section is always
/// appended.
pub fn context_menu(params: &ContextMenuParams, ctx: &ContextMenuContext<'_>) -> Menu {
    let link = link_section(params, ctx);
    let image = image_section(params, ctx);
    let selection = selection_section(params, ctx);

    if link.is_some() || image.is_some() || selection.is_some() {
        return Menu::from_sections(vec![link, image, selection, Some(developer_section(ctx))]);
    }

    if params.is_editable {
        return Menu::from_sections(vec![
            Some(editable_section(params, ctx)),
            Some(developer_section(ctx)),
        ]);
    }

    Menu::from_sections(vec![fullscreen_section(ctx), Some(generic_section(params, ctx))])
}

fn link_section(params: &ContextMenuParams, ctx: &ContextMenuContext<'_>) -> Option<Vec<MenuItem>> {
    if params.link_url.is_empty() {
        return None;
    }
    let url = params.link_url.clone();
    Some(vec![
        MenuItem::labelled(
            "Open Link in New Tab",
            Action::NewTab {
                url: Some(url.clone()),
                foreground: true,
            },
        )
        .accelerator(shortcuts::TAB_ADD),
        MenuItem::labelled("Open Link in New Window", Action::NewWindow { url: Some(url.clone()) })
            .accelerator(shortcuts::WINDOW_ADD),
        MenuItem::labelled(
            "Open Link in Incognito Window",
            Action::NewIncognitoWindow {
                url: Some(url.clone()),
            },
        )
        .accelerator(shortcuts::WINDOW_INCOGNITO),
        MenuItem::Separator,
        MenuItem::labelled(
            "Save Link As…",
            Action::DownloadUrl {
                view: ctx.view,
                url: url.clone(),
            },
        )
        .accelerator(shortcuts::SAVE_AS),
        MenuItem::labelled("Copy Link Address", Action::CopyText(url)),
    ])
}

fn image_section(params: &ContextMenuParams, ctx: &ContextMenuContext<'_>) -> Option<Vec<MenuItem>> {
    if !params.has_image_contents {
        return None;
    }
    let src = params.src_url.clone();
    Some(vec![
        MenuItem::labelled(
            "Open Image in New Tab",
            Action::NewTab {
                url: Some(src.clone()),
                foreground: true,
            },
        ),
        MenuItem::labelled(
            "Save Image As…",
            Action::DownloadUrl {
                view: ctx.view,
                url: src.clone(),
            },
        ),
        MenuItem::labelled("Copy Image Address", Action::CopyText(src)),
    ])
}

fn selection_section(
    params: &ContextMenuParams,
    ctx: &ContextMenuContext<'_>,
) -> Option<Vec<MenuItem>> {
    if params.selection_text.is_empty() {
        return None;
    }
    let mut items = vec![edit_item(EditCommand::Copy, ctx.view, params.edit_flags.can_copy)
        .accelerator(shortcuts::EDIT_COPY)];
    items.extend(selection_lookup_items(params, ctx));
    Some(items)
}

fn editable_section(params: &ContextMenuParams, ctx: &ContextMenuContext<'_>) -> Vec<MenuItem> {
    let flags = params.edit_flags;
    let mut items = Vec::new();

    if ctx.emoji_panel_supported {
        items.push(
            MenuItem::action(Action::ShowEmojiPanel).accelerator(shortcuts::EDIT_SHOW_EMOJI_PANEL),
        );
        items.push(MenuItem::Separator);
    }

    items.extend([
        edit_item(EditCommand::Undo, ctx.view, flags.can_undo).accelerator(shortcuts::EDIT_UNDO),
        edit_item(EditCommand::Redo, ctx.view, flags.can_redo).accelerator(shortcuts::EDIT_REDO),
        MenuItem::Separator,
        edit_item(EditCommand::Cut, ctx.view, flags.can_cut).accelerator(shortcuts::EDIT_CUT),
        edit_item(EditCommand::Copy, ctx.view, flags.can_copy).accelerator(shortcuts::EDIT_COPY),
        edit_item(EditCommand::PasteAndMatchStyle, ctx.view, flags.can_paste)
            .accelerator(shortcuts::EDIT_PASTE),
        edit_item(EditCommand::Paste, ctx.view, flags.can_paste)
            .accelerator(shortcuts::EDIT_PASTE_AS_PLAIN_TEXT),
        edit_item(EditCommand::SelectAll, ctx.view, flags.can_select_all)
            .accelerator(shortcuts::EDIT_SELECT_ALL),
    ]);

    if !params.selection_text.is_empty() {
        items.push(MenuItem::Separator);
        items.extend(selection_lookup_items(params, ctx));
    }
    items
}

/// "Search for …" or "Open …" for the selection, then print.
fn selection_lookup_items(params: &ContextMenuParams, ctx: &ContextMenuContext<'_>) -> Vec<MenuItem> {
    let can_copy = params.edit_flags.can_copy;
    let query = collapse_whitespace(&params.selection_text);
    let address = strip_line_breaks(&params.selection_text);

    let mut items = Vec::new();
    if let Some(engine) = ctx.search_engine {
        items.push(
            MenuItem::labelled(
                format!("Search {} for “{}”", engine.name, excerpt(&query)),
                Action::NewTab {
                    url: Some(engine.search_url(&query)),
                    foreground: true,
                },
            )
            .visible(can_copy && !is_url(&query)),
        );
    }
    items.push(
        MenuItem::labelled(
            format!("Open “{}”", excerpt(&address)),
            Action::NewTab {
                url: Some(with_default_scheme(&address)),
                foreground: true,
            },
        )
        .visible(can_copy && is_url(&address)),
    );
    items.push(MenuItem::action(Action::Print(ctx.view)).accelerator(shortcuts::PRINT));
    items
}

fn fullscreen_section(ctx: &ContextMenuContext<'_>) -> Option<Vec<MenuItem>> {
    ctx.window_fullscreen.then(|| {
        vec![MenuItem::action(Action::ExitFullscreen).accelerator(shortcuts::FULLSCREEN)]
    })
}

fn generic_section(params: &ContextMenuParams, ctx: &ContextMenuContext<'_>) -> Vec<MenuItem> {
    let view = ctx.view;
    let mut items = vec![
        MenuItem::action(Action::Back(view))
            .accelerator(shortcuts::NAVIGATION_BACK)
            .enabled(ctx.can_go_back),
        MenuItem::action(Action::Forward(view))
            .accelerator(shortcuts::NAVIGATION_FORWARD)
            .enabled(ctx.can_go_forward),
        reload_or_stop(view, ctx.is_loading),
    ];

    let has_media = matches!(params.media_type, MenuMediaType::Audio | MenuMediaType::Video);
    if has_media || ctx.is_audible {
        items.extend([
            MenuItem::Separator,
            MenuItem::labelled(
                if ctx.is_muted { "Unmute Site" } else { "Mute Site" },
                Action::ToggleMute(view),
            ),
            MenuItem::action(Action::TogglePictureInPicture(view)),
        ]);
    }

    items.extend([
        MenuItem::Separator,
        MenuItem::action(Action::SavePage(view)).accelerator(shortcuts::SAVE_AS),
        MenuItem::action(Action::Print(view)).accelerator(shortcuts::PRINT),
        MenuItem::Separator,
        MenuItem::action(Action::ViewSource(view))
            .accelerator(shortcuts::VIEW_SOURCE)
            .enabled(!ctx.url.starts_with(VIEW_SOURCE_PREFIX)),
        MenuItem::action(Action::OpenDevTools(view)).accelerator(shortcuts::DEVELOPER_TOOLS),
    ]);
    items
}

fn developer_section(ctx: &ContextMenuContext<'_>) -> Vec<MenuItem> {
    vec![MenuItem::action(Action::OpenDevTools(ctx.view)).accelerator(shortcuts::DEVELOPER_TOOLS)]
}

pub(super) fn reload_or_stop(view: ViewId, is_loading: bool) -> MenuItem {
    let action = if is_loading {
        Action::Stop(view)
    } else {
        Action::Reload(view)
    };
    MenuItem::action(action).accelerator(shortcuts::NAVIGATION_RELOAD)
}

fn edit_item(command: EditCommand, view: ViewId, enabled: bool) -> MenuItem {
    MenuItem::action(Action::Edit { view, command }).enabled(enabled)
}

fn strip_line_breaks(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\n' && *c != '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= LABEL_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(LABEL_EXCERPT_CHARS).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: ViewId = ViewId(7);

    fn google() -> SearchEngine {
        SearchEngine::new("Google", "https://www.google.com/search?q=%s")
    }

    fn ctx<'a>(engine: &'a SearchEngine) -> ContextMenuContext<'a> {
        ContextMenuContext {
            view: VIEW,
            url: "https://example.com",
            can_go_back: true,
            can_go_forward: false,
            is_loading: false,
            is_muted: false,
            is_audible: false,
            window_fullscreen: false,
            emoji_panel_supported: false,
            search_engine: Some(engine),
        }
    }

    fn copyable(selection: &str) -> ContextMenuParams {
        ContextMenuParams {
            selection_text: selection.into(),
            edit_flags: EditFlags {
                can_copy: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn generic_menu() {
        let engine = google();
        let menu = context_menu(&ContextMenuParams::default(), &ctx(&engine));
        assert_eq!(
            menu.labels(),
            vec![
                "Back",
                "Forward",
                "Reload",
                "Save Page As…",
                "Print…",
                "View Page Source",
                "Inspect"
            ]
        );
        assert!(menu.find("Back").unwrap().enabled);
        assert!(!menu.find("Forward").unwrap().enabled);
    }

    #[test]
    fn generic_menu_while_loading_offers_stop() {
        let engine = google();
        let mut context = ctx(&engine);
        context.is_loading = true;
        let menu = context_menu(&ContextMenuParams::default(), &context);
        assert_eq!(menu.find("Stop").unwrap().action, Action::Stop(VIEW));
        assert!(menu.find("Reload").is_none());
    }

    #[test]
    fn fullscreen_exit_leads_generic_menu() {
        let engine = google();
        let mut context = ctx(&engine);
        context.window_fullscreen = true;
        let menu = context_menu(&ContextMenuParams::default(), &context);
        assert_eq!(menu.labels()[0], "Exit Full Screen");
        assert!(menu.items[1].is_separator());
    }

    #[test]
    fn media_section_for_audible_page() {
        let engine = google();
        let mut context = ctx(&engine);
        context.is_audible = true;
        context.is_muted = true;
        let menu = context_menu(&ContextMenuParams::default(), &context);
        assert_eq!(menu.find("Unmute Site").unwrap().action, Action::ToggleMute(VIEW));
        assert!(menu.find("Picture in Picture").is_some());

        let video = ContextMenuParams {
            media_type: MenuMediaType::Video,
            ..Default::default()
        };
        let menu = context_menu(&video, &ctx(&engine));
        assert!(menu.find("Mute Site").is_some());
    }

    #[test]
    fn view_source_disabled_on_source_pages() {
        let engine = google();
        let mut context = ctx(&engine);
        context.url = "view-source:https://example.com";
        let menu = context_menu(&ContextMenuParams::default(), &context);
        assert!(!menu.find("View Page Source").unwrap().enabled);
    }

    #[test]
    fn link_menu() {
        let engine = google();
        let params = ContextMenuParams {
            link_url: "https://rust-lang.org".into(),
            ..Default::default()
        };
        let menu = context_menu(&params, &ctx(&engine));
        assert_eq!(
            menu.labels(),
            vec![
                "Open Link in New Tab",
                "Open Link in New Window",
                "Open Link in Incognito Window",
                "Save Link As…",
                "Copy Link Address",
                "Inspect"
            ]
        );
        assert_eq!(
            menu.find("Copy Link Address").unwrap().action,
            Action::CopyText("https://rust-lang.org".into())
        );
    }

    #[test]
    fn link_and_image_sections_combine() {
        let engine = google();
        let params = ContextMenuParams {
            link_url: "https://a.example".into(),
            src_url: "https://a.example/cat.png".into(),
            has_image_contents: true,
            ..Default::default()
        };
        let menu = context_menu(&params, &ctx(&engine));
        let separators = menu.items.iter().filter(|i| i.is_separator()).count();
        // link (one inner separator) | image | developer
        assert_eq!(separators, 3);
        assert_eq!(
            menu.find("Save Image As…").unwrap().action,
            Action::DownloadUrl {
                view: VIEW,
                url: "https://a.example/cat.png".into()
            }
        );
    }

    #[test]
    fn selection_offers_search_for_text() {
        let engine = google();
        let menu = context_menu(&copyable("  rust\n\tborrow   checker "), &ctx(&engine));
        let search = menu.find("Search Google for “rust borrow checker”").unwrap();
        assert_eq!(
            search.action,
            Action::NewTab {
                url: Some("https://www.google.com/search?q=rust%20borrow%20checker".into()),
                foreground: true
            }
        );
        assert!(menu.labels().iter().all(|l| !l.starts_with("Open “")));
    }

    #[test]
    fn selection_offers_open_for_url() {
        let engine = google();
        let menu = context_menu(&copyable("example.com/docs"), &ctx(&engine));
        let open = menu.find("Open “example.com/docs”").unwrap();
        assert_eq!(
            open.action,
            Action::NewTab {
                url: Some("https://example.com/docs".into()),
                foreground: true
            }
        );
        assert!(menu.labels().iter().all(|l| !l.starts_with("Search")));
    }

    #[test]
    fn selection_lookup_hidden_without_copy() {
        let engine = google();
        let params = ContextMenuParams {
            selection_text: "hello".into(),
            ..Default::default()
        };
        let menu = context_menu(&params, &ctx(&engine));
        assert_eq!(menu.labels(), vec!["Copy", "Print…", "Inspect"]);
        assert!(!menu.find("Copy").unwrap().enabled);
    }

    #[test]
    fn long_selection_is_excerpted() {
        let engine = google();
        let text = "a".repeat(40) + " tail";
        let menu = context_menu(&copyable(&text), &ctx(&engine));
        let label = format!("Search Google for “{}…”", "a".repeat(32));
        assert!(menu.find(&label).is_some());
    }

    #[test]
    fn editable_menu() {
        let engine = google();
        let params = ContextMenuParams {
            is_editable: true,
            edit_flags: EditFlags {
                can_paste: true,
                can_select_all: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let menu = context_menu(&params, &ctx(&engine));
        assert_eq!(
            menu.labels(),
            vec![
                "Undo",
                "Redo",
                "Cut",
                "Copy",
                "Paste",
                "Paste as Plain Text",
                "Select All",
                "Inspect"
            ]
        );
        assert!(!menu.find("Undo").unwrap().enabled);
        assert!(menu.find("Paste").unwrap().enabled);
        assert_eq!(
            menu.find("Paste").unwrap().action,
            Action::Edit {
                view: VIEW,
                command: EditCommand::PasteAndMatchStyle
            }
        );
    }

    #[test]
    fn editable_menu_with_emoji_panel() {
        let engine = google();
        let mut context = ctx(&engine);
        context.emoji_panel_supported = true;
        let params = ContextMenuParams {
            is_editable: true,
            ..Default::default()
        };
        let menu = context_menu(&params, &context);
        assert_eq!(menu.labels()[0], "Emoji & Symbols");
    }

    #[test]
    fn params_deserialize_from_camel_case() {
        let params: ContextMenuParams = serde_json::from_value(serde_json::json!({
            "linkUrl": "https://a.example",
            "isEditable": true,
            "editFlags": { "canPaste": true },
            "mediaType": "audio"
        }))
        .unwrap();
        assert_eq!(params.link_url, "https://a.example");
        assert!(params.is_editable);
        assert!(params.edit_flags.can_paste);
        assert_eq!(params.media_type, MenuMediaType::Audio);
    }
}
