use serde::{Deserialize, Serialize};

mod action_enum;
mod dispatch;

pub use action_enum::*;

/// Clipboard/edit commands forwarded to a content surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditCommand {
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    PasteAndMatchStyle,
    SelectAll,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViewId;

    #[test]
    fn labels_are_never_empty() {
        let view = ViewId(1);
        let actions = vec![
            Action::NewTab {
                url: None,
                foreground: true,
            },
            Action::CloseTab(view),
            Action::TogglePin(view),
            Action::Back(view),
            Action::Edit {
                view,
                command: EditCommand::Paste,
            },
            Action::ShowHistory { x: 0, y: 0 },
            Action::None,
        ];
        for action in &actions {
            assert!(!action.label().is_empty(), "{action:?} has empty label");
        }
    }

    #[test]
    fn edit_labels_follow_command() {
        let view = ViewId(1);
        let label = |command| Action::Edit { view, command }.label();
        assert_eq!(label(EditCommand::Undo), "Undo");
        assert_eq!(label(EditCommand::PasteAndMatchStyle), "Paste");
        assert_eq!(label(EditCommand::Paste), "Paste as Plain Text");
    }

    #[test]
    fn target_view() {
        assert_eq!(Action::Reload(ViewId(4)).target_view(), Some(ViewId(4)));
        assert_eq!(Action::ToggleFullscreen.target_view(), None);
        assert_eq!(
            Action::Load {
                view: ViewId(2),
                url: "https://example.com".into()
            }
            .target_view(),
            Some(ViewId(2))
        );
    }

    #[test]
    fn action_serde_roundtrip() {
        let actions = vec![
            Action::NewTab {
                url: Some("https://example.com".into()),
                foreground: false,
            },
            Action::CopyText("hello".into()),
            Action::ShowInformation { x: 12, y: 50 },
        ];

        for action in &actions {
            let json = serde_json::to_string(action).unwrap();
            let back: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(*action, back);
        }
    }
}
