use super::{Action, EditCommand};
use crate::types::ViewId;

impl Action {
    /// Default human-readable label, used when a menu does not override it.
    pub fn label(&self) -> &'static str {
        match self {
            Action::NewTab { .. } => "New Tab",
            Action::DuplicateTab(_) => "Duplicate Tab",
            Action::CloseTab(_) => "Close Tab",
            Action::CloseOtherTabs(_) => "Close Other Tabs",
            Action::CloseLeftTabs(_) => "Close Tabs to the Left",
            Action::CloseRightTabs(_) => "Close Tabs to the Right",
            Action::SelectTab(_) => "Select Tab",
            Action::SelectNextTab => "Next Tab",
            Action::SelectPreviousTab => "Previous Tab",
            Action::TogglePin(_) => "Pin Tab",
            Action::ToggleMute(_) => "Mute Tab",
            Action::NewWindow { .. } => "New Window",
            Action::NewIncognitoWindow { .. } => "New Incognito Window",
            Action::CloseWindow => "Close Window",
            Action::ToggleFullscreen => "Toggle Full Screen",
            Action::ExitFullscreen => "Exit Full Screen",
            Action::Back(_) => "Back",
            Action::Forward(_) => "Forward",
            Action::Reload(_) => "Reload",
            Action::ReloadIgnoringCache(_) => "Hard Reload",
            Action::Stop(_) => "Stop",
            Action::Home(_) => "Home",
            Action::Load { .. } => "Open",
            Action::ViewSource(_) => "View Page Source",
            Action::SavePage(_) => "Save Page As…",
            Action::Print(_) => "Print…",
            Action::OpenDevTools(_) => "Inspect",
            Action::TogglePictureInPicture(_) => "Picture in Picture",
            Action::ZoomIn(_) => "Zoom In",
            Action::ZoomOut(_) => "Zoom Out",
            Action::ZoomReset(_) => "Actual Size",
            Action::FindInPage(_) => "Find…",
            Action::DownloadUrl { .. } => "Save As…",
            Action::Edit { command, .. } => match command {
                EditCommand::Undo => "Undo",
                EditCommand::Redo => "Redo",
                EditCommand::Cut => "Cut",
                EditCommand::Copy => "Copy",
                EditCommand::PasteAndMatchStyle => "Paste",
                EditCommand::Paste => "Paste as Plain Text",
                EditCommand::SelectAll => "Select All",
            },
            Action::CopyText(_) => "Copy",
            Action::ShowEmojiPanel => "Emoji & Symbols",
            Action::ShowHistory { .. } => "History",
            Action::ShowInformation { .. } => "Site Information",
            Action::None => "None",
        }
    }

    /// The view this action operates on, if it names one.
    pub fn target_view(&self) -> Option<ViewId> {
        match self {
            Action::DuplicateTab(v)
            | Action::CloseTab(v)
            | Action::CloseOtherTabs(v)
            | Action::CloseLeftTabs(v)
            | Action::CloseRightTabs(v)
            | Action::SelectTab(v)
            | Action::TogglePin(v)
            | Action::ToggleMute(v)
            | Action::Back(v)
            | Action::Forward(v)
            | Action::Reload(v)
            | Action::ReloadIgnoringCache(v)
            | Action::Stop(v)
            | Action::Home(v)
            | Action::ViewSource(v)
            | Action::SavePage(v)
            | Action::Print(v)
            | Action::OpenDevTools(v)
            | Action::TogglePictureInPicture(v)
            | Action::ZoomIn(v)
            | Action::ZoomOut(v)
            | Action::ZoomReset(v)
            | Action::FindInPage(v) => Some(*v),
            Action::Load { view, .. }
            | Action::DownloadUrl { view, .. }
            | Action::Edit { view, .. } => Some(*view),
            _ => None,
        }
    }
}
