use serde::{Deserialize, Serialize};

use super::EditCommand;
use crate::types::ViewId;

/// Every user-triggerable action in the browser.
///
/// Menus, the touch bar and keyboard shortcuts all resolve to an `Action`.
/// The shell matches on this enum to route to windows, views and dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Tabs --
    NewTab {
        url: Option<String>,
        foreground: bool,
    },
    DuplicateTab(ViewId),
    CloseTab(ViewId),
    CloseOtherTabs(ViewId),
    CloseLeftTabs(ViewId),
    CloseRightTabs(ViewId),
    SelectTab(ViewId),
    SelectNextTab,
    SelectPreviousTab,
    TogglePin(ViewId),
    ToggleMute(ViewId),

    // -- Window --
    NewWindow {
        url: Option<String>,
    },
    NewIncognitoWindow {
        url: Option<String>,
    },
    CloseWindow,
    ToggleFullscreen,
    ExitFullscreen,

    // -- Navigation --
    Back(ViewId),
    Forward(ViewId),
    Reload(ViewId),
    ReloadIgnoringCache(ViewId),
    Stop(ViewId),
    Home(ViewId),
    Load {
        view: ViewId,
        url: String,
    },
    ViewSource(ViewId),

    // -- Page --
    SavePage(ViewId),
    Print(ViewId),
    OpenDevTools(ViewId),
    TogglePictureInPicture(ViewId),
    ZoomIn(ViewId),
    ZoomOut(ViewId),
    ZoomReset(ViewId),
    FindInPage(ViewId),
    DownloadUrl {
        view: ViewId,
        url: String,
    },

    // -- Edit --
    Edit {
        view: ViewId,
        command: EditCommand,
    },
    CopyText(String),
    ShowEmojiPanel,

    // -- Dialogs --
    ShowHistory {
        x: i32,
        y: i32,
    },
    ShowInformation {
        x: i32,
        y: i32,
    },

    // -- Noop --
    None,
}
