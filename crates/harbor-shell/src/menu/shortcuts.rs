//! Accelerator strings shown next to menu entries.

pub const TAB_ADD: &str = "CmdOrCtrl+T";
pub const TAB_REMOVE: &str = "CmdOrCtrl+W";
pub const TAB_DUPLICATE: &str = "CmdOrCtrl+Shift+D";
pub const TAB_PIN: &str = "CmdOrCtrl+Shift+P";
pub const TAB_MUTE: &str = "CmdOrCtrl+Shift+M";
pub const TAB_NEXT: &str = "Ctrl+Tab";
pub const TAB_PREVIOUS: &str = "Ctrl+Shift+Tab";

pub const WINDOW_ADD: &str = "CmdOrCtrl+N";
pub const WINDOW_INCOGNITO: &str = "CmdOrCtrl+Shift+N";
pub const WINDOW_REMOVE: &str = "CmdOrCtrl+Shift+W";
pub const FULLSCREEN: &str = "F11";

pub const NAVIGATION_BACK: &str = "Alt+Left";
pub const NAVIGATION_FORWARD: &str = "Alt+Right";
pub const NAVIGATION_RELOAD: &str = "CmdOrCtrl+R";
pub const NAVIGATION_RELOAD_IGNORING_CACHE: &str = "CmdOrCtrl+Shift+R";
pub const NAVIGATION_HOME: &str = "Alt+Home";

pub const EDIT_UNDO: &str = "CmdOrCtrl+Z";
pub const EDIT_REDO: &str = "CmdOrCtrl+Shift+Z";
pub const EDIT_CUT: &str = "CmdOrCtrl+X";
pub const EDIT_COPY: &str = "CmdOrCtrl+C";
pub const EDIT_PASTE: &str = "CmdOrCtrl+V";
pub const EDIT_PASTE_AS_PLAIN_TEXT: &str = "CmdOrCtrl+Shift+V";
pub const EDIT_SELECT_ALL: &str = "CmdOrCtrl+A";
pub const EDIT_SHOW_EMOJI_PANEL: &str = "Super+.";
pub const EDIT_FIND: &str = "CmdOrCtrl+F";

pub const ZOOM_IN: &str = "CmdOrCtrl+Plus";
pub const ZOOM_OUT: &str = "CmdOrCtrl+-";
pub const ZOOM_RESET: &str = "CmdOrCtrl+0";

pub const SAVE_AS: &str = "CmdOrCtrl+S";
pub const PRINT: &str = "CmdOrCtrl+P";
pub const VIEW_SOURCE: &str = "CmdOrCtrl+U";
pub const DEVELOPER_TOOLS: &str = "CmdOrCtrl+Shift+I";
