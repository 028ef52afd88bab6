use harbor_common::{Rect, Size};
use harbor_config::schema::ChromeStyle;

use super::calculation::{chrome_height, to_i32};

pub const FIND_DIALOG_WIDTH: u32 = 380;
pub const FIND_DIALOG_HEIGHT: u32 = 70;
/// Distance from the find dialog's left edge to the window's right edge.
const FIND_DIALOG_RIGHT_OFFSET: u32 = 400;

pub const HISTORY_DIALOG_WIDTH: u32 = 350;
pub const HISTORY_DIALOG_HEIGHT: u32 = 660;
const HISTORY_DIALOG_ANCHOR_OFFSET: i32 = 300;

pub const INFORMATION_DIALOG_WIDTH: u32 = 350;
pub const INFORMATION_DIALOG_HEIGHT: u32 = 460;
const INFORMATION_DIALOG_ANCHOR_OFFSET: i32 = 15;

/// Find bar: top-right corner, just below the toolbar.
pub fn find_dialog_bounds(content_size: Size, style: ChromeStyle) -> Rect {
    Rect::new(
        to_i32(content_size.width.saturating_sub(FIND_DIALOG_RIGHT_OFFSET)),
        to_i32(chrome_height(style)),
        FIND_DIALOG_WIDTH,
        FIND_DIALOG_HEIGHT,
    )
}

/// History panel, opened from the toolbar button at `(x, y)`.
pub fn history_dialog_bounds(x: i32, y: i32) -> Rect {
    Rect::new(
        x.saturating_sub(HISTORY_DIALOG_ANCHOR_OFFSET),
        y,
        HISTORY_DIALOG_WIDTH,
        HISTORY_DIALOG_HEIGHT,
    )
}

/// Site information panel, opened from the address bar icon at `(x, y)`.
pub fn information_dialog_bounds(x: i32, y: i32) -> Rect {
    Rect::new(
        x.saturating_sub(INFORMATION_DIALOG_ANCHOR_OFFSET),
        y,
        INFORMATION_DIALOG_WIDTH,
        INFORMATION_DIALOG_HEIGHT,
    )
}
