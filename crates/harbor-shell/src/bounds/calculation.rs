use harbor_common::{Rect, Size};
use harbor_config::schema::ChromeStyle;

use super::{
    BoundsInput, SidebarLayout, WINDOW_DOUBLE_TITLE_BAR_HEIGHT, WINDOW_DOUBLE_TOOL_BAR_HEIGHT,
    WINDOW_EXTENDED_SIDEBAR_WIDTH, WINDOW_EXTENDED_TAB_CONTAINER_WIDTH, WINDOW_SINGLE_LENGTH,
};

/// Height of the chrome above the content area.
pub fn chrome_height(style: ChromeStyle) -> u32 {
    match style {
        ChromeStyle::TopDouble => WINDOW_DOUBLE_TITLE_BAR_HEIGHT + WINDOW_DOUBLE_TOOL_BAR_HEIGHT,
        ChromeStyle::TopSingle | ChromeStyle::Left | ChromeStyle::Right => WINDOW_SINGLE_LENGTH,
    }
}

/// Width of the vertical tab strip / sidebar.
pub fn sidebar_width(sidebar: SidebarLayout) -> u32 {
    match (sidebar.extended, sidebar.tab_container) {
        (true, false) => WINDOW_EXTENDED_SIDEBAR_WIDTH,
        (true, true) => WINDOW_EXTENDED_TAB_CONTAINER_WIDTH,
        (false, _) => WINDOW_SINGLE_LENGTH,
    }
}

/// Rectangle for the selected view's surface.
///
/// Maximized and windowed layouts are identical; the flag is carried so the
/// host can distinguish them if it ever draws a different frame.
pub fn view_bounds(input: &BoundsInput) -> Rect {
    let Size { width, height } = input.content_size;

    if input.fullscreen.hides_chrome() {
        return Rect::new(0, 0, width, height);
    }

    let top = chrome_height(input.style);
    let side = sidebar_width(input.sidebar);
    match input.style {
        ChromeStyle::TopSingle | ChromeStyle::TopDouble => fit(0, top, width, height, width, height),
        ChromeStyle::Left => fit(
            side,
            top,
            width.saturating_sub(side),
            height,
            width,
            height,
        ),
        ChromeStyle::Right => fit(0, top, width.saturating_sub(side), height, width, height),
    }
}

/// Place a box at `(x, y)` of at most `width` columns, filling down to the
/// bottom edge, clamped to the window.
fn fit(x: u32, y: u32, width: u32, height: u32, window_w: u32, window_h: u32) -> Rect {
    let x = x.min(window_w);
    let y = y.min(window_h);
    let width = width.min(window_w - x);
    let height = height.saturating_sub(y).min(window_h - y);
    Rect::new(to_i32(x), to_i32(y), width, height)
}

pub(super) fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
