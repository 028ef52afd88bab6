use harbor_common::{Rect, Size};
use harbor_config::schema::{ChromeStyle, SidebarConfig, SidebarState};

use super::*;

const STYLES: [ChromeStyle; 4] = [
    ChromeStyle::TopSingle,
    ChromeStyle::TopDouble,
    ChromeStyle::Left,
    ChromeStyle::Right,
];

const SIDEBARS: [SidebarLayout; 3] = [
    SidebarLayout {
        extended: false,
        tab_container: false,
    },
    SidebarLayout {
        extended: true,
        tab_container: true,
    },
    SidebarLayout {
        extended: true,
        tab_container: false,
    },
];

/// (fullscreen, maximized) pairs: normal, maximized, fullscreen with and
/// without toolbar, element fullscreen.
const STATES: [(FullscreenState, bool); 5] = [
    (FullscreenState::None, false),
    (FullscreenState::None, true),
    (FullscreenState::WithToolbar, false),
    (FullscreenState::WithoutToolbar, false),
    (FullscreenState::Html, false),
];

fn input(width: u32, height: u32, style: ChromeStyle) -> BoundsInput {
    BoundsInput {
        content_size: Size::new(width, height),
        style,
        fullscreen: FullscreenState::None,
        maximized: false,
        sidebar: SidebarLayout::default(),
    }
}

#[test]
fn fullscreen_state_resolution() {
    assert_eq!(FullscreenState::resolve(false, true, true), FullscreenState::None);
    assert_eq!(FullscreenState::resolve(true, true, true), FullscreenState::Html);
    assert_eq!(FullscreenState::resolve(true, false, true), FullscreenState::WithToolbar);
    assert_eq!(
        FullscreenState::resolve(true, false, false),
        FullscreenState::WithoutToolbar
    );
}

#[test]
fn sidebar_widths() {
    assert_eq!(sidebar_width(SIDEBARS[0]), 50);
    assert_eq!(sidebar_width(SIDEBARS[1]), 250);
    assert_eq!(sidebar_width(SIDEBARS[2]), 350);
}

#[test]
fn sidebar_layout_from_config() {
    let config = SidebarConfig {
        extended: true,
        state: SidebarState::History,
    };
    let layout = SidebarLayout::from(&config);
    assert!(layout.extended);
    assert!(!layout.tab_container);
}

#[test]
fn chrome_heights() {
    assert_eq!(chrome_height(ChromeStyle::TopSingle), 50);
    assert_eq!(chrome_height(ChromeStyle::TopDouble), 78);
    assert_eq!(chrome_height(ChromeStyle::Left), 50);
    assert_eq!(chrome_height(ChromeStyle::Right), 50);
}

#[test]
fn windowed_offsets() {
    assert_eq!(
        view_bounds(&input(1280, 800, ChromeStyle::TopSingle)),
        Rect::new(0, 50, 1280, 750)
    );
    assert_eq!(
        view_bounds(&input(1280, 800, ChromeStyle::TopDouble)),
        Rect::new(0, 78, 1280, 722)
    );
    assert_eq!(
        view_bounds(&input(1280, 800, ChromeStyle::Left)),
        Rect::new(50, 50, 1230, 750)
    );
    assert_eq!(
        view_bounds(&input(1280, 800, ChromeStyle::Right)),
        Rect::new(0, 50, 1230, 750)
    );
}

#[test]
fn extended_sidebar_offsets() {
    let mut left = input(1280, 800, ChromeStyle::Left);
    left.sidebar = SIDEBARS[2];
    assert_eq!(view_bounds(&left), Rect::new(350, 50, 930, 750));

    let mut right = input(1280, 800, ChromeStyle::Right);
    right.sidebar = SIDEBARS[1];
    assert_eq!(view_bounds(&right), Rect::new(0, 50, 1030, 750));
}

#[test]
fn sidebar_ignored_for_top_styles() {
    let mut top = input(1280, 800, ChromeStyle::TopSingle);
    top.sidebar = SIDEBARS[2];
    assert_eq!(view_bounds(&top), Rect::new(0, 50, 1280, 750));
}

#[test]
fn maximized_matches_windowed() {
    for style in STYLES {
        let windowed = input(1440, 900, style);
        let maximized = BoundsInput {
            maximized: true,
            ..windowed
        };
        assert_eq!(view_bounds(&windowed), view_bounds(&maximized), "{style:?}");
    }
}

#[test]
fn fullscreen_with_toolbar_keeps_chrome() {
    for style in STYLES {
        let windowed = input(1440, 900, style);
        let fullscreen = BoundsInput {
            fullscreen: FullscreenState::WithToolbar,
            ..windowed
        };
        assert_eq!(view_bounds(&windowed), view_bounds(&fullscreen), "{style:?}");
    }
}

#[test]
fn chromeless_states_cover_window() {
    for style in STYLES {
        for fullscreen in [FullscreenState::Html, FullscreenState::WithoutToolbar] {
            let bounds = view_bounds(&BoundsInput {
                fullscreen,
                ..input(1440, 900, style)
            });
            assert_eq!(bounds, Rect::new(0, 0, 1440, 900), "{style:?} {fullscreen:?}");
        }
    }
}

#[test]
fn bounds_never_exceed_window() {
    let sizes = [
        Size::new(0, 0),
        Size::new(30, 20),
        Size::new(60, 60),
        Size::new(300, 70),
        Size::new(1280, 800),
        Size::new(3840, 2160),
    ];

    for size in sizes {
        for style in STYLES {
            for sidebar in SIDEBARS {
                for (fullscreen, maximized) in STATES {
                    let bounds = view_bounds(&BoundsInput {
                        content_size: size,
                        style,
                        fullscreen,
                        maximized,
                        sidebar,
                    });
                    let ctx = format!("{size:?} {style:?} {sidebar:?} {fullscreen:?}");
                    assert!(bounds.x >= 0 && bounds.y >= 0, "{ctx}");
                    assert!(bounds.right() <= size.width as i64, "{ctx}: {bounds:?}");
                    assert!(bounds.bottom() <= size.height as i64, "{ctx}: {bounds:?}");
                }
            }
        }
    }
}

#[test]
fn find_dialog_anchor() {
    assert_eq!(
        find_dialog_bounds(Size::new(1280, 800), ChromeStyle::TopSingle),
        Rect::new(880, 50, 380, 70)
    );
    assert_eq!(
        find_dialog_bounds(Size::new(1280, 800), ChromeStyle::TopDouble),
        Rect::new(880, 78, 380, 70)
    );
    assert_eq!(
        find_dialog_bounds(Size::new(200, 800), ChromeStyle::Left).x,
        0
    );
}

#[test]
fn popup_dialog_anchors() {
    assert_eq!(history_dialog_bounds(900, 40), Rect::new(600, 40, 350, 660));
    assert_eq!(information_dialog_bounds(100, 40), Rect::new(85, 40, 350, 460));
}
