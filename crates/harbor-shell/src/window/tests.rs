use harbor_common::{ProfileId, Rect, WindowId};
use harbor_config::schema::{AppearanceConfig, ChromeStyle};

use super::*;
use crate::host::headless::HeadlessHost;
use crate::host::{HostRuntime, WindowSpec};
use crate::view::View;

fn window(runtime: &mut Box<dyn HostRuntime>, profile: &str) -> Window {
    let spec = WindowSpec {
        title: APPLICATION_NAME.into(),
        profile: ProfileId::from(profile),
        incognito: false,
    };
    Window::new(runtime.create_window(&spec).unwrap(), ProfileId::from(profile), false)
}

fn add(host: &HeadlessHost, window: &mut Window, url: &str, foreground: bool) -> ViewId {
    let view = View::new(
        window.id(),
        window.profile().clone(),
        false,
        host.surface(window.id(), url),
    );
    window.views_mut().add(view, foreground)
}

#[test]
fn title_formats_page_title() {
    assert_eq!(window_title(Some("Example")), "Example - Harbor");
    assert_eq!(window_title(Some("")), "Harbor");
    assert_eq!(window_title(None), "Harbor");
}

#[test]
fn layout_selected_attaches_at_view_bounds() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut w = window(&mut runtime, "p");
    let first = add(&host, &mut w, "https://a.example", true);

    let rect = w.layout_selected(&AppearanceConfig::default());
    assert_eq!(rect, Some(Rect::new(0, 50, 1280, 750)));
    let state = host.state();
    assert_eq!(state.window(w.id()).unwrap().top_surface().map(|s| s.0), Some(first.0));
}

#[test]
fn layout_follows_chrome_style() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut w = window(&mut runtime, "p");
    add(&host, &mut w, "https://a.example", true);

    let appearance = AppearanceConfig {
        style: ChromeStyle::TopDouble,
        ..Default::default()
    };
    assert_eq!(w.layout_selected(&appearance), Some(Rect::new(0, 78, 1280, 722)));
}

#[test]
fn layout_without_views_is_none() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut w = window(&mut runtime, "p");
    assert_eq!(w.layout_selected(&AppearanceConfig::default()), None);
}

#[test]
fn html_fullscreen_needs_window_fullscreen() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut w = window(&mut runtime, "p");
    let appearance = AppearanceConfig::default();

    w.set_html_fullscreen(true);
    assert_eq!(w.fullscreen_state(&appearance), FullscreenState::None);

    w.host_mut().set_fullscreen(true);
    assert_eq!(w.fullscreen_state(&appearance), FullscreenState::Html);
    w.set_html_fullscreen(false);
    assert_eq!(w.fullscreen_state(&appearance), FullscreenState::WithToolbar);
}

#[test]
fn update_view_titles_only_for_selected() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut w = window(&mut runtime, "p");
    let selected = add(&host, &mut w, "https://a.example", true);
    let background = add(&host, &mut w, "https://b.example", false);

    w.update_view(background);
    assert_eq!(host.state().window(w.id()).unwrap().title, "Harbor");

    w.update_view(selected);
    let state = host.state();
    let record = state.window(w.id()).unwrap();
    assert_eq!(record.title, "https://a.example - Harbor");
    assert!(record.application_menu.is_some());
    assert_eq!(record.sent_on(&channels::view(w.id())).len(), 2);
}

#[test]
fn touch_bar_only_when_supported() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut w = window(&mut runtime, "p");
    add(&host, &mut w, "https://a.example", true);

    w.update_chrome();
    assert!(host.state().window(w.id()).unwrap().touch_bar.is_none());

    host.state_mut().touch_bar_supported = true;
    w.update_chrome();
    assert!(host.state().window(w.id()).unwrap().touch_bar.is_some());
}

#[test]
fn tab_menu_context_reports_neighbours() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut w = window(&mut runtime, "p");
    let a = add(&host, &mut w, "https://a.example", true);
    let b = add(&host, &mut w, "https://b.example", false);

    let ctx = w.tab_menu_context(a).unwrap();
    assert!(ctx.has_others && ctx.has_rights && !ctx.has_lefts);
    let ctx = w.tab_menu_context(b).unwrap();
    assert!(ctx.has_lefts && !ctx.has_rights);
    assert!(w.tab_menu_context(ViewId(999)).is_none());
}

// =============================================================================
// WINDOW MANAGER
// =============================================================================

#[test]
fn manager_finds_views_and_profiles() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut manager = WindowManager::new();

    let mut first = window(&mut runtime, "p");
    let view = add(&host, &mut first, "https://a.example", true);
    let first = manager.insert(first);
    let second = manager.insert(window(&mut runtime, "q"));

    assert_eq!(manager.window_for_view(view), Some(first));
    assert_eq!(manager.windows_for_profile(&ProfileId::from("q")), vec![second]);
    assert!(manager.view(view).is_some());
    assert!(manager.view(ViewId(999)).is_none());
    assert_eq!(manager.ids(), vec![first, second]);
}

#[test]
fn manager_move_view_is_atomic() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut manager = WindowManager::new();

    let mut source = window(&mut runtime, "p");
    let keep = add(&host, &mut source, "https://a.example", true);
    let moved = add(&host, &mut source, "https://b.example", false);
    let source = manager.insert(source);
    let target = manager.insert(window(&mut runtime, "p"));

    assert!(!manager.move_view(moved, WindowId(999)));
    assert_eq!(manager.window_for_view(moved), Some(source));
    assert!(!manager.move_view(moved, source));

    assert!(manager.move_view(moved, target));
    assert_eq!(manager.get(source).unwrap().views().ids(), vec![keep]);
    let target_window = manager.get(target).unwrap();
    assert_eq!(target_window.views().selected_id(), Some(moved));
    assert_eq!(manager.view(moved).unwrap().window(), target);
}

#[test]
fn manager_move_view_stays_within_profile() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut manager = WindowManager::new();

    let mut source = window(&mut runtime, "p");
    let moved = add(&host, &mut source, "https://a.example", true);
    let source = manager.insert(source);
    let other = manager.insert(window(&mut runtime, "q"));

    assert!(!manager.move_view(moved, other));
    assert_eq!(manager.window_for_view(moved), Some(source));
    assert!(manager.get(other).unwrap().views().is_empty());
}

#[test]
fn manager_remove_returns_window() {
    let host = HeadlessHost::new();
    let mut runtime = host.runtime();
    let mut manager = WindowManager::new();
    let id = manager.insert(window(&mut runtime, "p"));

    assert!(manager.remove(id).is_some());
    assert!(manager.is_empty());
    assert!(manager.remove(id).is_none());
}
