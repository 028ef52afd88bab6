use harbor_common::{ProfileId, WindowId};

use super::*;
use crate::host::headless::HeadlessHost;

fn view(host: &HeadlessHost, url: &str) -> View {
    View::new(
        WindowId(1),
        ProfileId::from("p"),
        false,
        host.surface(WindowId(1), url),
    )
}

#[test]
fn id_follows_surface() {
    let host = HeadlessHost::new();
    let view = view(&host, "https://a.example");
    assert_eq!(view.id().0, view.surface().id().0);
}

#[test]
fn back_and_forward_are_noops_at_the_ends() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "https://a.example");

    view.back();
    assert_eq!(view.url(), "https://a.example");

    view.load("https://b.example");
    view.back();
    assert_eq!(view.url(), "https://a.example");
    view.forward();
    assert_eq!(view.url(), "https://b.example");
    view.forward();
    assert_eq!(view.url(), "https://b.example");
}

#[test]
fn reload_invalidates_thumbnail() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "https://a.example");
    view.surface_mut().set_bounds(Rect::new(0, 50, 800, 600));

    assert!(view.capture_thumbnail());
    assert_eq!(view.thumbnail().unwrap().width, 800);

    view.reload(true);
    assert!(view.thumbnail().is_none());
    let id = view.surface().id();
    assert_eq!(host.state().surface(id).unwrap().reloads, vec![true]);
}

#[test]
fn capture_failure_is_swallowed() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "https://a.example");
    let id = view.surface().id();
    host.state_mut().surface_mut(id).unwrap().fail_capture = true;

    assert!(!view.capture_thumbnail());
    assert!(view.thumbnail().is_none());
}

#[test]
fn zoom_snaps_and_clamps() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "https://a.example");

    view.set_zoom_level(1.3);
    assert_eq!(view.zoom_level(), 1.25);

    view.set_zoom_level(5.0);
    assert!(!view.zoom_in());
    assert_eq!(view.zoom_level(), 5.0);

    view.set_zoom_level(0.25);
    assert!(!view.zoom_out());
    assert!(view.zoom_in());
    assert_eq!(view.zoom_level(), 0.33);

    view.zoom_reset();
    assert_eq!(view.zoom_level(), 1.0);
}

#[test]
fn find_session_lifecycle() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "https://a.example");
    let id = view.surface().id();

    let state = view.find_in_page("needle", true).clone();
    assert_eq!(state, FindState::new("needle", true));

    view.apply_found_in_page(2, 5, true);
    assert_eq!(view.find_state().unwrap().matches, 5);
    assert_eq!(view.find_state().unwrap().text, "needle");

    assert!(view.move_find_in_page(false));
    {
        let state = host.state();
        let requests = &state.surface(id).unwrap().find_requests;
        assert_eq!(requests.len(), 2);
        assert!(requests[0].1.find_next);
        assert!(!requests[1].1.find_next);
        assert!(!requests[1].1.forward);
        assert!(requests[1].1.match_case);
    }

    view.stop_find_in_page(StopFindAction::ClearSelection);
    assert!(view.find_state().is_none());
    assert_eq!(
        host.state().surface(id).unwrap().find_stopped,
        vec![StopFindAction::ClearSelection]
    );
}

#[test]
fn empty_find_opens_idle_session() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "https://a.example");
    let id = view.surface().id();

    view.find_in_page("", false);
    assert_eq!(view.find_state(), Some(&FindState::default()));
    assert!(!view.move_find_in_page(true));
    assert!(host.state().surface(id).unwrap().find_requests.is_empty());
}

#[test]
fn navigation_start_clears_page_state() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "https://a.example");
    view.refresh_request_state(None);
    assert_eq!(view.request_state(), Some(RequestState::Secure));
    view.capture_thumbnail();

    view.begin_navigation();
    assert!(view.request_state().is_none());
    assert!(view.thumbnail().is_none());
}

#[test]
fn state_snapshot() {
    let host = HeadlessHost::new();
    let mut view = view(&host, "http://a.example");
    view.set_pinned_flag(true);
    view.set_muted(true);
    view.set_color(Some("#123456".into()));
    view.set_media(MediaStatus::Video);
    view.refresh_request_state(None);

    let state = view.state();
    assert_eq!(state.url, "http://a.example");
    assert!(state.is_pinned);
    assert!(state.is_muted);
    assert_eq!(state.color.as_deref(), Some("#123456"));
    assert_eq!(state.media, MediaStatus::Video);
    assert_eq!(state.request_state, Some(RequestState::Insecure));
    assert!(state.find_state.is_none());
}
