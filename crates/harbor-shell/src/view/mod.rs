//! A browsing tab and the content surface it owns.
//!
//! A `View` mirrors navigation state from its surface and keeps the state
//! the engine does not: pin flag, media status, favicon, theme color,
//! request state, find session and a captured thumbnail. It never touches
//! its window; the shell pushes state after each mutation.

mod request;
mod state;
pub mod zoom;

pub use request::RequestState;
pub use state::{FindState, MediaStatus, ViewState};

use harbor_common::{DialogId, ProfileId, Rect, ViewId, WindowId};
use tracing::debug;

use crate::host::{ContentSurface, FindOptions, StopFindAction, Thumbnail};

pub struct View {
    id: ViewId,
    window: WindowId,
    profile: ProfileId,
    incognito: bool,
    surface: Box<dyn ContentSurface>,
    pinned: bool,
    media: MediaStatus,
    favicon: Option<String>,
    color: Option<String>,
    request_state: Option<RequestState>,
    find: Option<FindState>,
    find_dialog: Option<DialogId>,
    thumbnail: Option<Thumbnail>,
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id)
            .field("window", &self.window)
            .field("profile", &self.profile)
            .field("pinned", &self.pinned)
            .finish_non_exhaustive()
    }
}

impl View {
    /// Wrap a freshly created surface. The view id is the surface id.
    pub fn new(
        window: WindowId,
        profile: ProfileId,
        incognito: bool,
        surface: Box<dyn ContentSurface>,
    ) -> Self {
        Self {
            id: ViewId(surface.id().0),
            window,
            profile,
            incognito,
            surface,
            pinned: false,
            media: MediaStatus::None,
            favicon: None,
            color: None,
            request_state: None,
            find: None,
            find_dialog: None,
            thumbnail: None,
        }
    }

    // -- Identity --

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub(crate) fn set_window(&mut self, window: WindowId) {
        self.window = window;
    }

    pub fn profile(&self) -> &ProfileId {
        &self.profile
    }

    pub fn is_incognito(&self) -> bool {
        self.incognito
    }

    pub fn surface(&self) -> &dyn ContentSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn ContentSurface {
        self.surface.as_mut()
    }

    // -- Engine-backed state --

    pub fn url(&self) -> String {
        self.surface.url()
    }

    pub fn title(&self) -> String {
        self.surface.title()
    }

    pub fn is_loading(&self) -> bool {
        self.surface.is_loading()
    }

    pub fn can_go_back(&self) -> bool {
        self.surface.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.surface.can_go_forward()
    }

    pub fn is_muted(&self) -> bool {
        self.surface.is_audio_muted()
    }

    pub fn is_audible(&self) -> bool {
        self.surface.is_currently_audible()
    }

    pub fn is_destroyed(&self) -> bool {
        self.surface.is_destroyed()
    }

    // -- Shell-side state --

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Ordering is the view manager's job; this only flips the flag.
    pub(crate) fn set_pinned_flag(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    pub fn media(&self) -> MediaStatus {
        self.media
    }

    pub fn set_media(&mut self, media: MediaStatus) {
        self.media = media;
    }

    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    pub fn set_favicon(&mut self, favicon: Option<String>) {
        self.favicon = favicon;
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    pub fn request_state(&self) -> Option<RequestState> {
        self.request_state
    }

    /// Recompute the request state from `url`, or the current URL.
    pub fn refresh_request_state(&mut self, url: Option<&str>) {
        self.request_state = match url {
            Some(url) => RequestState::from_url(url),
            None => RequestState::from_url(&self.surface.url()),
        };
    }

    /// A new main-frame navigation started: forget per-page state.
    pub fn begin_navigation(&mut self) {
        self.request_state = None;
        self.thumbnail = None;
    }

    // -- Navigation --

    pub fn load(&mut self, url: &str) {
        debug!(view_id = %self.id, url, "load");
        self.surface.load_url(url);
    }

    pub fn back(&mut self) {
        if self.surface.can_go_back() {
            self.surface.go_back();
        }
    }

    pub fn forward(&mut self) {
        if self.surface.can_go_forward() {
            self.surface.go_forward();
        }
    }

    pub fn reload(&mut self, ignore_cache: bool) {
        self.thumbnail = None;
        self.surface.reload(ignore_cache);
    }

    pub fn stop(&mut self) {
        self.surface.stop();
    }

    // -- Zoom --

    pub fn zoom_level(&self) -> f64 {
        self.surface.zoom_factor()
    }

    /// Set the zoom to the level nearest `level`.
    pub fn set_zoom_level(&mut self, level: f64) {
        self.surface.set_zoom_factor(zoom::snap(level));
    }

    pub fn zoom_in(&mut self) -> bool {
        match zoom::step_in(self.zoom_level()) {
            Some(level) => {
                self.surface.set_zoom_factor(level);
                true
            }
            None => false,
        }
    }

    pub fn zoom_out(&mut self) -> bool {
        match zoom::step_out(self.zoom_level()) {
            Some(level) => {
                self.surface.set_zoom_factor(level);
                true
            }
            None => false,
        }
    }

    pub fn zoom_reset(&mut self) {
        self.surface.set_zoom_factor(zoom::DEFAULT_ZOOM);
    }

    // -- Audio --

    pub fn set_muted(&mut self, muted: bool) {
        self.surface.set_audio_muted(muted);
    }

    // -- Find in page --

    pub fn find_state(&self) -> Option<&FindState> {
        self.find.as_ref()
    }

    pub fn find_dialog(&self) -> Option<DialogId> {
        self.find_dialog
    }

    pub(crate) fn set_find_dialog(&mut self, dialog: Option<DialogId>) {
        self.find_dialog = dialog;
    }

    /// Start a new search. Empty text opens an idle session without asking
    /// the engine.
    pub fn find_in_page(&mut self, text: &str, match_case: bool) -> &FindState {
        if text.is_empty() {
            return self.find.insert(FindState::default());
        }

        self.surface.find_in_page(
            text,
            FindOptions {
                forward: true,
                find_next: true,
                match_case,
            },
        );
        self.find.insert(FindState::new(text, match_case))
    }

    /// Step to the next or previous match. Returns false when there is no
    /// active query.
    pub fn move_find_in_page(&mut self, forward: bool) -> bool {
        let Some(state) = self.find.as_ref().filter(|s| !s.text.is_empty()) else {
            return false;
        };
        let options = FindOptions {
            forward,
            find_next: false,
            match_case: state.match_case,
        };
        let text = state.text.clone();
        self.surface.find_in_page(&text, options);
        true
    }

    pub fn stop_find_in_page(&mut self, action: StopFindAction) {
        self.surface.stop_find_in_page(action);
        self.find = None;
    }

    /// Merge a result from the engine into the session.
    pub fn apply_found_in_page(&mut self, index: u32, matches: u32, final_update: bool) -> &FindState {
        let state = self.find.get_or_insert_with(FindState::default);
        state.index = index;
        state.matches = matches;
        state.final_update = final_update;
        state
    }

    // -- Capture --

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    /// Capture the visible area as the tab thumbnail. Failures keep the
    /// previous state.
    pub fn capture_thumbnail(&mut self) -> bool {
        let bounds = self.surface.bounds();
        let area = Rect::new(0, 0, bounds.width, bounds.height);
        match self.surface.capture_page(area) {
            Ok(thumbnail) => {
                self.thumbnail = Some(thumbnail);
                true
            }
            Err(e) => {
                debug!(view_id = %self.id, "thumbnail capture failed: {e}");
                false
            }
        }
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            id: self.id,
            title: self.title(),
            url: self.url(),
            favicon: self.favicon.clone(),
            color: self.color.clone(),
            request_state: self.request_state,
            is_loading: self.is_loading(),
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
            media: self.media,
            is_pinned: self.pinned,
            is_muted: self.is_muted(),
            zoom_level: self.zoom_level(),
            find_state: self.find.clone(),
        }
    }

    /// Release the surface. The view is unusable afterwards.
    pub(crate) fn destroy(&mut self) {
        if !self.surface.is_destroyed() {
            self.surface.destroy();
        }
    }
}

#[cfg(test)]
mod tests;
