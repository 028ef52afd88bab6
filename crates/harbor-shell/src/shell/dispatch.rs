//! Action execution.
//!
//! Menus, the touch bar, keyboard shortcuts and the `action` IPC kind all
//! resolve to an [`Action`]. Actions that name a view run against that
//! view's own window; the rest run against the window they were raised in.

use std::path::PathBuf;

use harbor_common::{Action, HarborError, HostError, ViewId, WindowId};
use tracing::{debug, warn};

use super::core::Shell;
use crate::bounds::{history_dialog_bounds, information_dialog_bounds};
use crate::dialog::{Dialog, DialogKind, HISTORY_DIALOG, INFORMATION_DIALOG};
use crate::view::View;

const VIEW_SOURCE_PREFIX: &str = "view-source:";

impl Shell {
    /// Execute `action` raised in `window`.
    pub fn execute(&mut self, window: WindowId, action: Action) -> harbor_common::Result<()> {
        let window = match action.target_view() {
            Some(view) => self
                .windows
                .window_for_view(view)
                .ok_or_else(|| HarborError::Other(format!("no such view: {view}")))?,
            None => window,
        };
        if !self.windows.contains(window) {
            return Err(HostError::WindowNotFound(window.to_string()).into());
        }
        debug!(window_id = %window, ?action, "execute");

        match action {
            // -- Tabs --
            Action::NewTab { url, foreground } => {
                self.add_view(window, url.as_deref(), foreground)?;
            }
            Action::DuplicateTab(view) => {
                let url = self.windows.view(view).map(View::url);
                self.add_view(window, url.as_deref(), true)?;
            }
            Action::CloseTab(view) => {
                self.remove_view(view);
            }
            Action::CloseOtherTabs(view) => self.close_tabs(window, view, TabRange::Others),
            Action::CloseLeftTabs(view) => self.close_tabs(window, view, TabRange::Lefts),
            Action::CloseRightTabs(view) => self.close_tabs(window, view, TabRange::Rights),
            Action::SelectTab(view) => {
                self.select_view(view);
            }
            Action::SelectNextTab => self.select_adjacent(window, true),
            Action::SelectPreviousTab => self.select_adjacent(window, false),
            Action::TogglePin(view) => {
                if let Some(w) = self.windows.get_mut(window) {
                    let pinned = w.views().get(view).is_some_and(View::is_pinned);
                    w.views_mut().set_pinned(view, !pinned);
                }
                self.update_view(view);
            }
            Action::ToggleMute(view) => {
                if let Some(v) = self.windows.view_mut(view) {
                    let muted = v.is_muted();
                    v.set_muted(!muted);
                }
                self.update_view(view);
            }

            // -- Window --
            Action::NewWindow { url } => {
                let profile = self.window_profile(window)?;
                self.open_window(&profile, url.into_iter().collect())?;
            }
            Action::NewIncognitoWindow { url } => {
                let profile = self.window_profile(window)?;
                self.open_incognito_window(&profile, url.into_iter().collect())?;
            }
            Action::CloseWindow => {
                self.close_window(window);
            }
            Action::ToggleFullscreen => {
                if let Some(w) = self.windows.get_mut(window) {
                    let fullscreen = !w.is_fullscreen();
                    if !fullscreen {
                        w.set_html_fullscreen(false);
                    }
                    w.host_mut().set_fullscreen(fullscreen);
                }
                self.window_bounds_changed(window);
            }
            Action::ExitFullscreen => self.set_html_fullscreen(window, false),

            // -- Navigation --
            Action::Back(view) => self.with_view(view, View::back),
            Action::Forward(view) => self.with_view(view, View::forward),
            Action::Reload(view) => self.with_view(view, |v| v.reload(false)),
            Action::ReloadIgnoringCache(view) => self.with_view(view, |v| v.reload(true)),
            Action::Stop(view) => self.with_view(view, View::stop),
            Action::Home(view) => {
                let home = self
                    .windows
                    .view(view)
                    .and_then(|v| self.profiles.get(v.profile()))
                    .map(|p| p.settings().home_url());
                if let Some(url) = home {
                    self.with_view(view, |v| v.load(&url));
                }
            }
            Action::Load { view, url } => self.with_view(view, |v| v.load(&url)),
            Action::ViewSource(view) => {
                let Some(url) = self.windows.view(view).map(View::url) else {
                    return Ok(());
                };
                if !url.starts_with(VIEW_SOURCE_PREFIX) {
                    self.add_view(window, Some(&format!("{VIEW_SOURCE_PREFIX}{url}")), true)?;
                }
            }

            // -- Page --
            Action::SavePage(view) => self.save_page(view),
            Action::Print(view) => self.with_surface(view, |s| s.print()),
            Action::OpenDevTools(view) => self.with_surface(view, |s| s.open_devtools()),
            Action::TogglePictureInPicture(view) => {
                self.with_surface(view, |s| s.toggle_picture_in_picture())
            }
            Action::ZoomIn(view) => self.with_view(view, |v| {
                v.zoom_in();
            }),
            Action::ZoomOut(view) => self.with_view(view, |v| {
                v.zoom_out();
            }),
            Action::ZoomReset(view) => self.with_view(view, View::zoom_reset),
            Action::FindInPage(view) => {
                self.open_find_dialog(view)?;
            }
            Action::DownloadUrl { view, url } => self.with_surface(view, |s| s.download_url(&url)),

            // -- Edit --
            Action::Edit { view, command } => self.with_surface(view, |s| s.edit(command)),
            Action::CopyText(text) => self.runtime.write_clipboard_text(&text)?,
            Action::ShowEmojiPanel => {
                if self.runtime.is_emoji_panel_supported() {
                    self.runtime.show_emoji_panel();
                }
            }

            // -- Dialogs --
            Action::ShowHistory { x, y } => {
                self.show_named_dialog(window, DialogKind::History, history_dialog_bounds(x, y))?;
            }
            Action::ShowInformation { x, y } => {
                self.show_named_dialog(
                    window,
                    DialogKind::Information,
                    information_dialog_bounds(x, y),
                )?;
            }

            Action::None => {}
        }
        Ok(())
    }

    fn window_profile(&self, window: WindowId) -> harbor_common::Result<harbor_common::ProfileId> {
        self.windows
            .get(window)
            .map(|w| w.profile().clone())
            .ok_or_else(|| HostError::WindowNotFound(window.to_string()).into())
    }

    /// Run `f` on a view, then push its state.
    fn with_view(&mut self, view: ViewId, f: impl FnOnce(&mut View)) {
        if let Some(v) = self.windows.view_mut(view) {
            f(v);
        }
        self.update_view(view);
    }

    fn with_surface(&mut self, view: ViewId, f: impl FnOnce(&mut dyn crate::host::ContentSurface)) {
        if let Some(v) = self.windows.view_mut(view) {
            f(v.surface_mut());
        }
    }

    fn select_adjacent(&mut self, window: WindowId, next: bool) {
        let selected = self.windows.get_mut(window).and_then(|w| {
            if next {
                w.views_mut().select_next()
            } else {
                w.views_mut().select_previous()
            }
        });
        if selected.is_some() {
            self.refresh_selection(window);
        }
    }

    fn close_tabs(&mut self, window: WindowId, view: ViewId, range: TabRange) {
        let Some(w) = self.windows.get_mut(window) else {
            return;
        };
        let removed = match range {
            TabRange::Others => w.views_mut().remove_others(view),
            TabRange::Lefts => w.views_mut().remove_lefts(view),
            TabRange::Rights => w.views_mut().remove_rights(view),
        };
        if removed.is_empty() {
            return;
        }
        self.release_views(window, removed);
        self.refresh_selection(window);
    }

    /// Ask where to save the page, then save it. Cancelling is silent and
    /// failures are only logged.
    fn save_page(&mut self, view: ViewId) {
        let Some(title) = self.windows.view(view).map(View::title) else {
            return;
        };
        let default_path = PathBuf::from(format!("{}.html", file_stem(&title)));
        let Some(path) = self.runtime.show_save_dialog(&default_path) else {
            debug!(view_id = %view, "save cancelled");
            return;
        };
        if let Some(v) = self.windows.view_mut(view) {
            if let Err(e) = v.surface_mut().save_page(&path) {
                warn!(view_id = %view, path = %path.display(), "failed to save page: {e}");
            }
        }
    }

    fn show_named_dialog(
        &mut self,
        window: WindowId,
        kind: DialogKind,
        bounds: harbor_common::Rect,
    ) -> harbor_common::Result<()> {
        let name = match kind {
            DialogKind::History => HISTORY_DIALOG,
            DialogKind::Information => INFORMATION_DIALOG,
            DialogKind::Find { .. } => return Ok(()),
        };
        let (profile, incognito) = {
            let w = self
                .windows
                .get(window)
                .ok_or_else(|| HostError::WindowNotFound(window.to_string()))?;
            (w.profile().clone(), w.is_incognito())
        };
        let runtime = &mut self.runtime;
        let id = self
            .dialogs
            .show_dynamic(name, window, bounds, &mut self.windows, || {
                let surface = runtime.create_surface(window, &kind.surface_spec(profile, incognito))?;
                Ok(Dialog::new(kind, window, bounds, surface))
            })?;
        if let Some(dialog) = self.dialogs.get_mut(id) {
            dialog.surface_mut().focus();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum TabRange {
    Others,
    Lefts,
    Rights,
}

/// Page title made safe for a file name.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        "page".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::file_stem;

    #[test]
    fn file_stem_replaces_separators() {
        assert_eq!(file_stem("a/b: c?"), "a_b_ c_");
        assert_eq!(file_stem("   "), "page");
        assert_eq!(file_stem("Example Domain"), "Example Domain");
    }
}
