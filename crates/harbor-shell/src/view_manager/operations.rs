//! Mutating operations: add, remove, move, pin, select.

use harbor_common::ViewId;

use super::ViewManager;
use crate::view::View;

impl ViewManager {
    /// Append `view`. New views are unpinned, so they land after every
    /// pinned view. Selected when `foreground` or when nothing is selected.
    pub fn add(&mut self, mut view: View, foreground: bool) -> ViewId {
        let id = view.id();
        view.set_pinned_flag(false);
        self.views.push(view);
        if foreground || self.selected.is_none() {
            self.selected = Some(id);
        }
        id
    }

    /// Remove one view. If it was selected, the view now at its index is
    /// selected, falling back to the last view.
    pub fn remove(&mut self, id: ViewId) -> Option<View> {
        let index = self.index_of(id)?;
        let view = self.views.remove(index);
        if self.selected == Some(id) {
            self.selected = self
                .views
                .get(index)
                .or_else(|| self.views.last())
                .map(View::id);
        }
        Some(view)
    }

    /// Remove every view except `id`.
    pub fn remove_others(&mut self, id: ViewId) -> Vec<View> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.remove_where(id, |_, view| view.id() != id)
    }

    /// Remove every view left of `id`.
    pub fn remove_lefts(&mut self, id: ViewId) -> Vec<View> {
        let Some(anchor) = self.index_of(id) else {
            return Vec::new();
        };
        self.remove_where(id, |index, _| index < anchor)
    }

    /// Remove every view right of `id`.
    pub fn remove_rights(&mut self, id: ViewId) -> Vec<View> {
        let Some(anchor) = self.index_of(id) else {
            return Vec::new();
        };
        self.remove_where(id, |index, _| index > anchor)
    }

    /// Bulk removal relative to `anchor`, which is selected if the current
    /// selection was removed.
    fn remove_where(&mut self, anchor: ViewId, doomed: impl Fn(usize, &View) -> bool) -> Vec<View> {
        let mut kept = Vec::with_capacity(self.views.len());
        let mut removed = Vec::new();
        for (index, view) in std::mem::take(&mut self.views).into_iter().enumerate() {
            if doomed(index, &view) {
                removed.push(view);
            } else {
                kept.push(view);
            }
        }
        self.views = kept;

        if let Some(selected) = self.selected {
            if !self.contains(selected) {
                self.selected = Some(anchor);
            }
        }
        removed
    }

    /// Move `id` to `index`, clamped to its pinned or unpinned block.
    /// Selection is unchanged.
    pub fn move_to(&mut self, id: ViewId, index: usize) -> bool {
        let Some(view) = self.get(id) else {
            return false;
        };
        let pinned = self.pinned_count();
        let (low, high) = if view.is_pinned() {
            (0, pinned.saturating_sub(1))
        } else {
            (pinned, self.views.len().saturating_sub(1))
        };
        self.relocate(id, index.clamp(low, high))
    }

    fn relocate(&mut self, id: ViewId, index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let view = self.views.remove(from);
        let index = index.min(self.views.len());
        self.views.insert(index, view);
        true
    }

    /// Pin or unpin `id`, moving it to the boundary of the pinned block.
    ///
    /// Returns false, without reordering, when the flag already has that
    /// value, so repeated requests cannot shift the view twice.
    pub fn set_pinned(&mut self, id: ViewId, pinned: bool) -> bool {
        match self.get(id) {
            Some(view) if view.is_pinned() != pinned => {}
            _ => return false,
        }
        let other_pinned = self
            .views
            .iter()
            .filter(|v| v.is_pinned() && v.id() != id)
            .count();
        self.relocate(id, other_pinned);
        if let Some(view) = self.get_mut(id) {
            view.set_pinned_flag(pinned);
        }
        true
    }

    pub fn select(&mut self, id: ViewId) -> bool {
        if self.contains(id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Select the next view, wrapping around.
    pub fn select_next(&mut self) -> Option<ViewId> {
        self.select_offset(1)
    }

    /// Select the previous view, wrapping around.
    pub fn select_previous(&mut self) -> Option<ViewId> {
        self.select_offset(self.views.len().saturating_sub(1))
    }

    fn select_offset(&mut self, offset: usize) -> Option<ViewId> {
        let len = self.views.len();
        if len == 0 {
            return None;
        }
        let current = self
            .selected
            .and_then(|id| self.index_of(id))
            .unwrap_or(0);
        let id = self.views[(current + offset) % len].id();
        self.selected = Some(id);
        Some(id)
    }

    /// Remove every view, clearing the selection.
    pub fn drain(&mut self) -> Vec<View> {
        self.selected = None;
        std::mem::take(&mut self.views)
    }
}
