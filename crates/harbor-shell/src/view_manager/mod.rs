//! Ordered tab collection of one window.
//!
//! Pinned views always form a prefix of the ordering, and the selection is
//! either `None` (no views) or the id of a view in the collection.

mod operations;

use harbor_common::ViewId;

use crate::view::View;

#[derive(Debug, Default)]
pub struct ViewManager {
    views: Vec<View>,
    selected: Option<ViewId>,
}

impl ViewManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.iter().find(|v| v.id() == id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.iter_mut().find(|v| v.id() == id)
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn ids(&self) -> Vec<ViewId> {
        self.views.iter().map(View::id).collect()
    }

    pub fn index_of(&self, id: ViewId) -> Option<usize> {
        self.views.iter().position(|v| v.id() == id)
    }

    pub fn pinned_count(&self) -> usize {
        self.views.iter().take_while(|v| v.is_pinned()).count()
    }

    /// Views before `id`; empty when `id` is unknown.
    pub fn left_views(&self, id: ViewId) -> &[View] {
        match self.index_of(id) {
            Some(index) => &self.views[..index],
            None => &[],
        }
    }

    /// Views after `id`; empty when `id` is unknown.
    pub fn right_views(&self, id: ViewId) -> &[View] {
        match self.index_of(id) {
            Some(index) => &self.views[index + 1..],
            None => &[],
        }
    }

    pub fn other_views(&self, id: ViewId) -> Vec<&View> {
        self.views.iter().filter(|v| v.id() != id).collect()
    }

    pub fn selected_id(&self) -> Option<ViewId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&View> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut View> {
        let id = self.selected?;
        self.get_mut(id)
    }
}
