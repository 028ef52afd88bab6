use tracing::debug;

use super::core::Shell;
use crate::task::{Task, TaskOutcome};

impl Shell {
    /// Hand queued async work to the caller.
    pub fn take_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Apply the result of a finished task. Returns false when the outcome
    /// is stale and was dropped.
    pub fn apply_outcome(&mut self, outcome: TaskOutcome) -> bool {
        match outcome {
            TaskOutcome::Favicon {
                view,
                page_url,
                icon,
            } => {
                let Some(icon) = icon else {
                    debug!(view_id = %view, page_url, "favicon fetch failed");
                    return false;
                };
                self.favicons.insert(&page_url, icon.clone());

                let current = self
                    .windows
                    .view_mut(view)
                    .filter(|v| v.url() == page_url);
                let Some(v) = current else {
                    debug!(view_id = %view, page_url, "stale favicon dropped");
                    return false;
                };
                v.set_favicon(Some(icon));
                self.update_view(view);
                self.record_history(view);
                true
            }
        }
    }
}
