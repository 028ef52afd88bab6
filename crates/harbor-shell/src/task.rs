//! Work the shell hands off to the async runtime.
//!
//! The shell stays single-threaded: it queues [`Task`]s, the application
//! runs them on tokio, and the results come back as [`TaskOutcome`]s on the
//! event loop. Outcomes are checked for staleness before they are applied.

use harbor_common::ViewId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Download `icon_url` and encode it as a data URL.
    FetchFavicon {
        view: ViewId,
        page_url: String,
        icon_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Favicon {
        view: ViewId,
        page_url: String,
        /// `None` when the fetch failed.
        icon: Option<String>,
    },
}
