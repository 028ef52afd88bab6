//! Internal types and constants for the app state module.

use std::path::PathBuf;
use std::time::Duration;

use harbor_common::ProfileId;

/// How often to poll the host and task channels (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Relative path from the working directory to the bundled pages.
pub(super) const PAGES_DIR: &str = "assets/pages";

/// What the first window should show.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub profile: ProfileId,
    pub incognito: bool,
    pub urls: Vec<String>,
    /// Overrides [`PAGES_DIR`].
    pub assets_dir: Option<PathBuf>,
}
