//! Host setup, the startup window and the task runtime.

use std::path::PathBuf;

use harbor_webview::{ContentProvider, WebViewConfig, WryHost};

use super::core::HarborApp;
use super::types::{AppOptions, PAGES_DIR};
use crate::startup::open_startup_window;

impl HarborApp {
    /// Build the wry host serving `harbor://` from the pages directory.
    pub(super) fn create_host(options: &AppOptions) -> WryHost {
        let pages_path = options.assets_dir.clone().unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(PAGES_DIR)
        });
        if !pages_path.is_dir() {
            tracing::warn!(
                path = %pages_path.display(),
                "pages directory not found, internal pages will not load"
            );
        }

        let host = WryHost::new(WebViewConfig::default());
        host.set_content_provider(ContentProvider::new(&pages_path));
        tracing::info!(pages_dir = %pages_path.display(), "wry host initialized");
        host
    }

    /// Open the first window. Returns `false` if that failed and the event
    /// loop should exit.
    pub(super) fn open_startup_window(&mut self) -> bool {
        let urls = std::mem::take(&mut self.options.urls);
        match open_startup_window(
            &mut self.shell,
            &self.options.profile,
            self.options.incognito,
            urls,
        ) {
            Ok(window) => {
                tracing::info!(window_id = %window, "startup window opened");
                true
            }
            Err(e) => {
                tracing::error!("Failed to open startup window: {e}");
                false
            }
        }
    }

    /// Start the background runtime that runs the shell's tasks.
    pub(super) fn start_task_runtime(&mut self) {
        if self.tokio_runtime.is_some() {
            return;
        }
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build();
        match rt {
            Ok(rt) => {
                self.tokio_runtime = Some(rt);
                self.http = crate::favicon::client();
                if self.http.is_none() {
                    tracing::warn!("HTTP client unavailable, favicons will not load");
                }
                tracing::info!("Task runtime started");
            }
            Err(e) => {
                tracing::warn!("Failed to start tokio runtime for tasks: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppOptions;
    use harbor_config::DataPaths;
    use harbor_profile::ProfileManager;

    fn app(dir: &tempfile::TempDir, urls: Vec<String>) -> HarborApp {
        let mut profiles = ProfileManager::new(DataPaths::new(dir.path().join("data")));
        profiles.loads();
        let profile = profiles.create().unwrap().id().clone();
        let options = AppOptions {
            profile,
            incognito: false,
            urls,
            assets_dir: Some(dir.path().join("pages")),
        };
        HarborApp::new(options, profiles)
    }

    #[test]
    fn startup_window_waits_for_realize() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, vec!["https://a.example/".into()]);

        assert!(app.open_startup_window());
        assert_eq!(app.shell.windows().len(), 1);
        assert_eq!(app.host.window_count(), 1);
        assert!(app.host.needs_realize());
        assert!(app.options.urls.is_empty());
    }

    #[test]
    fn startup_window_fails_for_unknown_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, Vec::new());
        app.options.profile = harbor_common::ProfileId::from("missing");

        assert!(!app.open_startup_window());
        assert_eq!(app.host.window_count(), 0);
    }
}
