//! Graceful shutdown: close windows, stop the task runtime.

use std::time::Duration;

use super::core::HarborApp;

impl HarborApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Windows go first so their WebViews are released while the event
    /// loop is still alive; pending favicon downloads are cancelled last.
    pub(super) fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        tracing::info!("Initiating graceful shutdown");

        self.shell.shutdown();
        // Whatever the host reported while closing no longer has a target.
        let _ = self.host.drain_events();

        self.http = None;
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        tracing::info!("Graceful shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use crate::app_state::{AppOptions, HarborApp};
    use harbor_config::DataPaths;
    use harbor_profile::ProfileManager;

    fn app(dir: &tempfile::TempDir) -> HarborApp {
        let mut profiles = ProfileManager::new(DataPaths::new(dir.path()));
        profiles.loads();
        let profile = profiles.create().unwrap().id().clone();
        let options = AppOptions {
            profile,
            incognito: false,
            urls: vec!["https://a.example/".into()],
            assets_dir: None,
        };
        HarborApp::new(options, profiles)
    }

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.shutdown();
        assert!(app.shut_down);
        assert!(app.tokio_runtime.is_none());
    }

    #[test]
    fn shutdown_closes_windows_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.start_task_runtime();
        assert!(app.open_startup_window());
        assert_eq!(app.host.window_count(), 1);

        app.shutdown();
        assert!(app.shell.windows().is_empty());
        assert_eq!(app.host.window_count(), 0);
        assert!(app.tokio_runtime.is_none());

        app.shutdown();
    }
}
