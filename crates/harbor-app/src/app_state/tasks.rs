//! Running the shell's async tasks on the tokio runtime.

use harbor_shell::{Task, TaskOutcome};

use super::core::HarborApp;
use crate::favicon::fetch_favicon;

impl HarborApp {
    /// Spawn every task the shell queued. Results come back through
    /// `outcome_rx` and are applied on the next poll.
    pub(super) fn run_tasks(&mut self) {
        if !self.shell.has_pending_tasks() {
            return;
        }
        let tasks = self.shell.take_tasks();

        let (Some(rt), Some(client)) = (&self.tokio_runtime, &self.http) else {
            tracing::debug!(count = tasks.len(), "no task runtime, dropping tasks");
            return;
        };

        for task in tasks {
            match task {
                Task::FetchFavicon {
                    view,
                    page_url,
                    icon_url,
                } => {
                    let client = client.clone();
                    let tx = self.outcome_tx.clone();
                    rt.spawn(async move {
                        let icon = fetch_favicon(&client, &icon_url).await;
                        let _ = tx.send(TaskOutcome::Favicon {
                            view,
                            page_url,
                            icon,
                        });
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app_state::{AppOptions, HarborApp};
    use harbor_common::ViewId;
    use harbor_config::DataPaths;
    use harbor_profile::ProfileManager;
    use harbor_shell::TaskOutcome;

    fn app(dir: &tempfile::TempDir) -> HarborApp {
        let mut profiles = ProfileManager::new(DataPaths::new(dir.path()));
        profiles.loads();
        let profile = profiles.create().unwrap().id().clone();
        let options = AppOptions {
            profile,
            incognito: false,
            urls: Vec::new(),
            assets_dir: Some(dir.path().to_path_buf()),
        };
        HarborApp::new(options, profiles)
    }

    #[test]
    fn tasks_without_runtime_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.run_tasks();
        assert!(!app.shell.has_pending_tasks());
    }

    #[test]
    fn outcomes_for_unknown_views_are_consumed() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.outcome_tx
            .send(TaskOutcome::Favicon {
                view: ViewId(99),
                page_url: "https://a.example/".into(),
                icon: Some("data:image/png;base64,AAAA".into()),
            })
            .unwrap();

        app.poll_task_outcomes();
        assert!(app.outcome_rx.try_recv().is_err());
        assert_eq!(
            app.shell.favicons().get("https://a.example/"),
            Some("data:image/png;base64,AAAA")
        );
    }
}
