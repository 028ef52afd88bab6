//! `--headless`: drive the shell over the in-memory host and report what
//! it built. Handy for checking profiles and startup pages without a GUI.

use harbor_common::{ProfileId, ViewId, WindowId};
use harbor_profile::ProfileManager;
use harbor_shell::host::headless::HeadlessHost;
use harbor_shell::Shell;
use serde::Serialize;

use crate::startup::open_startup_window;

#[derive(Debug, Serialize)]
pub struct WindowSummary {
    pub id: WindowId,
    pub profile: String,
    pub incognito: bool,
    pub tabs: Vec<TabSummary>,
}

#[derive(Debug, Serialize)]
pub struct TabSummary {
    pub id: ViewId,
    pub url: String,
    pub title: String,
    pub pinned: bool,
    pub selected: bool,
}

/// Open the startup window, describe every window, then shut down.
pub fn run(
    profiles: ProfileManager,
    profile: &ProfileId,
    incognito: bool,
    urls: Vec<String>,
) -> harbor_common::Result<Vec<WindowSummary>> {
    let host = HeadlessHost::new();
    let mut shell = Shell::new(host.runtime(), profiles);
    open_startup_window(&mut shell, profile, incognito, urls)?;

    let summary = summarize(&shell);
    shell.shutdown();
    Ok(summary)
}

fn summarize(shell: &Shell) -> Vec<WindowSummary> {
    shell
        .windows()
        .windows()
        .iter()
        .map(|window| {
            let selected = window.views().selected_id();
            WindowSummary {
                id: window.id(),
                profile: window.profile().to_string(),
                incognito: window.is_incognito(),
                tabs: window
                    .views()
                    .views()
                    .iter()
                    .map(|view| TabSummary {
                        id: view.id(),
                        url: view.url(),
                        title: view.title(),
                        pinned: view.is_pinned(),
                        selected: selected == Some(view.id()),
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_config::DataPaths;

    #[test]
    fn reports_startup_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let mut profiles = ProfileManager::new(DataPaths::new(dir.path()));
        profiles.loads();
        let id = profiles.create().unwrap().id().clone();

        let windows = run(
            profiles,
            &id,
            false,
            vec!["https://a.example/".into(), "https://b.example/".into()],
        )
        .unwrap();

        assert_eq!(windows.len(), 1);
        let tabs = &windows[0].tabs;
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].url, "https://a.example/");
        assert!(tabs[0].selected);
        assert!(!tabs[1].selected);

        let json = serde_json::to_value(&windows).unwrap();
        assert_eq!(json[0]["profile"], id.to_string());
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = ProfileManager::new(DataPaths::new(dir.path()));
        assert!(run(profiles, &ProfileId::from("nope"), false, Vec::new()).is_err());
    }
}
