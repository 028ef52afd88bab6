//! HarborApp struct definition and constructor.

use std::sync::mpsc;
use std::time::Instant;

use harbor_common::events::Event;
use harbor_profile::ProfileManager;
use harbor_shell::{Shell, TaskOutcome};
use harbor_webview::WryHost;
use tokio::sync::broadcast;

use super::types::AppOptions;

/// Top-level application state.
pub struct HarborApp {
    pub(super) options: AppOptions,

    // Windows and WebViews, and the shell that drives them
    pub(super) host: WryHost,
    pub(super) shell: Shell,
    pub(super) shell_events: broadcast::Receiver<Event>,

    // Async tasks (favicon downloads)
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) http: Option<reqwest::Client>,
    pub(super) outcome_tx: mpsc::Sender<TaskOutcome>,
    pub(super) outcome_rx: mpsc::Receiver<TaskOutcome>,

    pub(super) started: bool,
    pub(super) should_exit: bool,
    pub(super) shut_down: bool,
    pub(super) last_poll: Instant,
}

impl HarborApp {
    pub fn new(options: AppOptions, profiles: ProfileManager) -> Self {
        let host = Self::create_host(&options);
        let shell = Shell::new(host.runtime(), profiles);
        let shell_events = shell.events().subscribe();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        Self {
            options,
            host,
            shell,
            shell_events,
            tokio_runtime: None,
            http: None,
            outcome_tx,
            outcome_rx,
            started: false,
            should_exit: false,
            shut_down: false,
            last_poll: Instant::now(),
        }
    }
}
