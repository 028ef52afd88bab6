//! Moving events between the host, the shell and the task runtime.

use std::time::Instant;

use harbor_webview::HostEvent;
use tokio::sync::broadcast::error::TryRecvError;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::HarborApp;
use super::types::POLL_INTERVAL;

impl HarborApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.pump(event_loop);
        }
        if self.should_exit {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// One round trip: host events and task results into the shell, new
    /// tasks out to the runtime, new windows and WebViews into the host.
    pub(super) fn pump(&mut self, event_loop: &ActiveEventLoop) {
        self.last_poll = Instant::now();
        self.poll_host_events();
        self.poll_task_outcomes();
        self.run_tasks();
        self.poll_shell_events();

        if self.host.needs_realize() {
            self.host.realize(event_loop);
        }

        if self.started && self.shell.windows().is_empty() {
            tracing::info!("Last window closed");
            self.should_exit = true;
            event_loop.exit();
        }
    }

    fn poll_host_events(&mut self) {
        for event in self.host.drain_events() {
            match event {
                HostEvent::Surface { surface, event } => {
                    self.shell.handle_surface_event(surface, event);
                }
                HostEvent::Window { window, event } => {
                    self.shell.handle_window_event(window, event);
                }
                HostEvent::Ipc { sender, body } => {
                    self.shell.handle_ipc(sender, &body);
                }
            }
        }
    }

    pub(super) fn poll_task_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.shell.apply_outcome(outcome);
        }
    }

    fn poll_shell_events(&mut self) {
        loop {
            match self.shell_events.try_recv() {
                Ok(event) => tracing::debug!(?event, "shell event"),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "shell event log lagged");
                }
                Err(_) => break,
            }
        }
    }
}
