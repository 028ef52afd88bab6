//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::HarborApp;

impl ApplicationHandler for HarborApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        if !self.open_startup_window() {
            self.should_exit = true;
            event_loop.exit();
            return;
        }
        self.start_task_runtime();
        self.host.realize(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            tracing::info!("Window close requested");
        }
        self.host.handle_window_event(window_id, &event);
        if matches!(
            event,
            WindowEvent::CloseRequested | WindowEvent::Resized(_) | WindowEvent::Focused(true)
        ) {
            self.pump(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
