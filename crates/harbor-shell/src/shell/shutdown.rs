use harbor_common::events::Event;
use tracing::info;

use super::core::Shell;

impl Shell {
    /// Close every window and announce shutdown.
    pub fn shutdown(&mut self) {
        let windows = self.windows.ids();
        info!(windows = windows.len(), "shutting down");
        for window in windows {
            self.close_window(window);
        }
        self.publish(Event::Shutdown);
    }
}
