//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Shuttles events between the wry host and the shell, runs
//! the shell's async tasks and exits once the last window is gone.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod tasks;
mod types;

pub use core::HarborApp;
pub use types::AppOptions;
