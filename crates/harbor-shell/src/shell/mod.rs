//! The application-lifecycle object.
//!
//! [`Shell`] owns every service (profiles, windows, dialogs, favicon cache,
//! event bus) and is the only place that routes host events, IPC requests,
//! menu actions and async task outcomes to them.

mod core;
mod dispatch;
mod event_handler;
mod find;
mod ipc_dispatch;
mod lifecycle;
mod shutdown;
mod tasks;

pub use core::Shell;
