//! Browser shell for Harbor.
//!
//! Owns windows, tabs (views), overlay dialogs and profiles, and reacts to
//! events from an embedding host. The host itself sits behind the traits
//! in [`host`]; `harbor-webview` implements them with wry, and
//! [`host::headless`] implements them in memory.
//!
//! - [`bounds`]: pure geometry for view and dialog placement
//! - [`view`] / [`view_manager`]: one tab and the ordered tabs of a window
//! - [`window`]: a host window with its tabs
//! - [`dialog`]: history, information and find-bar overlays
//! - [`menu`]: context, tab and application menus
//! - [`ipc`]: the page-to-shell request protocol
//! - [`shell`]: the [`Shell`] that ties them together

pub mod bounds;
pub mod dialog;
pub mod favicon;
pub mod host;
pub mod ipc;
pub mod menu;
pub mod shell;
pub mod task;
pub mod view;
pub mod view_manager;
pub mod window;

pub use host::{ContentSurface, HostRuntime, HostWindow, SurfaceEvent, SurfaceId, WindowEvent};
pub use ipc::{IpcMessage, IpcSender};
pub use shell::Shell;
pub use task::{Task, TaskOutcome};

/// Product name shown in window titles.
pub const APPLICATION_NAME: &str = "Harbor";
