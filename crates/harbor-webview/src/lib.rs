//! wry/winit implementation of the shell's host traits.
//!
//! Wraps the `wry` crate to provide:
//! - One OS window per shell window, with a chrome page filling it
//! - One child WebView per tab or dialog surface
//! - Bidirectional IPC (page <-> shell) and page instrumentation
//! - The `harbor://` custom protocol for bundled pages
//!
//! The shell asks for windows whenever it likes, but winit can only create
//! them inside the event loop. Windows and surfaces are therefore recorded
//! first and built on the next [`WryHost::realize`] call.

pub mod clipboard;
pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod scripts;

pub use content::ContentProvider;
pub use events::HostEvent;
pub use manager::{RealizeError, WebViewConfig, WryHost};
