//! User profiles for Harbor.
//!
//! A profile is a browsing identity owning a settings tree and a history
//! log. Normal profiles persist under the data directory; incognito
//! profiles inherit a normal profile's settings and keep everything in
//! memory.

pub mod history;
pub mod manager;
pub mod profile;

pub use history::{History, HistoryEntry};
pub use manager::ProfileManager;
pub use profile::{Profile, ProfileKind, ProfileSettings};
