//! TOML settings loading.

mod loader;

#[cfg(test)]
mod tests;

pub use loader::{load_from_path, load_or_default};
