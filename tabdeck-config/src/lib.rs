//! Configuration system for tabdeck.
//!
//! This crate provides configuration loading, saving, and default values
//! for the workspace shell. It includes:
//!
//! - The top-level [`Config`] struct (YAML on disk)
//! - Tab capacity and storage namespace settings
//! - Keyboard shortcut bindings and their defaults
//! - Log level selection

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{KeyBinding, LogLevel};

/// Hard upper bound on the number of simultaneously open tabs.
///
/// A configured `max_tabs` is clamped to `1..=MAX_TABS`.
pub const MAX_TABS: usize = 20;
