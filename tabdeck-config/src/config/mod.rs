//! Shell configuration management.
//!
//! # Sub-modules
//!
//! - [`config_struct`] - Core `Config` struct, its `Default` impl and validation
//! - [`keybindings_methods`] - `impl Config` methods for keybinding management
//! - [`persistence`] - `impl Config` methods for load/save and path resolution

pub mod config_struct;
pub mod keybindings_methods;
pub mod persistence;

pub use config_struct::Config;
