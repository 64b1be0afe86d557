//! Typed error variants for the tabdeck-config crate.
//!
//! `Config::load` and `Config::save` return `anyhow::Result` for the
//! application shell; these variants sit underneath so callers can
//! downcast and match on a specific failure mode.

use thiserror::Error;

/// Errors that can occur when loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the reason.
    #[error("Config validation error: {0}")]
    Validation(String),
}
