//! The `Config` struct and its defaults.

use crate::error::ConfigError;
use crate::types::{KeyBinding, LogLevel};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the workspace shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for every persisted storage key (`<namespace>_tabs_v2`, ...)
    #[serde(default = "crate::defaults::namespace")]
    pub namespace: String,

    /// Maximum number of simultaneously open tabs
    #[serde(default = "crate::defaults::max_tabs")]
    pub max_tabs: usize,

    /// Override for the tab state file.
    /// When unset the platform data directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,

    /// Log verbosity for the debug log file
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Keyboard shortcuts mapped to tab actions
    #[serde(default = "crate::defaults::keybindings")]
    pub keybindings: Vec<KeyBinding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: crate::defaults::namespace(),
            max_tabs: crate::defaults::max_tabs(),
            state_file: None,
            log_level: crate::defaults::log_level(),
            keybindings: crate::defaults::keybindings(),
        }
    }
}

impl Config {
    /// Tab capacity after clamping to `1..=MAX_TABS`.
    pub fn effective_max_tabs(&self) -> usize {
        self.max_tabs.clamp(1, crate::MAX_TABS)
    }

    /// Check field values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::Validation(
                "namespace must not be empty".to_string(),
            ));
        }
        if !self
            .namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "namespace '{}' may only contain ASCII letters, digits, '_' and '-'",
                self.namespace
            )));
        }
        if self.max_tabs == 0 {
            return Err(ConfigError::Validation(
                "max_tabs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_max_tabs(), crate::MAX_TABS);
        assert_eq!(config.namespace, "tabdeck");
    }

    #[test]
    fn max_tabs_is_clamped() {
        let config = Config {
            max_tabs: 500,
            ..Config::default()
        };
        assert_eq!(config.effective_max_tabs(), crate::MAX_TABS);

        let config = Config {
            max_tabs: 3,
            ..Config::default()
        };
        assert_eq!(config.effective_max_tabs(), 3);
    }

    #[test]
    fn rejects_bad_namespace() {
        let config = Config {
            namespace: "has space".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));

        let config = Config {
            namespace: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("max_tabs: 5\n").unwrap();
        assert_eq!(config.max_tabs, 5);
        assert_eq!(config.namespace, "tabdeck");
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.keybindings.is_empty());
    }
}
