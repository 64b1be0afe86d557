//! Config persistence and path resolution for `Config`.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`, `default_state_file_path`)

use super::config_struct::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load configuration from the default location, creating it with defaults if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, creating it with defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Config path: {:?}", path);

        if !path.exists() {
            log::info!("Config file not found, creating default at {:?}", path);
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .map_err(crate::ConfigError::from)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let mut config: Config = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(&contents)
                .map_err(crate::ConfigError::from)
                .with_context(|| format!("Failed to parse config from {:?}", path))?
        };

        config.validate()?;

        // Merge in any new default keybindings that don't exist in user's config
        config.merge_default_keybindings();

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let yaml = serde_yaml_ng::to_string(self).context("Failed to serialize config")?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)
            .with_context(|| format!("Failed to write config to {:?}", temp_path))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move config into place at {:?}", path))?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("tabdeck")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("tabdeck")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Default location of the tab state file.
    pub fn default_state_file_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabdeck")
            .join("tab_state.json")
    }

    /// Effective tab state file: the configured override, else the platform default.
    pub fn state_file_path(&self) -> PathBuf {
        match &self.state_file {
            Some(path) => Self::expand_home_dir(path),
            None => Self::default_state_file_path(),
        }
    }

    /// Expand ~ to home directory in a path string
    fn expand_home_dir(path: &str) -> PathBuf {
        if let Some(suffix) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(suffix);
        }
        PathBuf::from(path)
    }
}
