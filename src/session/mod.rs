//! Tab snapshot persistence
//!
//! Saves the live tab collection on every change and restores it on the next
//! launch. Persistence is lossy and best-effort:
//!
//! - running and ephemeral tabs are not saved
//! - tabs that fail validation on restore are dropped individually
//! - a corrupted snapshot is cleared and restores as empty
//!
//! Nothing in this module returns an error to its caller; failures are logged.

pub mod capture;
pub mod restore;
pub mod storage;

use crate::tab::{Tab, TabId, TabStatus, TabType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::{KeyValueStore, StorageError};

/// One tab as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedTab {
    pub id: String,
    #[serde(rename = "type")]
    pub tab_type: TabType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_project_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
    #[serde(default)]
    pub status: TabStatus,
    #[serde(default)]
    pub has_unsaved_changes: bool,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Result of a restore: the surviving tabs and the tab to activate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoredTabs {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<TabId>,
}

/// Storage keys, all prefixed with the configured namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub tabs: String,
    pub active_tab: String,
    pub enabled: String,
    pub legacy_tabs: String,
}

impl StorageKeys {
    pub fn new(namespace: &str) -> Self {
        Self {
            tabs: format!("{namespace}_tabs_v2"),
            active_tab: format!("{namespace}_active_tab_v2"),
            enabled: format!("{namespace}_tab_persistence_enabled"),
            legacy_tabs: format!("{namespace}_tabs"),
        }
    }
}

/// Versioned, validated save/restore of the tab collection.
///
/// Owns its storage keys exclusively; nothing else reads or writes them.
pub struct TabPersistence {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl TabPersistence {
    pub fn new(store: impl KeyValueStore + 'static, namespace: &str) -> Self {
        Self {
            store: Box::new(store),
            keys: StorageKeys::new(namespace),
        }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Whether the user allows tab persistence. Defaults to enabled.
    pub fn is_enabled(&self) -> bool {
        match self.store.get(&self.keys.enabled) {
            Ok(Some(value)) => value != "false",
            Ok(None) => true,
            Err(e) => {
                log::warn!("Failed to read tab persistence preference: {}", e);
                true
            }
        }
    }

    /// Store the preference. Disabling clears any saved snapshot immediately.
    pub fn set_enabled(&self, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = self.store.set(&self.keys.enabled, value) {
            log::error!("Failed to store tab persistence preference: {}", e);
        }
        if !enabled {
            self.clear();
        }
        log::info!(
            "Tab persistence {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Save a snapshot of `tabs`. Failures are logged, never returned.
    pub fn save(&self, tabs: &[Tab], active_tab_id: Option<&TabId>) {
        if !self.is_enabled() {
            return;
        }
        if let Err(e) = self.try_save(tabs, active_tab_id) {
            log::error!("Failed to save tab snapshot: {}", e);
        }
    }

    fn try_save(&self, tabs: &[Tab], active_tab_id: Option<&TabId>) -> Result<(), StorageError> {
        let serialized = capture::capture_tabs(tabs);
        let json = serde_json::to_string(&serialized)?;
        self.store.set(&self.keys.tabs, &json)?;

        let active_saved = active_tab_id
            .filter(|id| serialized.iter().any(|t| t.id == id.as_str()));
        match active_saved {
            Some(id) => self.store.set(&self.keys.active_tab, id.as_str())?,
            None => self.store.remove(&self.keys.active_tab)?,
        }

        log::debug!(
            "Saved {} of {} tab(s) to {}",
            serialized.len(),
            tabs.len(),
            self.keys.tabs
        );
        Ok(())
    }

    /// Restore the last snapshot. Never fails: problems yield fewer tabs or none.
    pub fn load(&self) -> RestoredTabs {
        if !self.is_enabled() {
            return RestoredTabs::default();
        }

        self.migrate_legacy();

        match self.try_load() {
            Ok(restored) => restored,
            Err(e) => {
                log::warn!("Tab snapshot is corrupted ({}), clearing it", e);
                self.clear();
                RestoredTabs::default()
            }
        }
    }

    fn try_load(&self) -> Result<RestoredTabs, StorageError> {
        let Some(raw) = self.store.get(&self.keys.tabs)? else {
            return Ok(RestoredTabs::default());
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let stored_active = self.store.get(&self.keys.active_tab)?;
        let restored = restore::restore_tabs(entries, stored_active.as_deref());

        log::info!(
            "Restored {} tab(s) from {}",
            restored.tabs.len(),
            self.keys.tabs
        );
        Ok(restored)
    }

    /// Carry a snapshot stored under the legacy key forward to the current key.
    fn migrate_legacy(&self) {
        let legacy = match self.store.get(&self.keys.legacy_tabs) {
            Ok(Some(legacy)) => legacy,
            Ok(None) => return,
            Err(e) => {
                log::warn!("Failed to read legacy tab snapshot: {}", e);
                return;
            }
        };

        match self.store.get(&self.keys.tabs) {
            Ok(None) => {
                if let Err(e) = self.store.set(&self.keys.tabs, &legacy) {
                    log::error!("Failed to migrate legacy tab snapshot: {}", e);
                    return;
                }
                log::info!(
                    "Migrated legacy tab snapshot {} -> {}",
                    self.keys.legacy_tabs,
                    self.keys.tabs
                );
            }
            Ok(Some(_)) => {}
            Err(e) => {
                log::warn!("Failed to read tab snapshot during migration: {}", e);
                return;
            }
        }

        if let Err(e) = self.store.remove(&self.keys.legacy_tabs) {
            log::warn!("Failed to remove legacy tab snapshot: {}", e);
        }
    }

    /// Remove the saved snapshot and active tab.
    pub fn clear(&self) {
        for key in [&self.keys.tabs, &self.keys.active_tab] {
            if let Err(e) = self.store.remove(key) {
                log::error!("Failed to clear {}: {}", key, e);
            }
        }
    }
}

impl std::fmt::Debug for TabPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabPersistence")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
