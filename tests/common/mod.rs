//! Shared integration test helpers for tabdeck.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{memory_store, TestStateFile};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use std::path::PathBuf;
use tabdeck::session::TabPersistence;
use tabdeck::session::storage::{FileStore, MemoryStore};
use tabdeck::tab::{SessionInfo, TabStore, TabType, TabUpdate};
use tempfile::TempDir;

pub const NAMESPACE: &str = "test";

/// Memory-backed store plus a handle onto its raw key/value entries.
pub fn memory_store() -> (TabStore, MemoryStore) {
    let backend = MemoryStore::new();
    let store = TabStore::restore(TabPersistence::new(backend.clone(), NAMESPACE), 20);
    (store, backend)
}

/// Re-open a store over an existing memory backend, simulating a restart.
pub fn reopen(backend: &MemoryStore) -> TabStore {
    TabStore::restore(TabPersistence::new(backend.clone(), NAMESPACE), 20)
}

/// A tab state file inside a temporary directory.
///
/// Keep the value alive for the duration of the test; dropping it deletes the directory.
pub struct TestStateFile {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestStateFile {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("state").join("tab_state.json");
        Self { temp_dir, path }
    }

    /// Open a fresh store over the file, as a new process would.
    pub fn open(&self) -> TabStore {
        let backend = FileStore::open(&self.path).expect("Failed to open state file");
        TabStore::restore(TabPersistence::new(backend, NAMESPACE), 20)
    }
}

pub fn session(id: &str, project_path: &str) -> SessionInfo {
    SessionInfo {
        id: id.to_string(),
        project_id: format!("project-{id}"),
        project_path: project_path.to_string(),
        created_at: Some(1_700_000_000),
        first_message: Some("hello".to_string()),
    }
}

/// Titles of all tabs in display order.
pub fn titles(store: &TabStore) -> Vec<String> {
    store.tabs().iter().map(|t| t.title.clone()).collect()
}

/// Open one titled tab of each given type.
pub fn open_titled(store: &mut TabStore, tabs: &[(TabType, &str)]) {
    for (tab_type, title) in tabs {
        store
            .create_tab(*tab_type, TabUpdate::new().title(*title))
            .expect("store unexpectedly full");
    }
}

/// Assert the structural invariants every store must hold.
pub fn assert_invariants(store: &TabStore) {
    let mut ids: Vec<_> = store.tabs().iter().map(|t| t.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), store.tab_count(), "tab ids must be unique");

    for (idx, tab) in store.tabs().iter().enumerate() {
        assert_eq!(tab.order, idx, "order must equal position");
    }

    match store.active_tab_id() {
        None => assert_eq!(store.tab_count(), 0, "non-empty store needs an active tab"),
        Some(id) => assert!(store.tab(id).is_some(), "active tab must exist"),
    }

    assert!(store.tab_count() <= tabdeck::MAX_TABS);
}
