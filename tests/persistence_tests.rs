//! Tab snapshot persistence across simulated restarts.
//!
//! Covers the save/restore round trip, lossy filtering of running and
//! ephemeral tabs, per-tab validation drops, the persistence toggle,
//! corrupted snapshots, legacy key migration and the file-backed store.

mod common;

use common::{NAMESPACE, TestStateFile, memory_store, open_titled, reopen, session, titles};
use serde_json::json;
use std::sync::Arc;
use tabdeck::session::TabPersistence;
use tabdeck::session::storage::{KeyValueStore, MemoryStore};
use tabdeck::tab::{TabStatus, TabType, TabUpdate};

#[test]
fn test_round_trip_drops_running_and_ephemeral_tabs() {
    let (mut store, backend) = memory_store();
    open_titled(
        &mut store,
        &[
            (TabType::Projects, "Projects"),
            (TabType::Chat, "busy"),
            (TabType::CreateAgent, "Create Agent"),
            (TabType::Settings, "Settings"),
        ],
    );
    let busy = store.tabs()[1].id.clone();
    let settings = store.tabs()[3].id.clone();
    store.set_status(&busy, TabStatus::Running);
    store.mark_unsaved(&settings, true);
    store.switch_to_tab(&settings);

    let restored = reopen(&backend);

    assert_eq!(titles(&restored), vec!["Projects", "Settings"]);
    let orders: Vec<usize> = restored.tabs().iter().map(|t| t.order).collect();
    assert_eq!(orders, vec![0, 1]);
    assert_eq!(restored.active_tab_id(), Some(&settings));

    let settings_tab = restored.tab(&settings).unwrap();
    assert!(!settings_tab.has_unsaved_changes);
    assert_eq!(settings_tab.status, TabStatus::Idle);
    assert_eq!(
        settings_tab.created_at,
        store.tab(&settings).unwrap().created_at
    );
}

#[test]
fn test_active_running_tab_falls_back_to_first() {
    let (mut store, backend) = memory_store();
    open_titled(&mut store, &[(TabType::Usage, "Usage"), (TabType::Chat, "busy")]);
    let busy = store.active_tab_id().cloned().unwrap();
    store.set_status(&busy, TabStatus::Running);

    assert_eq!(
        backend.get("test_active_tab_v2").unwrap(),
        None,
        "active key must not name a tab missing from the snapshot"
    );

    let restored = reopen(&backend);
    assert_eq!(restored.active_tab().unwrap().title, "Usage");
}

#[test]
fn test_live_payloads_are_not_persisted() {
    let (mut store, backend) = memory_store();
    store.open_session_tab(Arc::new(session("s-1", "/home/me/widget")));

    let raw = backend.get("test_tabs_v2").unwrap().unwrap();
    assert!(!raw.contains("sessionData"));
    assert!(!raw.contains("hello"));

    let restored = reopen(&backend);
    let tab = restored.active_tab().unwrap();
    assert_eq!(tab.session_id.as_deref(), Some("s-1"));
    assert_eq!(tab.title, "widget");
    assert!(tab.session_data.is_none());
}

#[test]
fn test_agent_without_run_id_is_dropped_and_orders_shift() {
    let backend = MemoryStore::new();
    let snapshot = json!([
        {"id": "a", "type": "chat", "title": "first", "status": "idle",
         "hasUnsavedChanges": false, "order": 0,
         "createdAt": "2025-03-01T10:00:00.000Z", "updatedAt": "2025-03-01T10:00:00.000Z"},
        {"id": "b", "type": "agent", "title": "broken", "agentRunId": "", "status": "idle",
         "hasUnsavedChanges": false, "order": 1,
         "createdAt": "2025-03-01T10:00:00.000Z", "updatedAt": "2025-03-01T10:00:00.000Z"},
        {"id": "c", "type": "agent", "title": "run", "agentRunId": "run-7", "status": "idle",
         "hasUnsavedChanges": false, "order": 2,
         "createdAt": "2025-03-01T10:00:00.000Z", "updatedAt": "2025-03-01T10:00:00.000Z"},
        {"id": "d", "type": "usage", "title": "Usage", "status": "error",
         "hasUnsavedChanges": false, "order": 3,
         "createdAt": "2025-03-01T10:00:00.000Z", "updatedAt": "2025-03-01T10:00:00.000Z"}
    ]);
    backend
        .set("test_tabs_v2", &snapshot.to_string())
        .unwrap();
    backend.set("test_active_tab_v2", "b").unwrap();

    let store = reopen(&backend);

    let ids: Vec<&str> = store.tabs().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
    let orders: Vec<usize> = store.tabs().iter().map(|t| t.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(store.tabs()[2].status, TabStatus::Error);
    assert_eq!(store.active_tab_id().map(|id| id.as_str()), Some("a"));
}

#[test]
fn test_agent_execution_tabs_do_not_survive_restart() {
    let (mut store, backend) = memory_store();
    open_titled(&mut store, &[(TabType::Agents, "Agents")]);
    let origin = store.tabs()[0].id.clone();
    let agent = tabdeck::tab::AgentInfo {
        id: Some(1),
        name: "builder".to_string(),
        icon: String::new(),
        model: Some("sonnet".to_string()),
        system_prompt: None,
        default_task: None,
    };
    store.open_agent_execution(Arc::new(agent), Some(&origin), Some("/repo"));
    assert_eq!(store.tab_count(), 2);

    // Only the agents list comes back, and it takes over as active tab
    let restored = reopen(&backend);
    assert_eq!(restored.tab_count(), 1);
    assert_eq!(restored.tabs()[0].tab_type, TabType::Agents);
    assert_eq!(restored.active_tab_id(), Some(&origin));
}

#[test]
fn test_disabled_persistence_restores_nothing() {
    let (mut store, backend) = memory_store();
    open_titled(&mut store, &[(TabType::Chat, "kept?")]);

    store.set_persistence_enabled(false);
    assert!(!store.persistence_enabled());
    assert_eq!(backend.get("test_tabs_v2").unwrap(), None);

    // Even a snapshot written behind our back is ignored while disabled
    backend.set("test_tabs_v2", "[]").unwrap();
    let restored = reopen(&backend);
    assert_eq!(restored.tab_count(), 0);
    assert_eq!(restored.active_tab_id(), None);

    // Mutations while disabled are not written
    let mut restored = restored;
    restored.create_tab(TabType::Chat, TabUpdate::new());
    assert_eq!(backend.get("test_tabs_v2").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_enabling_persistence_writes_current_state() {
    let (mut store, backend) = memory_store();
    store.set_persistence_enabled(false);
    open_titled(&mut store, &[(TabType::Mcp, "MCP Servers")]);

    store.set_persistence_enabled(true);

    let restored = reopen(&backend);
    assert_eq!(titles(&restored), vec!["MCP Servers"]);
}

#[test]
fn test_corrupted_snapshot_resets_both_keys() {
    let backend = MemoryStore::new();
    backend
        .set("test_tabs_v2", "[{\"id\": \"a\", \"type\": \"chat\", \"tit")
        .unwrap();
    backend.set("test_active_tab_v2", "a").unwrap();

    let persistence = TabPersistence::new(backend.clone(), NAMESPACE);
    let restored = persistence.load();

    assert!(restored.tabs.is_empty());
    assert_eq!(restored.active_tab_id, None);
    assert_eq!(backend.get("test_tabs_v2").unwrap(), None);
    assert_eq!(backend.get("test_active_tab_v2").unwrap(), None);
    assert!(persistence.is_enabled());
}

#[test]
fn test_snapshot_that_is_not_an_array_is_corrupt() {
    let backend = MemoryStore::new();
    backend.set("test_tabs_v2", "{\"tabs\": []}").unwrap();

    let store = reopen(&backend);
    assert_eq!(store.tab_count(), 0);
    assert_eq!(backend.get("test_tabs_v2").unwrap(), None);
}

#[test]
fn test_legacy_snapshot_is_migrated() {
    let backend = MemoryStore::new();
    let legacy = json!([
        {"id": "old-1", "type": "projects", "title": "Projects", "order": 0,
         "createdAt": "2024-12-01T08:00:00Z", "updatedAt": "2024-12-01T08:00:00Z"}
    ]);
    backend.set("test_tabs", &legacy.to_string()).unwrap();

    let store = reopen(&backend);

    assert_eq!(titles(&store), vec!["Projects"]);
    assert_eq!(backend.get("test_tabs").unwrap(), None);
    assert!(backend.get("test_tabs_v2").unwrap().is_some());
}

#[test]
fn test_namespaces_are_isolated() {
    let backend = MemoryStore::new();
    let mut one = tabdeck::TabStore::restore(TabPersistence::new(backend.clone(), "one"), 20);
    open_titled(&mut one, &[(TabType::Usage, "Usage")]);

    let two = tabdeck::TabStore::restore(TabPersistence::new(backend.clone(), "two"), 20);
    assert_eq!(two.tab_count(), 0);
    assert!(backend.keys().iter().all(|k| k.starts_with("one_")));
}

#[test]
fn test_file_backed_store_survives_restart() {
    let state = TestStateFile::new();

    let mut store = state.open();
    open_titled(
        &mut store,
        &[(TabType::Chat, "notes"), (TabType::ClaudeMd, "CLAUDE.md")],
    );
    let notes = store.tabs()[0].id.clone();
    store.switch_to_tab(&notes);
    store.reorder_tabs(0, 1);
    drop(store);

    assert!(state.path.exists());

    let restored = state.open();
    assert_eq!(titles(&restored), vec!["CLAUDE.md", "notes"]);
    assert_eq!(restored.active_tab_id(), Some(&notes));
}

#[test]
fn test_restore_respects_smaller_capacity() {
    let (mut store, backend) = memory_store();
    for _ in 0..5 {
        store.create_tab(TabType::Chat, TabUpdate::new());
    }

    let small = tabdeck::TabStore::restore(TabPersistence::new(backend.clone(), NAMESPACE), 3);
    assert_eq!(small.tab_count(), 3);
    assert_eq!(small.capacity(), 3);
    assert!(!small.can_add_tab());
    common::assert_invariants(&small);
}
