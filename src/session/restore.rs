//! Helpers for restoring tabs from a snapshot

use super::{RestoredTabs, SerializedTab};
use crate::tab::{Tab, TabId, TabStatus, TabType};
use std::collections::HashSet;

/// Why a stored tab was not restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingId,
    MissingTitle,
    MissingAgentRunId,
    MissingClaudeFileId,
    /// Needs a live agent payload that is never persisted
    AgentExecution,
    Ephemeral,
    DuplicateId,
}

/// Type-specific validity rules for a stored tab.
pub fn validate(tab: &SerializedTab) -> Result<(), Rejection> {
    if tab.id.trim().is_empty() {
        return Err(Rejection::MissingId);
    }
    if tab.title.trim().is_empty() {
        return Err(Rejection::MissingTitle);
    }

    match tab.tab_type {
        TabType::Agent if is_blank(&tab.agent_run_id) => Err(Rejection::MissingAgentRunId),
        TabType::ClaudeFile if is_blank(&tab.claude_file_id) => {
            Err(Rejection::MissingClaudeFileId)
        }
        TabType::AgentExecution => Err(Rejection::AgentExecution),
        t if t.is_ephemeral() => Err(Rejection::Ephemeral),
        _ => Ok(()),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Revive a stored tab into a live one, without live payloads.
pub fn revive(stored: SerializedTab) -> Tab {
    Tab {
        id: TabId::from(stored.id),
        tab_type: stored.tab_type,
        title: stored.title,
        session_id: stored.session_id,
        agent_run_id: stored.agent_run_id,
        claude_file_id: stored.claude_file_id,
        initial_project_path: stored.initial_project_path,
        project_path: stored.project_path,
        status: match stored.status {
            TabStatus::Running => TabStatus::Idle,
            other => other,
        },
        has_unsaved_changes: false,
        order: stored.order,
        icon: stored.icon,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        session_data: None,
        agent_data: None,
    }
}

/// Turn stored entries into a valid tab collection.
///
/// Entries that do not deserialize or fail validation are dropped one by one.
/// Survivors keep their stored relative order and are renumbered `0..n`.
/// The stored active id wins if it survived, else the first tab is active.
pub fn restore_tabs(entries: Vec<serde_json::Value>, stored_active: Option<&str>) -> RestoredTabs {
    let mut seen = HashSet::new();
    let mut survivors: Vec<(usize, SerializedTab)> = Vec::with_capacity(entries.len());

    for (position, entry) in entries.into_iter().enumerate() {
        let stored: SerializedTab = match serde_json::from_value(entry) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Dropping unreadable stored tab at position {}: {}", position, e);
                continue;
            }
        };

        let verdict = validate(&stored).and_then(|()| {
            if seen.insert(stored.id.clone()) {
                Ok(())
            } else {
                Err(Rejection::DuplicateId)
            }
        });
        if let Err(reason) = verdict {
            log::warn!(
                "Dropping stored {} tab '{}' ({}): {:?}",
                stored.tab_type,
                stored.title,
                stored.id,
                reason
            );
            continue;
        }

        survivors.push((position, stored));
    }

    // Stable on ties so entries with equal or missing order keep array position
    survivors.sort_by_key(|(position, stored)| (stored.order, *position));

    let tabs: Vec<Tab> = survivors
        .into_iter()
        .enumerate()
        .map(|(index, (_, stored))| {
            let mut tab = revive(stored);
            tab.order = index;
            tab
        })
        .collect();

    let active_tab_id = stored_active
        .and_then(|id| tabs.iter().find(|t| t.id.as_str() == id))
        .or_else(|| tabs.first())
        .map(|t| t.id.clone());

    RestoredTabs {
        tabs,
        active_tab_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, tab_type: &str, order: usize) -> serde_json::Value {
        json!({
            "id": id,
            "type": tab_type,
            "title": format!("title {id}"),
            "status": "idle",
            "hasUnsavedChanges": false,
            "order": order,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-02T00:00:00.000Z"
        })
    }

    #[test]
    fn validation_rules_per_type() {
        let base = |tab_type| SerializedTab {
            id: "t".to_string(),
            tab_type,
            title: "x".to_string(),
            session_id: None,
            agent_run_id: None,
            claude_file_id: None,
            initial_project_path: None,
            project_path: None,
            status: TabStatus::Idle,
            has_unsaved_changes: false,
            order: 0,
            icon: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        assert_eq!(validate(&base(TabType::Chat)), Ok(()));
        assert_eq!(
            validate(&base(TabType::Agent)),
            Err(Rejection::MissingAgentRunId)
        );
        let mut agent = base(TabType::Agent);
        agent.agent_run_id = Some("run-1".to_string());
        assert_eq!(validate(&agent), Ok(()));

        assert_eq!(
            validate(&base(TabType::ClaudeFile)),
            Err(Rejection::MissingClaudeFileId)
        );
        assert_eq!(
            validate(&base(TabType::AgentExecution)),
            Err(Rejection::AgentExecution)
        );
        assert_eq!(
            validate(&base(TabType::ImportAgent)),
            Err(Rejection::Ephemeral)
        );

        let mut untitled = base(TabType::Usage);
        untitled.title = " ".to_string();
        assert_eq!(validate(&untitled), Err(Rejection::MissingTitle));
    }

    #[test]
    fn renumbers_by_stored_order() {
        let restored = restore_tabs(
            vec![entry("c", "chat", 7), entry("a", "usage", 2), entry("b", "mcp", 4)],
            None,
        );
        let ids: Vec<&str> = restored.tabs.iter().map(|t| t.id.as_str()).collect();
        let orders: Vec<usize> = restored.tabs.iter().map(|t| t.order).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(restored.active_tab_id, Some(TabId::from("a")));
    }

    #[test]
    fn unreadable_and_duplicate_entries_are_dropped() {
        let restored = restore_tabs(
            vec![
                entry("a", "chat", 0),
                json!({"id": "x", "type": "terminal", "title": "?"}),
                json!("not an object"),
                entry("a", "usage", 1),
                entry("b", "settings", 2),
            ],
            Some("b"),
        );
        let ids: Vec<&str> = restored.tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(restored.tabs[0].tab_type, TabType::Chat);
        assert_eq!(restored.active_tab_id, Some(TabId::from("b")));
    }

    #[test]
    fn running_status_is_reset() {
        let mut stored = entry("a", "chat", 0);
        stored["status"] = json!("running");
        stored["hasUnsavedChanges"] = json!(true);

        let restored = restore_tabs(vec![stored], Some("missing"));
        assert_eq!(restored.tabs[0].status, TabStatus::Idle);
        assert!(!restored.tabs[0].has_unsaved_changes);
        assert_eq!(restored.active_tab_id, Some(TabId::from("a")));
    }

    #[test]
    fn empty_snapshot_has_no_active_tab() {
        let restored = restore_tabs(Vec::new(), Some("a"));
        assert!(restored.tabs.is_empty());
        assert_eq!(restored.active_tab_id, None);
    }
}
