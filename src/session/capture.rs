//! Capture the live tab collection into its serializable form

use super::SerializedTab;
use crate::tab::{Tab, TabStatus};

/// Whether a tab belongs in a snapshot at all.
///
/// Running tabs are stale by the time the snapshot is read back (their work
/// cannot be resumed) and ephemeral types are never persisted.
pub fn is_persistable(tab: &Tab) -> bool {
    !tab.is_running() && !tab.tab_type.is_ephemeral()
}

/// Project the persistable tabs, in order, to [`SerializedTab`].
pub fn capture_tabs(tabs: &[Tab]) -> Vec<SerializedTab> {
    tabs.iter()
        .filter(|tab| is_persistable(tab))
        .map(capture_tab)
        .collect()
}

/// Project one tab. Live payloads are dropped, `running` becomes `idle`
/// and unsaved-change markers are cleared.
pub fn capture_tab(tab: &Tab) -> SerializedTab {
    SerializedTab {
        id: tab.id.to_string(),
        tab_type: tab.tab_type,
        title: tab.title.clone(),
        session_id: tab.session_id.clone(),
        agent_run_id: tab.agent_run_id.clone(),
        claude_file_id: tab.claude_file_id.clone(),
        initial_project_path: tab.initial_project_path.clone(),
        project_path: tab.project_path.clone(),
        status: match tab.status {
            TabStatus::Running => TabStatus::Idle,
            other => other,
        },
        has_unsaved_changes: false,
        order: tab.order,
        icon: tab.icon.clone(),
        created_at: tab.created_at,
        updated_at: tab.updated_at,
    }
}
