//! Tab records for the workspace shell
//!
//! This module provides the core tab infrastructure including:
//! - `Tab`: a single logical workspace (chat, agent run, settings panel, ...)
//! - `TabStore`: the ordered collection of tabs and the active-tab pointer
//! - `TabId`: unique, opaque identifier for each tab
//! - `TabUpdate`: partial field updates merged into a tab

mod manager;
pub mod payload;

pub use manager::{CloseOutcome, TabStore, TabsView};
pub use payload::{AgentInfo, ClaudeFileInfo, SessionInfo};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Unique identifier for a tab
///
/// Generated by the store, never supplied by callers. Stable for the lifetime
/// of the tab and across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Allocate a fresh identifier.
    pub fn generate() -> Self {
        Self(format!("tab-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of workspace a tab hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabType {
    Projects,
    Chat,
    Agent,
    AgentExecution,
    Agents,
    Usage,
    Mcp,
    Settings,
    ClaudeMd,
    ClaudeFile,
    CreateAgent,
    ImportAgent,
}

impl TabType {
    pub const ALL: [TabType; 12] = [
        TabType::Projects,
        TabType::Chat,
        TabType::Agent,
        TabType::AgentExecution,
        TabType::Agents,
        TabType::Usage,
        TabType::Mcp,
        TabType::Settings,
        TabType::ClaudeMd,
        TabType::ClaudeFile,
        TabType::CreateAgent,
        TabType::ImportAgent,
    ];

    /// Wire name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            TabType::Projects => "projects",
            TabType::Chat => "chat",
            TabType::Agent => "agent",
            TabType::AgentExecution => "agent-execution",
            TabType::Agents => "agents",
            TabType::Usage => "usage",
            TabType::Mcp => "mcp",
            TabType::Settings => "settings",
            TabType::ClaudeMd => "claude-md",
            TabType::ClaudeFile => "claude-file",
            TabType::CreateAgent => "create-agent",
            TabType::ImportAgent => "import-agent",
        }
    }

    /// Title used when the creator does not supply one.
    pub fn default_title(self) -> &'static str {
        match self {
            TabType::Projects => "Projects",
            TabType::Chat => "New Chat",
            TabType::Agent => "Agent",
            TabType::AgentExecution => "Agent Run",
            TabType::Agents => "Agents",
            TabType::Usage => "Usage",
            TabType::Mcp => "MCP Servers",
            TabType::Settings => "Settings",
            TabType::ClaudeMd => "CLAUDE.md",
            TabType::ClaudeFile => "CLAUDE.md",
            TabType::CreateAgent => "Create Agent",
            TabType::ImportAgent => "Import Agent",
        }
    }

    /// Ephemeral tabs are never written to the snapshot.
    pub fn is_ephemeral(self) -> bool {
        matches!(self, TabType::CreateAgent | TabType::ImportAgent)
    }

    /// At most one tab of a singleton type is opened; opening again re-focuses it.
    pub fn is_singleton(self) -> bool {
        matches!(
            self,
            TabType::Projects
                | TabType::Agents
                | TabType::Usage
                | TabType::Mcp
                | TabType::Settings
                | TabType::ClaudeMd
                | TabType::ImportAgent
        )
    }
}

impl fmt::Display for TabType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TabType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown tab type '{s}'"))
    }
}

/// Background work state reported by the tab's collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    #[default]
    Idle,
    Running,
    Error,
}

/// A single logical workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub tab_type: TabType,
    pub title: String,
    pub session_id: Option<String>,
    pub agent_run_id: Option<String>,
    pub claude_file_id: Option<String>,
    pub initial_project_path: Option<String>,
    pub project_path: Option<String>,
    pub status: TabStatus,
    pub has_unsaved_changes: bool,
    /// Left-to-right position; always equal to the tab's index in the store
    pub order: usize,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Live session payload, re-attached lazily after a restore
    pub session_data: Option<Arc<SessionInfo>>,
    /// Live agent payload, re-attached lazily after a restore
    pub agent_data: Option<Arc<AgentInfo>>,
}

impl Tab {
    /// Create an idle tab with a fresh id.
    pub fn new(tab_type: TabType, title: impl Into<String>, order: usize) -> Self {
        let now = Utc::now();
        Self {
            id: TabId::generate(),
            tab_type,
            title: title.into(),
            session_id: None,
            agent_run_id: None,
            claude_file_id: None,
            initial_project_path: None,
            project_path: None,
            status: TabStatus::Idle,
            has_unsaved_changes: false,
            order,
            icon: None,
            created_at: now,
            updated_at: now,
            session_data: None,
            agent_data: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TabStatus::Running
    }

    /// Merge a partial update into this tab and bump `updated_at`.
    pub fn apply(&mut self, update: TabUpdate) {
        let TabUpdate {
            tab_type,
            title,
            session_id,
            agent_run_id,
            claude_file_id,
            initial_project_path,
            project_path,
            status,
            has_unsaved_changes,
            icon,
            session_data,
            agent_data,
        } = update;

        if let Some(tab_type) = tab_type {
            self.tab_type = tab_type;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(session_id) = session_id {
            self.session_id = session_id;
        }
        if let Some(agent_run_id) = agent_run_id {
            self.agent_run_id = agent_run_id;
        }
        if let Some(claude_file_id) = claude_file_id {
            self.claude_file_id = claude_file_id;
        }
        if let Some(initial_project_path) = initial_project_path {
            self.initial_project_path = initial_project_path;
        }
        if let Some(project_path) = project_path {
            self.project_path = project_path;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(unsaved) = has_unsaved_changes {
            self.has_unsaved_changes = unsaved;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if session_data.is_some() {
            self.session_data = session_data;
        }
        if agent_data.is_some() {
            self.agent_data = agent_data;
        }

        self.updated_at = Utc::now();
    }
}

/// Partial set of tab fields, merged by [`TabStore::update_tab`] and used to
/// seed [`TabStore::create_tab`]. `None` leaves a field untouched.
///
/// The optional identifiers and the icon are `Option<Option<_>>`: `Some(None)`
/// clears the field, see [`TabUpdate::clear_project_path`] and friends.
///
/// `id`, `order` and the timestamps are owned by the store and cannot be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabUpdate {
    pub tab_type: Option<TabType>,
    pub title: Option<String>,
    pub session_id: Option<Option<String>>,
    pub agent_run_id: Option<Option<String>>,
    pub claude_file_id: Option<Option<String>>,
    pub initial_project_path: Option<Option<String>>,
    pub project_path: Option<Option<String>>,
    pub status: Option<TabStatus>,
    pub has_unsaved_changes: Option<bool>,
    pub icon: Option<Option<String>>,
    pub session_data: Option<Arc<SessionInfo>>,
    pub agent_data: Option<Arc<AgentInfo>>,
}

impl TabUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab_type(mut self, tab_type: TabType) -> Self {
        self.tab_type = Some(tab_type);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(Some(session_id.into()));
        self
    }

    pub fn agent_run_id(mut self, agent_run_id: impl Into<String>) -> Self {
        self.agent_run_id = Some(Some(agent_run_id.into()));
        self
    }

    pub fn claude_file_id(mut self, claude_file_id: impl Into<String>) -> Self {
        self.claude_file_id = Some(Some(claude_file_id.into()));
        self
    }

    pub fn initial_project_path(mut self, path: impl Into<String>) -> Self {
        self.initial_project_path = Some(Some(path.into()));
        self
    }

    pub fn project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(Some(path.into()));
        self
    }

    pub fn clear_session_id(mut self) -> Self {
        self.session_id = Some(None);
        self
    }

    pub fn clear_agent_run_id(mut self) -> Self {
        self.agent_run_id = Some(None);
        self
    }

    pub fn clear_claude_file_id(mut self) -> Self {
        self.claude_file_id = Some(None);
        self
    }

    pub fn clear_project_path(mut self) -> Self {
        self.project_path = Some(None);
        self
    }

    pub fn clear_icon(mut self) -> Self {
        self.icon = Some(None);
        self
    }

    pub fn status(mut self, status: TabStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn unsaved(mut self, has_unsaved_changes: bool) -> Self {
        self.has_unsaved_changes = Some(has_unsaved_changes);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(Some(icon.into()));
        self
    }

    pub fn session_data(mut self, session: Arc<SessionInfo>) -> Self {
        self.session_data = Some(session);
        self
    }

    pub fn agent_data(mut self, agent: Arc<AgentInfo>) -> Self {
        self.agent_data = Some(agent);
        self
    }
}
