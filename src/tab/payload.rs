//! Payloads owned by collaborators and attached to live tabs.
//!
//! These travel on the command bus and ride along on a [`Tab`](super::Tab)
//! while it is open. They are never written to the tab snapshot.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A chat session as reported by the session browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session identifier
    pub id: String,
    /// Identifier of the project the session belongs to
    #[serde(default)]
    pub project_id: String,
    /// Absolute path of the project directory
    pub project_path: String,
    /// Unix timestamp (seconds) the session was started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
    /// First user message, used as a preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
}

impl SessionInfo {
    /// Last path component of the project directory, used as the tab title.
    pub fn project_name(&self) -> Option<&str> {
        display_name(&self.project_path)
    }
}

/// An agent definition handed over when an agent run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_task: Option<String>,
}

/// A CLAUDE.md style memory file opened in an editor tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeFileInfo {
    /// Stable identifier of the file (its absolute path when nothing better exists)
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_path: Option<String>,
}

impl ClaudeFileInfo {
    /// Human title: explicit name, else the file name of its path.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.absolute_path.as_deref().and_then(display_name))
    }
}

fn display_name(path: &str) -> Option<&str> {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
}
