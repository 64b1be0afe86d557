//! Event router: the typed command bus between UI publishers and the tab store.
//!
//! Publishers (menus, the session browser, keyboard shortcuts, the agent
//! launcher) hold a cloneable [`CommandBus`] and post [`TabCommand`]s.
//! The [`EventRouter`] owns the receiving half and turns each command into a
//! single [`TabStore`] call on the event-loop thread.

pub mod shortcuts;

pub use shortcuts::ShortcutMap;

use crate::tab::{AgentInfo, ClaudeFileInfo, SessionInfo, TabId, TabStore, TabType, TabUpdate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A request to change the tab collection.
///
/// Tagged with `type`; the wire names are the kebab-case variant names
/// (`create-chat-tab`, `switch-to-tab-by-index`, ...). Payload fields are
/// camelCase on the wire (`tabId`, `projectPath`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum TabCommand {
    /// Open a fresh chat tab.
    CreateChatTab,

    /// Close the active tab.
    CloseCurrentTab,

    /// Activate the next tab, wrapping at the end.
    SwitchToNextTab,

    /// Activate the previous tab, wrapping at the start.
    SwitchToPreviousTab,

    /// Activate the tab at a 0-based position.
    SwitchToTabByIndex {
        /// Position in display order
        index: usize,
    },

    /// Activate a tab by id.
    SwitchToTab {
        /// Target tab
        tab_id: TabId,
    },

    /// Show a chat session, reusing the tab already bound to it.
    OpenSessionInTab {
        /// Session to show
        session: SessionInfo,
    },

    /// A session was picked in the session browser. Same effect as `OpenSessionInTab`.
    ClaudeSessionSelected {
        /// Session to show
        session: SessionInfo,
    },

    /// Open a memory file in an editor tab.
    OpenClaudeFile {
        /// File to edit
        file: ClaudeFileInfo,
    },

    /// Show a freshly started agent run.
    OpenAgentExecution {
        /// Agent definition being run
        agent: AgentInfo,
        /// Tab the run was launched from
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
        /// Working directory of the run
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project_path: Option<String>,
    },

    /// Close a tab by id.
    CloseTab {
        /// Tab to close
        tab_id: TabId,
    },

    /// Open a utility tab, re-focusing the existing one for singleton types.
    OpenTab {
        /// Kind of tab to open
        tab_type: TabType,
    },
}

impl TabCommand {
    /// Wire name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            TabCommand::CreateChatTab => "create-chat-tab",
            TabCommand::CloseCurrentTab => "close-current-tab",
            TabCommand::SwitchToNextTab => "switch-to-next-tab",
            TabCommand::SwitchToPreviousTab => "switch-to-previous-tab",
            TabCommand::SwitchToTabByIndex { .. } => "switch-to-tab-by-index",
            TabCommand::SwitchToTab { .. } => "switch-to-tab",
            TabCommand::OpenSessionInTab { .. } => "open-session-in-tab",
            TabCommand::ClaudeSessionSelected { .. } => "claude-session-selected",
            TabCommand::OpenClaudeFile { .. } => "open-claude-file",
            TabCommand::OpenAgentExecution { .. } => "open-agent-execution",
            TabCommand::CloseTab { .. } => "close-tab",
            TabCommand::OpenTab { .. } => "open-tab",
        }
    }
}

/// Publishing half of the command channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CommandBus {
    command_tx: mpsc::UnboundedSender<TabCommand>,
}

impl CommandBus {
    /// Post a command. Never fails; commands sent after the router is gone are dropped.
    pub fn publish(&self, command: TabCommand) {
        if let Err(e) = self.command_tx.send(command) {
            log::debug!("Event router closed, dropping {}", e.0.name());
        }
    }
}

/// Receiving half of the command channel; applies commands to a [`TabStore`].
#[derive(Debug)]
pub struct EventRouter {
    command_rx: mpsc::UnboundedReceiver<TabCommand>,
}

/// Create a connected bus/router pair.
pub fn channel() -> (CommandBus, EventRouter) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    (CommandBus { command_tx }, EventRouter { command_rx })
}

impl EventRouter {
    /// Apply one command to the store.
    ///
    /// Each command unpacks its payload and makes exactly one store call.
    pub fn dispatch(store: &mut TabStore, command: TabCommand) {
        log::debug!("Dispatching {}", command.name());

        match command {
            TabCommand::CreateChatTab => {
                store.create_tab(TabType::Chat, TabUpdate::new());
            }
            TabCommand::CloseCurrentTab => {
                if let Some(id) = store.active_tab_id().cloned() {
                    store.close_tab(&id);
                }
            }
            TabCommand::SwitchToNextTab => store.switch_to_next_tab(),
            TabCommand::SwitchToPreviousTab => store.switch_to_previous_tab(),
            TabCommand::SwitchToTabByIndex { index } => store.switch_to_index(index),
            TabCommand::SwitchToTab { tab_id } => store.switch_to_tab(&tab_id),
            TabCommand::OpenSessionInTab { session }
            | TabCommand::ClaudeSessionSelected { session } => {
                store.open_session_tab(Arc::new(session));
            }
            TabCommand::OpenClaudeFile { file } => {
                store.open_claude_file_tab(&file);
            }
            TabCommand::OpenAgentExecution {
                agent,
                tab_id,
                project_path,
            } => {
                store.open_agent_execution(
                    Arc::new(agent),
                    tab_id.as_ref(),
                    project_path.as_deref(),
                );
            }
            TabCommand::CloseTab { tab_id } => {
                store.close_tab(&tab_id);
            }
            TabCommand::OpenTab { tab_type } => {
                store.open_singleton(tab_type);
            }
        }
    }

    /// Apply every queued command in arrival order. Returns how many ran.
    pub fn process_pending(&mut self, store: &mut TabStore) -> usize {
        let mut processed = 0;
        while let Ok(command) = self.command_rx.try_recv() {
            Self::dispatch(store, command);
            processed += 1;
        }
        processed
    }

    /// Apply commands as they arrive until every [`CommandBus`] is dropped.
    ///
    /// Hands the store back once the channel closes.
    pub async fn run(mut self, mut store: TabStore) -> TabStore {
        log::info!("Event router started");
        while let Some(command) = self.command_rx.recv().await {
            Self::dispatch(&mut store, command);
        }
        log::info!("Event router stopped: all publishers dropped");
        store
    }
}
