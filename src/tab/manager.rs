//! Tab store: the ordered tab collection and the active-tab pointer

use super::{AgentInfo, ClaudeFileInfo, SessionInfo, Tab, TabId, TabStatus, TabType, TabUpdate};
use crate::session::TabPersistence;
use std::sync::Arc;
use tabdeck_config::MAX_TABS;
use tokio::sync::watch;

/// Snapshot of the store published to subscribers after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabsView {
    /// All tabs in display order
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<TabId>,
}

/// Result of [`TabStore::close_tab_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// The tab has unsaved changes; retry with `force` after the user confirms
    NeedsConfirmation,
    NotFound,
}

/// Holds every open tab in display order plus the active pointer.
///
/// Invariants:
/// - tab ids are unique
/// - `tabs[i].order == i`
/// - `active_tab_id` is `None` exactly when there are no tabs, otherwise it names a tab
/// - at most `capacity` tabs (never more than [`MAX_TABS`])
///
/// Every state change is written through [`TabPersistence`] and published to
/// subscribers. Operations on unknown ids are silent no-ops.
pub struct TabStore {
    /// All tabs, in order
    tabs: Vec<Tab>,
    /// Currently active tab ID
    active_tab_id: Option<TabId>,
    capacity: usize,
    persistence: TabPersistence,
    notifier: watch::Sender<TabsView>,
}

impl TabStore {
    /// Create an empty store with the default capacity. Nothing is restored.
    pub fn new(persistence: TabPersistence) -> Self {
        Self::with_capacity(persistence, MAX_TABS)
    }

    /// Create an empty store holding at most `capacity` tabs (clamped to `1..=MAX_TABS`).
    pub fn with_capacity(persistence: TabPersistence, capacity: usize) -> Self {
        let (notifier, _) = watch::channel(TabsView::default());
        Self {
            tabs: Vec::new(),
            active_tab_id: None,
            capacity: capacity.clamp(1, MAX_TABS),
            persistence,
            notifier,
        }
    }

    /// Create a store seeded from the last saved snapshot.
    pub fn restore(persistence: TabPersistence, capacity: usize) -> Self {
        let restored = persistence.load();
        let mut store = Self::with_capacity(persistence, capacity);

        let mut tabs = restored.tabs;
        if tabs.len() > store.capacity {
            log::warn!(
                "Snapshot holds {} tabs, keeping the first {}",
                tabs.len(),
                store.capacity
            );
            tabs.truncate(store.capacity);
        }
        store.active_tab_id = restored
            .active_tab_id
            .filter(|id| tabs.iter().any(|t| &t.id == id))
            .or_else(|| tabs.first().map(|t| t.id.clone()));
        store.tabs = tabs;
        store.renumber();

        log::info!(
            "Tab store initialized with {} restored tab(s)",
            store.tabs.len()
        );
        store.publish();
        store
    }

    /// Create a new tab at the end and make it active.
    ///
    /// Returns `None` without changing anything when the store is full.
    pub fn create_tab(&mut self, tab_type: TabType, seed: TabUpdate) -> Option<TabId> {
        if !self.can_add_tab() {
            log::warn!(
                "Refusing to open {} tab: limit of {} tabs reached",
                tab_type,
                self.capacity
            );
            return None;
        }

        let order = self.tabs.len();
        let title = match tab_type {
            TabType::Chat => format!("Chat {}", self.next_chat_number()),
            other => other.default_title().to_string(),
        };
        let mut tab = Tab::new(tab_type, title, order);
        tab.apply(TabUpdate {
            // The tab type is fixed by the caller, not by the seed
            tab_type: None,
            ..seed
        });
        tab.created_at = tab.updated_at;
        tab.status = TabStatus::Idle;

        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active_tab_id = Some(id.clone());

        log::info!(
            "Created {} tab {} (total: {})",
            tab_type,
            id,
            self.tabs.len()
        );
        self.commit();
        Some(id)
    }

    /// Merge `update` into a tab. Unknown ids are ignored.
    pub fn update_tab(&mut self, id: &TabId, update: TabUpdate) {
        let Some(tab) = self.tabs.iter_mut().find(|t| &t.id == id) else {
            log::debug!("Ignoring update for unknown tab {}", id);
            return;
        };
        tab.apply(update);
        self.commit();
    }

    /// Close a tab by ID.
    ///
    /// If it was active, the tab now at its position becomes active, else the
    /// one to its left, else nothing. Returns true if a tab was removed.
    pub fn close_tab(&mut self, id: &TabId) -> bool {
        let Some(idx) = self.tabs.iter().position(|t| &t.id == id) else {
            log::debug!("Ignoring close for unknown tab {}", id);
            return false;
        };

        log::info!("Closing tab {} (index {})", id, idx);
        self.tabs.remove(idx);
        self.renumber();

        if self.active_tab_id.as_ref() == Some(id) {
            self.active_tab_id = self
                .tabs
                .get(idx)
                .or_else(|| idx.checked_sub(1).and_then(|left| self.tabs.get(left)))
                .map(|t| t.id.clone());
        }

        self.commit();
        true
    }

    /// Close a tab unless it has unsaved changes and `force` is false.
    pub fn close_tab_checked(&mut self, id: &TabId, force: bool) -> CloseOutcome {
        match self.tab(id) {
            None => CloseOutcome::NotFound,
            Some(tab) if tab.has_unsaved_changes && !force => {
                log::debug!("Tab {} has unsaved changes, close needs confirmation", id);
                CloseOutcome::NeedsConfirmation
            }
            Some(_) => {
                self.close_tab(id);
                CloseOutcome::Closed
            }
        }
    }

    /// Close every tab.
    pub fn close_all_tabs(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        log::info!("Closing all {} tabs", self.tabs.len());
        self.tabs.clear();
        self.active_tab_id = None;
        self.commit();
    }

    /// Switch to a tab by ID. Unknown ids are ignored.
    ///
    /// Only the pointer moves; other tabs keep running untouched.
    pub fn switch_to_tab(&mut self, id: &TabId) {
        if !self.tabs.iter().any(|t| &t.id == id) {
            log::debug!("Ignoring switch to unknown tab {}", id);
            return;
        }
        if self.active_tab_id.as_ref() == Some(id) {
            return;
        }
        self.active_tab_id = Some(id.clone());
        log::debug!("Switched to tab {}", id);
        self.commit();
    }

    /// Switch to the tab at a 0-based position. Out of range is a no-op.
    pub fn switch_to_index(&mut self, index: usize) {
        if let Some(id) = self.tabs.get(index).map(|t| t.id.clone()) {
            self.switch_to_tab(&id);
        }
    }

    /// Switch to the next tab (wraps around)
    pub fn switch_to_next_tab(&mut self) {
        if self.tabs.len() <= 1 {
            return;
        }
        let current = self.active_index().unwrap_or(0);
        self.switch_to_index((current + 1) % self.tabs.len());
    }

    /// Switch to the previous tab (wraps around)
    pub fn switch_to_previous_tab(&mut self) {
        if self.tabs.len() <= 1 {
            return;
        }
        let current = self.active_index().unwrap_or(0);
        let prev = if current == 0 {
            self.tabs.len() - 1
        } else {
            current - 1
        };
        self.switch_to_index(prev);
    }

    /// Move the tab at `from_index` to `to_index` (used by drag-and-drop reordering).
    ///
    /// Returns true if the tab was actually moved, false if either index is
    /// out of range or both are equal.
    pub fn reorder_tabs(&mut self, from_index: usize, to_index: usize) -> bool {
        let len = self.tabs.len();
        if from_index >= len || to_index >= len || from_index == to_index {
            return false;
        }

        let tab = self.tabs.remove(from_index);
        log::debug!(
            "Moved tab {} from index {} to {}",
            tab.id,
            from_index,
            to_index
        );
        self.tabs.insert(to_index, tab);
        self.renumber();
        self.commit();
        true
    }

    pub fn set_title(&mut self, id: &TabId, title: impl Into<String>) {
        self.update_tab(id, TabUpdate::new().title(title));
    }

    pub fn set_status(&mut self, id: &TabId, status: TabStatus) {
        self.update_tab(id, TabUpdate::new().status(status));
    }

    pub fn mark_unsaved(&mut self, id: &TabId, has_unsaved_changes: bool) {
        self.update_tab(id, TabUpdate::new().unsaved(has_unsaved_changes));
    }

    /// Focus the chat tab for a session, or open one.
    pub fn open_chat_tab(
        &mut self,
        session_id: Option<&str>,
        title: Option<&str>,
    ) -> Option<TabId> {
        if let Some(existing) = session_id
            .and_then(|sid| self.find_tab_by_session_id(sid))
            .map(|t| t.id.clone())
        {
            self.switch_to_tab(&existing);
            return Some(existing);
        }

        let mut seed = TabUpdate::new();
        if let Some(sid) = session_id {
            seed = seed.session_id(sid);
        }
        if let Some(title) = title {
            seed = seed.title(title);
        }
        self.create_tab(TabType::Chat, seed)
    }

    /// Show a session: refresh and focus the tab already bound to it, or open a chat tab.
    pub fn open_session_tab(&mut self, session: Arc<SessionInfo>) -> Option<TabId> {
        let title = session.project_name().map(str::to_string);

        if let Some(existing) = self
            .find_tab_by_session_id(&session.id)
            .map(|t| t.id.clone())
        {
            let mut update = TabUpdate::new().session_data(Arc::clone(&session));
            if let Some(title) = title {
                update = update.title(title);
            }
            if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == existing) {
                tab.apply(update);
            }
            self.active_tab_id = Some(existing.clone());
            log::debug!("Re-focused tab {} for session {}", existing, session.id);
            self.commit();
            return Some(existing);
        }

        let mut seed = TabUpdate::new()
            .session_id(session.id.clone())
            .initial_project_path(session.project_path.clone())
            .project_path(session.project_path.clone())
            .session_data(Arc::clone(&session));
        if let Some(title) = title {
            seed = seed.title(title);
        }
        self.create_tab(TabType::Chat, seed)
    }

    /// Focus the tab showing an agent run, or open one.
    pub fn open_agent_tab(&mut self, agent_run_id: &str, name: &str) -> Option<TabId> {
        if let Some(existing) = self
            .find_tab_by_agent_run_id(agent_run_id)
            .map(|t| t.id.clone())
        {
            self.switch_to_tab(&existing);
            return Some(existing);
        }
        self.create_tab(
            TabType::Agent,
            TabUpdate::new().agent_run_id(agent_run_id).title(name),
        )
    }

    /// Focus the editor tab for a memory file, or open one.
    pub fn open_claude_file_tab(&mut self, file: &ClaudeFileInfo) -> Option<TabId> {
        if let Some(existing) = self
            .find_tab_by_claude_file_id(&file.id)
            .map(|t| t.id.clone())
        {
            self.switch_to_tab(&existing);
            return Some(existing);
        }

        let mut seed = TabUpdate::new().claude_file_id(file.id.clone());
        if let Some(name) = file.display_name() {
            seed = seed.title(name);
        }
        self.create_tab(TabType::ClaudeFile, seed)
    }

    /// Open a tab showing an agent execution and make it active.
    ///
    /// `origin` is the tab the run was launched from. It is only logged; the
    /// origin tab is left untouched.
    pub fn open_agent_execution(
        &mut self,
        agent: Arc<AgentInfo>,
        origin: Option<&TabId>,
        project_path: Option<&str>,
    ) -> Option<TabId> {
        let mut seed = TabUpdate::new()
            .title(format!("Run: {}", agent.name))
            .agent_data(Arc::clone(&agent));
        if let Some(path) = project_path {
            seed = seed.project_path(path);
        }
        if !agent.icon.is_empty() {
            seed = seed.icon(agent.icon.clone());
        }

        let id = self.create_tab(TabType::AgentExecution, seed)?;
        match origin {
            Some(origin) => log::info!(
                "Tab {} runs agent '{}' (launched from {})",
                id,
                agent.name,
                origin
            ),
            None => log::info!("Tab {} runs agent '{}'", id, agent.name),
        }
        Some(id)
    }

    /// Focus the existing tab of a singleton type, or open a tab of `tab_type`.
    pub fn open_singleton(&mut self, tab_type: TabType) -> Option<TabId> {
        if tab_type.is_singleton()
            && let Some(existing) = self.find_tab_by_type(tab_type).map(|t| t.id.clone())
        {
            self.switch_to_tab(&existing);
            return Some(existing);
        }
        self.create_tab(tab_type, TabUpdate::new())
    }

    /// Turn persistence on or off. Enabling writes the current state right away.
    pub fn set_persistence_enabled(&mut self, enabled: bool) {
        self.persistence.set_enabled(enabled);
        if enabled {
            self.persistence
                .save(&self.tabs, self.active_tab_id.as_ref());
        }
    }

    pub fn persistence_enabled(&self) -> bool {
        self.persistence.is_enabled()
    }

    /// Receive a [`TabsView`] after every change.
    pub fn subscribe(&self) -> watch::Receiver<TabsView> {
        self.notifier.subscribe()
    }

    pub fn can_add_tab(&self) -> bool {
        self.tabs.len() < self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get all tabs in display order
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Get a tab by ID
    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn active_tab_id(&self) -> Option<&TabId> {
        self.active_tab_id.as_ref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_ref().and_then(|id| self.tab(id))
    }

    /// Get index of active tab (0-based)
    pub fn active_index(&self) -> Option<usize> {
        self.active_tab_id
            .as_ref()
            .and_then(|id| self.tabs.iter().position(|t| &t.id == id))
    }

    pub fn find_tab_by_session_id(&self, session_id: &str) -> Option<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.session_id.as_deref() == Some(session_id))
    }

    pub fn find_tab_by_agent_run_id(&self, agent_run_id: &str) -> Option<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.agent_run_id.as_deref() == Some(agent_run_id))
    }

    pub fn find_tab_by_claude_file_id(&self, claude_file_id: &str) -> Option<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.claude_file_id.as_deref() == Some(claude_file_id))
    }

    pub fn find_tab_by_type(&self, tab_type: TabType) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.tab_type == tab_type)
    }

    pub fn tabs_by_type(&self, tab_type: TabType) -> Vec<&Tab> {
        self.tabs
            .iter()
            .filter(|t| t.tab_type == tab_type)
            .collect()
    }

    /// Current state as published to subscribers.
    pub fn view(&self) -> TabsView {
        TabsView {
            tabs: self.tabs.clone(),
            active_tab_id: self.active_tab_id.clone(),
        }
    }

    /// Number for the next default chat title.
    ///
    /// Past both the tab count and every `Chat N` title still open, so a
    /// close followed by a create never repeats a title.
    fn next_chat_number(&self) -> usize {
        self.tabs
            .iter()
            .filter_map(|t| t.title.strip_prefix("Chat ")?.parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            .max(self.tabs.len())
            + 1
    }

    fn renumber(&mut self) {
        for (idx, tab) in self.tabs.iter_mut().enumerate() {
            tab.order = idx;
        }
    }

    /// Persist, then broadcast.
    fn commit(&mut self) {
        self.persistence
            .save(&self.tabs, self.active_tab_id.as_ref());
        self.publish();
    }

    fn publish(&self) {
        self.notifier.send_replace(self.view());
    }
}

impl std::fmt::Debug for TabStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabStore")
            .field("tabs", &self.tabs.len())
            .field("active_tab_id", &self.active_tab_id)
            .field("capacity", &self.capacity)
            .finish()
    }
}
