//! Keybinding management methods for `Config`.

use super::config_struct::Config;
use std::collections::HashSet;

impl Config {
    /// Merge default keybindings into the user's config.
    /// Only adds keybindings for actions that don't already exist in the user's config,
    /// so actions introduced in a newer release reach existing users.
    pub(crate) fn merge_default_keybindings(&mut self) {
        let existing_actions: HashSet<String> = self
            .keybindings
            .iter()
            .map(|kb| kb.action.clone())
            .collect();

        let mut added_count = 0;
        for default_kb in crate::defaults::keybindings() {
            if !existing_actions.contains(&default_kb.action) {
                log::info!(
                    "Adding new default keybinding: {} -> {}",
                    default_kb.key,
                    default_kb.action
                );
                self.keybindings.push(default_kb);
                added_count += 1;
            }
        }

        if added_count > 0 {
            log::info!(
                "Merged {} new default keybinding(s) into user config",
                added_count
            );
        }
    }

    /// Find the key combination bound to an action, if any.
    pub fn keybinding_for(&self, action: &str) -> Option<&str> {
        self.keybindings
            .iter()
            .find(|kb| kb.action == action)
            .map(|kb| kb.key.as_str())
    }
}
