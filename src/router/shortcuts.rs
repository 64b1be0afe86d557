//! Keyboard shortcuts for tab navigation.
//!
//! Key combinations come from the `keybindings` section of the config and are
//! resolved through [`KeybindingRegistry`]; the resulting action name is then
//! mapped onto a [`TabCommand`].

use super::TabCommand;
use tabdeck_config::KeyBinding;
use tabdeck_keybindings::{KeyInput, KeybindingRegistry, combo_label};

/// Maps key input to tab commands.
#[derive(Debug, Default)]
pub struct ShortcutMap {
    registry: KeybindingRegistry,
}

impl ShortcutMap {
    pub fn new(keybindings: &[KeyBinding]) -> Self {
        Self {
            registry: KeybindingRegistry::from_config(keybindings),
        }
    }

    /// Command bound to a key press, if any.
    pub fn resolve(&self, input: &KeyInput) -> Option<TabCommand> {
        let action = self.registry.lookup(input)?;
        let command = command_for_action(action);
        if command.is_none() {
            log::debug!("Shortcut action '{}' is not a tab command", action);
        }
        command
    }

    /// `(label, action)` for every binding that drives a tab command, in config order.
    pub fn describe(&self) -> Vec<(String, String)> {
        self.registry
            .iter()
            .filter(|(_, action)| command_for_action(action).is_some())
            .map(|(combo, action)| (combo_label(combo), action.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Translate a keybinding action name into a tab command.
///
/// `switch_to_tab_N` uses 1-based numbering as printed on the keys and maps to
/// index `N - 1`.
pub fn command_for_action(action: &str) -> Option<TabCommand> {
    match action {
        "create_chat_tab" | "new_tab" => Some(TabCommand::CreateChatTab),
        "close_current_tab" | "close_tab" => Some(TabCommand::CloseCurrentTab),
        "switch_to_next_tab" | "next_tab" => Some(TabCommand::SwitchToNextTab),
        "switch_to_previous_tab" | "prev_tab" => Some(TabCommand::SwitchToPreviousTab),
        _ => {
            let n: usize = action.strip_prefix("switch_to_tab_")?.parse().ok()?;
            (1..=9)
                .contains(&n)
                .then(|| TabCommand::SwitchToTabByIndex { index: n - 1 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabdeck_keybindings::{ModifierState, NamedKey};

    fn defaults() -> ShortcutMap {
        ShortcutMap::new(&tabdeck_config::Config::default().keybindings)
    }

    #[test]
    fn action_names() {
        assert_eq!(
            command_for_action("create_chat_tab"),
            Some(TabCommand::CreateChatTab)
        );
        assert_eq!(
            command_for_action("switch_to_tab_1"),
            Some(TabCommand::SwitchToTabByIndex { index: 0 })
        );
        assert_eq!(
            command_for_action("switch_to_tab_9"),
            Some(TabCommand::SwitchToTabByIndex { index: 8 })
        );
        assert_eq!(command_for_action("switch_to_tab_0"), None);
        assert_eq!(command_for_action("switch_to_tab_10"), None);
        assert_eq!(command_for_action("toggle_fullscreen"), None);
    }

    #[test]
    fn default_shortcuts_resolve() {
        let map = defaults();
        assert_eq!(map.len(), 13);

        let primary = ModifierState::primary();
        assert_eq!(
            map.resolve(&KeyInput::character('t', primary)),
            Some(TabCommand::CreateChatTab)
        );
        assert_eq!(
            map.resolve(&KeyInput::character('w', primary)),
            Some(TabCommand::CloseCurrentTab)
        );
        assert_eq!(
            map.resolve(&KeyInput::named(NamedKey::Tab, primary)),
            Some(TabCommand::SwitchToNextTab)
        );
        assert_eq!(
            map.resolve(&KeyInput::named(NamedKey::Tab, primary.with_shift())),
            Some(TabCommand::SwitchToPreviousTab)
        );
        assert_eq!(
            map.resolve(&KeyInput::character('3', primary)),
            Some(TabCommand::SwitchToTabByIndex { index: 2 })
        );
    }

    #[test]
    fn describe_skips_foreign_actions() {
        let map = ShortcutMap::new(&[
            KeyBinding {
                key: "CmdOrCtrl+T".to_string(),
                action: "create_chat_tab".to_string(),
            },
            KeyBinding {
                key: "F11".to_string(),
                action: "toggle_fullscreen".to_string(),
            },
        ]);
        let described = map.describe();
        assert_eq!(described.len(), 1);
        assert_eq!(described[0].1, "create_chat_tab");
        assert!(described[0].0.ends_with("+T"));
    }

    #[test]
    fn unbound_and_non_tab_actions_resolve_to_none() {
        let map = ShortcutMap::new(&[KeyBinding {
            key: "Ctrl+Shift+F".to_string(),
            action: "toggle_fullscreen".to_string(),
        }]);
        let ctrl_shift = ModifierState {
            ctrl: true,
            shift: true,
            ..ModifierState::default()
        };
        assert_eq!(map.resolve(&KeyInput::character('f', ctrl_shift)), None);
        assert_eq!(
            map.resolve(&KeyInput::character('t', ModifierState::primary())),
            None
        );
    }
}
