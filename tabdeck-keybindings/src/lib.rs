//! Keybinding system for tabdeck.
//!
//! Runtime-configurable keyboard shortcuts defined in config.yaml.
//!
//! Features:
//! - Configurable key combinations (Ctrl+Shift+Tab, CmdOrCtrl+T, etc.)
//! - Platform-aware `CmdOrCtrl` modifier (Cmd on macOS, Ctrl elsewhere)
//! - Toolkit-neutral key events ([`KeyInput`])

pub mod key;
mod matcher;
pub mod parser;
pub mod platform;

pub use key::{Key, KeyInput, ModifierState, NamedKey};
pub use matcher::KeybindingMatcher;
pub use parser::{KeyCombo, ParseError, parse_key_combo};

use tabdeck_config::KeyBinding;

/// Registry of keybindings mapping key combinations to action names.
///
/// Bindings keep their config order. When two entries use the same combo the
/// later one replaces the earlier, so a user entry appended after the
/// defaults wins.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    bindings: Vec<(KeyCombo, String)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config keybindings.
    ///
    /// Invalid keybinding strings are logged and skipped.
    pub fn from_config(keybindings: &[KeyBinding]) -> Self {
        let mut registry = Self::new();
        for binding in keybindings {
            if let Err(e) = registry.bind(&binding.key, &binding.action) {
                log::warn!(
                    "Invalid keybinding '{}' for action '{}': {}",
                    binding.key,
                    binding.action,
                    e
                );
            }
        }
        log::info!(
            "Keybinding registry initialized with {} of {} bindings",
            registry.bindings.len(),
            keybindings.len()
        );
        registry
    }

    /// Bind `key` to `action`, replacing any action already on that combo.
    pub fn bind(&mut self, key: &str, action: &str) -> Result<(), ParseError> {
        let combo = parse_key_combo(key)?;
        log::debug!("Registered keybinding: {} -> {}", combo, action);

        match self.bindings.iter_mut().find(|(c, _)| *c == combo) {
            Some((_, existing)) => {
                log::debug!("Keybinding {} rebound from '{}' to '{}'", combo, existing, action);
                *existing = action.to_string();
            }
            None => self.bindings.push((combo, action.to_string())),
        }
        Ok(())
    }

    /// Look up the action bound to a key event.
    pub fn lookup(&self, input: &KeyInput) -> Option<&str> {
        let matcher = KeybindingMatcher::from_input(input);
        self.bindings
            .iter()
            .find(|(combo, _)| matcher.matches(combo))
            .map(|(_, action)| action.as_str())
    }

    /// Platform label for the combo bound to `action`, e.g. `Ctrl+Shift+Tab`.
    pub fn label_for(&self, action: &str) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, a)| a == action)
            .map(|(combo, _)| combo_label(combo))
    }

    /// Bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, &str)> {
        self.bindings.iter().map(|(c, a)| (c, a.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

/// Render a combo with `CmdOrCtrl` spelled as the current platform's modifier.
pub fn combo_label(combo: &KeyCombo) -> String {
    combo
        .to_string()
        .replace("CmdOrCtrl", platform::primary_modifier_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_keybinding_skipped() {
        let bindings = vec![
            KeyBinding {
                key: "InvalidKey".to_string(),
                action: "some_action".to_string(),
            },
            KeyBinding {
                key: "Ctrl+A".to_string(),
                action: "valid_action".to_string(),
            },
        ];

        let registry = KeybindingRegistry::from_config(&bindings);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rebinding_replaces_in_place() {
        let mut registry = KeybindingRegistry::new();
        registry.bind("Ctrl+K", "first").unwrap();
        registry.bind("Alt+K", "other").unwrap();
        registry.bind("ctrl+k", "second").unwrap();

        let actions: Vec<&str> = registry.iter().map(|(_, a)| a).collect();
        assert_eq!(actions, vec!["second", "other"]);
        assert!(registry.bind("Ctrl+", "broken").is_err());
    }

    #[test]
    fn label_uses_platform_modifier() {
        let mut registry = KeybindingRegistry::new();
        registry.bind("CmdOrCtrl+Shift+Tab", "prev").unwrap();

        let expected = if cfg!(target_os = "macos") {
            "Cmd+Shift+Tab"
        } else {
            "Ctrl+Shift+Tab"
        };
        assert_eq!(registry.label_for("prev").as_deref(), Some(expected));
        assert_eq!(registry.label_for("missing"), None);
    }
}
