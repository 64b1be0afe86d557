//! Key event matching.
//!
//! Matches [`KeyInput`] events against parsed [`KeyCombo`]s.

use crate::key::{Key, KeyInput};
use crate::parser::{KeyCombo, Modifiers, ParsedKey};
use crate::platform::resolve_cmd_or_ctrl;

/// Matcher for comparing key events against keybindings.
#[derive(Debug)]
pub struct KeybindingMatcher {
    /// Active modifiers from the event
    modifiers: Modifiers,
    /// The logical key from the event, characters uppercased
    key: Key,
}

impl KeybindingMatcher {
    /// Create a matcher from a key event.
    pub fn from_input(input: &KeyInput) -> Self {
        let mods = Modifiers {
            ctrl: input.modifiers.ctrl,
            alt: input.modifiers.alt,
            shift: input.modifiers.shift,
            super_key: input.modifiers.super_key,
            cmd_or_ctrl: false, // Resolved during matching
        };

        let key = match input.key {
            Key::Character(ch) => Key::Character(ch.to_ascii_uppercase()),
            named => named,
        };

        Self {
            modifiers: mods,
            key,
        }
    }

    /// Check if this event matches the given key combo.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        let key_matches = match (&combo.key, &self.key) {
            (ParsedKey::Character(combo_char), Key::Character(event_char)) => {
                event_char.eq_ignore_ascii_case(combo_char)
            }
            (ParsedKey::Named(combo_named), Key::Named(event_named)) => combo_named == event_named,
            _ => false,
        };

        key_matches && self.modifiers_match(&combo.modifiers)
    }

    /// Check if modifiers match, handling CmdOrCtrl specially.
    fn modifiers_match(&self, combo_mods: &Modifiers) -> bool {
        let (expected_ctrl, expected_super) =
            resolve_cmd_or_ctrl(combo_mods.cmd_or_ctrl, combo_mods.ctrl, combo_mods.super_key);

        self.modifiers.ctrl == expected_ctrl
            && self.modifiers.alt == combo_mods.alt
            && self.modifiers.shift == combo_mods.shift
            && self.modifiers.super_key == expected_super
    }
}
