//! Toolkit-neutral key event types.
//!
//! The presentation layer translates whatever its windowing toolkit delivers
//! into a [`KeyInput`] before asking the registry for an action.

/// Non-character keys that can be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Space,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

/// The logical key of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Named(NamedKey),
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierState {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Cmd on macOS, Windows key elsewhere
    pub super_key: bool,
}

impl ModifierState {
    /// State with only the platform's primary modifier held (Cmd on macOS, Ctrl elsewhere).
    pub fn primary() -> Self {
        let (ctrl, super_key) = crate::platform::resolve_cmd_or_ctrl(true, false, false);
        Self {
            ctrl,
            super_key,
            ..Self::default()
        }
    }

    /// Add Shift to this modifier state.
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// A single key press as seen by the keybinding system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: ModifierState,
}

impl KeyInput {
    pub fn character(ch: char, modifiers: ModifierState) -> Self {
        Self {
            key: Key::Character(ch),
            modifiers,
        }
    }

    pub fn named(key: NamedKey, modifiers: ModifierState) -> Self {
        Self {
            key: Key::Named(key),
            modifiers,
        }
    }
}
