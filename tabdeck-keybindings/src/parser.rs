//! Key combination parser.
//!
//! Parses human-readable key strings like "CmdOrCtrl+Shift+Tab" into KeyCombo structs.

use crate::key::NamedKey;
use crate::platform::parse_named_key;
use std::fmt;
use thiserror::Error;

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty key combination")]
    Empty,
    #[error("Multiple keys specified: already have key, found '{0}'")]
    MultipleKeys(String),
    #[error("Key combination ends with modifier, no key specified")]
    TrailingModifier,
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),
}

/// Set of active modifiers for a key combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
    /// If true, this represents CmdOrCtrl (Cmd on macOS, Ctrl elsewhere)
    pub cmd_or_ctrl: bool,
}

/// A parsed key combination (modifiers + key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.cmd_or_ctrl {
            parts.push("CmdOrCtrl".to_string());
        }
        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.super_key {
            parts.push("Super".to_string());
        }

        match &self.key {
            ParsedKey::Character(c) => parts.push(c.to_string()),
            ParsedKey::Named(n) => parts.push(format!("{:?}", n)),
        }

        write!(f, "{}", parts.join("+"))
    }
}

/// The actual key (either a character or a named key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A single character key (e.g., 'T', '1'), stored uppercased
    Character(char),
    /// A named key (e.g., Tab, F1, Enter)
    Named(NamedKey),
}

/// Parse a key combination string into a KeyCombo.
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `Super`, `Cmd`, `Command`, `Meta`, `Win` - Super/Cmd key
/// - `CmdOrCtrl` - Cmd on macOS, Ctrl on other platforms
///
/// Keys:
/// - Single characters: `T`, `W`, `1`, etc.
/// - Named keys: `F1`-`F12`, `Tab`, `Enter`, `Escape`, `Space`, etc.
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ParseError> {
    if s.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = s.split('+').map(str::trim).collect();

    let mut modifiers = Modifiers::default();
    let mut key_part = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;

        let is_modifier = match part.to_lowercase().as_str() {
            "ctrl" | "control" => {
                modifiers.ctrl = true;
                true
            }
            "alt" | "option" => {
                modifiers.alt = true;
                true
            }
            "shift" => {
                modifiers.shift = true;
                true
            }
            "super" | "cmd" | "command" | "meta" | "win" => {
                modifiers.super_key = true;
                true
            }
            "cmdorctrl" => {
                modifiers.cmd_or_ctrl = true;
                true
            }
            _ => false,
        };

        if !is_modifier {
            if key_part.is_some() {
                return Err(ParseError::MultipleKeys(part.to_string()));
            }
            key_part = Some(*part);
        } else if is_last {
            return Err(ParseError::TrailingModifier);
        }
    }

    let key_str = key_part.ok_or(ParseError::TrailingModifier)?;
    let key = parse_key(key_str)?;

    Ok(KeyCombo { modifiers, key })
}

/// Parse a key string into a ParsedKey.
fn parse_key(s: &str) -> Result<ParsedKey, ParseError> {
    if let Some(named) = parse_named_key(s) {
        return Ok(ParsedKey::Named(named));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(ParsedKey::Character(c.to_ascii_uppercase())),
        _ => Err(ParseError::UnknownKey(s.to_string())),
    }
}
