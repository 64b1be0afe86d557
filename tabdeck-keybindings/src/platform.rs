//! Platform-specific keybinding resolution.
//!
//! Contains:
//! - `cmd_or_ctrl` modifier expansion (Cmd on macOS, Ctrl elsewhere)
//! - Named key alias table (string → [`NamedKey`])

use crate::key::NamedKey;

/// Resolve the `CmdOrCtrl` modifier for the current platform.
///
/// Returns `(expected_ctrl, expected_super)` given a `cmd_or_ctrl` flag and the
/// raw `ctrl`/`super_key` values from the parsed combo.
///
/// - macOS: `CmdOrCtrl` maps to Super (Cmd key).
/// - All other platforms: `CmdOrCtrl` maps to Ctrl.
#[inline]
pub fn resolve_cmd_or_ctrl(cmd_or_ctrl: bool, ctrl: bool, super_key: bool) -> (bool, bool) {
    if cmd_or_ctrl {
        #[cfg(target_os = "macos")]
        {
            (ctrl, true) // CmdOrCtrl -> Super on macOS
        }
        #[cfg(not(target_os = "macos"))]
        {
            (true, super_key) // CmdOrCtrl -> Ctrl on other platforms
        }
    } else {
        (ctrl, super_key)
    }
}

/// Display label of the platform's primary modifier, for menus and tooltips.
pub fn primary_modifier_label() -> &'static str {
    if cfg!(target_os = "macos") { "Cmd" } else { "Ctrl" }
}

/// Parse a named key string into a [`NamedKey`].
///
/// Accepts human-readable aliases such as `"Enter"`, `"Return"`, `"Esc"`,
/// `"PgUp"`, arrow keys, and function keys F1–F12. Matching is
/// case-insensitive. Returns `None` for unrecognised strings.
pub fn parse_named_key(s: &str) -> Option<NamedKey> {
    let lower = s.to_ascii_lowercase();
    if let Some(key) = function_key(&lower) {
        return Some(key);
    }

    let key = match lower.as_str() {
        "enter" | "return" => NamedKey::Enter,
        "escape" | "esc" => NamedKey::Escape,
        "space" => NamedKey::Space,
        "tab" => NamedKey::Tab,
        "backspace" => NamedKey::Backspace,
        "delete" | "del" => NamedKey::Delete,
        "home" => NamedKey::Home,
        "end" => NamedKey::End,
        "pageup" | "pgup" => NamedKey::PageUp,
        "pagedown" | "pgdn" => NamedKey::PageDown,
        "up" | "arrowup" => NamedKey::ArrowUp,
        "down" | "arrowdown" => NamedKey::ArrowDown,
        "left" | "arrowleft" => NamedKey::ArrowLeft,
        "right" | "arrowright" => NamedKey::ArrowRight,
        _ => return None,
    };
    Some(key)
}

/// `f1` .. `f12`
fn function_key(lower: &str) -> Option<NamedKey> {
    const KEYS: [NamedKey; 12] = [
        NamedKey::F1,
        NamedKey::F2,
        NamedKey::F3,
        NamedKey::F4,
        NamedKey::F5,
        NamedKey::F6,
        NamedKey::F7,
        NamedKey::F8,
        NamedKey::F9,
        NamedKey::F10,
        NamedKey::F11,
        NamedKey::F12,
    ];
    let n: usize = lower.strip_prefix('f')?.parse().ok()?;
    KEYS.get(n.checked_sub(1)?).copied()
}
