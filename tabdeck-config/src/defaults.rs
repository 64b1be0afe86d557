//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields, so a partial YAML file still deserializes.

use crate::types::{KeyBinding, LogLevel};

pub fn namespace() -> String {
    "tabdeck".to_string()
}

pub fn max_tabs() -> usize {
    crate::MAX_TABS
}

pub fn log_level() -> LogLevel {
    LogLevel::Info
}

/// Default tab shortcuts.
///
/// `CmdOrCtrl` resolves to Cmd on macOS and Ctrl elsewhere, so one table
/// serves every platform.
pub fn keybindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding {
            key: "CmdOrCtrl+T".to_string(),
            action: "create_chat_tab".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+W".to_string(),
            action: "close_current_tab".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+Tab".to_string(),
            action: "switch_to_next_tab".to_string(),
        },
        KeyBinding {
            key: "CmdOrCtrl+Shift+Tab".to_string(),
            action: "switch_to_previous_tab".to_string(),
        },
    ];

    // CmdOrCtrl+1 .. CmdOrCtrl+9 jump straight to a tab position
    bindings.extend((1..=9).map(|n| KeyBinding {
        key: format!("CmdOrCtrl+{n}"),
        action: format!("switch_to_tab_{n}"),
    }));

    bindings
}
