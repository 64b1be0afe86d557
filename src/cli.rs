//! Command-line interface for tabdeck.
//!
//! Inspects and drives the persisted tab state without a UI: list the saved
//! tabs, feed a JSON [`TabCommand`] through the router, toggle persistence.

use crate::router::{EventRouter, ShortcutMap, TabCommand};
use crate::session::TabPersistence;
use crate::session::storage::FileStore;
use crate::tab::TabStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;
use tabdeck_config::{Config, LogLevel};

/// tabdeck - tab orchestration for the workspace shell
#[derive(Parser, Debug)]
#[command(name = "tabdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/tabdeck/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Tab state file to use instead of the configured one
    #[arg(long, value_name = "PATH", global = true)]
    pub state_file: Option<PathBuf>,

    /// Log level for the debug log (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level, global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the saved tabs in display order
    List,

    /// Apply one tab command given as JSON, e.g. '{"type": "create-chat-tab"}'
    Dispatch {
        /// Command JSON
        json: String,
    },

    /// Show or change whether tabs are saved between launches
    Persistence {
        #[arg(value_enum)]
        action: PersistenceAction,
    },

    /// Close every tab and clear the saved snapshot
    Clear,

    /// List the configured tab shortcuts
    Shortcuts,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistenceAction {
    On,
    Off,
    Status,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(value).ok_or_else(|| {
        format!("invalid log level '{value}' (expected off, error, warn, info, debug or trace)")
    })
}

/// Run a parsed command line against the on-disk tab state.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    crate::debug::apply_config_level(config.log_level);

    if let Commands::Shortcuts = cli.command {
        for (label, action) in ShortcutMap::new(&config.keybindings).describe() {
            println!("{label:<24} {action}");
        }
        return Ok(());
    }

    let state_path = cli
        .state_file
        .clone()
        .unwrap_or_else(|| config.state_file_path());
    log::info!("Using tab state file {:?}", state_path);

    let persistence = TabPersistence::new(FileStore::open_or_reset(state_path), &config.namespace);
    let mut store = TabStore::restore(persistence, config.effective_max_tabs());

    match cli.command {
        Commands::List => print!("{}", format_tab_list(&store)),
        Commands::Dispatch { json } => {
            let command: TabCommand =
                serde_json::from_str(&json).context("Invalid tab command JSON")?;
            EventRouter::dispatch(&mut store, command);
            print!("{}", format_tab_list(&store));
        }
        Commands::Persistence { action } => {
            match action {
                PersistenceAction::On => store.set_persistence_enabled(true),
                PersistenceAction::Off => store.set_persistence_enabled(false),
                PersistenceAction::Status => {}
            }
            println!(
                "Tab persistence: {}",
                if store.persistence_enabled() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
        Commands::Clear => {
            store.close_all_tabs();
            println!("Cleared saved tabs");
        }
        Commands::Shortcuts => {}
    }

    Ok(())
}

/// One line per tab, the active tab marked with `*`.
pub fn format_tab_list(store: &TabStore) -> String {
    if store.tab_count() == 0 {
        return "No open tabs\n".to_string();
    }

    let active = store.active_tab_id();
    let mut out = String::new();
    for tab in store.tabs() {
        let marker = if Some(&tab.id) == active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>2}  {:<16} {:<24} {}",
            tab.order, tab.tab_type, tab.title, tab.id
        );
    }
    out
}
