// Library exports for testing and embedding in a UI shell
//
// # Threading
//
// The tab store is single-writer: it lives on the event-loop thread and is
// handed to the router by `&mut`. Publishers on other threads or tasks talk to
// it only through `router::CommandBus`. Storage backends use `parking_lot::Mutex`
// for their sync-only internal state.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod router;
pub mod session;
pub mod tab;

pub use router::{CommandBus, EventRouter, ShortcutMap, TabCommand};
pub use session::TabPersistence;
pub use tab::{CloseOutcome, Tab, TabId, TabStatus, TabStore, TabType, TabUpdate, TabsView};
pub use tabdeck_config::MAX_TABS;
