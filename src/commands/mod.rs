//! Tauri IPC command handlers, organized by functional domain.
//!
//! - `blocker`: toggle gating, PIN challenges, status
//! - `blocklist`: blocked-site add/remove/list
//! - `rules`: explicit resync and URL match queries
//! - `state`: shared `AppState` definition

pub(crate) mod blocker;
pub(crate) mod blocklist;
pub(crate) mod rules;
mod state;

pub use state::AppState;
