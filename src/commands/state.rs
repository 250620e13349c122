//! Shared application state managed by Tauri.

use std::sync::Arc;

use crate::core::GateState;
use crate::db::Database;
use crate::engine::memory::MemoryRuleEngine;

/// Shared application state managed by Tauri.
pub struct AppState {
    pub database: Arc<Database>,
    pub engine: Arc<MemoryRuleEngine>,
    /// Live gate position. The async mutex also serializes all mutating
    /// commands: each one persists and resyncs to completion before the
    /// next begins (single logical writer).
    pub gate: tokio::sync::Mutex<GateState>,
}
