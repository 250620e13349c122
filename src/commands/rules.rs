//! Explicit rule resync and URL match queries (UPDATE_RULES).

use tauri::State;

use crate::error::AppError;
use crate::sync::{self, SyncSummary};

use super::state::AppState;

/// Rebuild the engine's installed rules from persisted state.
///
/// The frontend fires this on demand; startup and every mutating command
/// already resync on their own.
#[tauri::command]
pub async fn update_rules(state: State<'_, AppState>) -> Result<SyncSummary, AppError> {
    let _gate = state.gate.lock().await;
    sync::sync_rules(&state.database, state.engine.as_ref()).await
}

/// Whether an installed block rule matches the given URL. The webview layer
/// consults this before letting a navigation through.
#[tauri::command]
pub async fn is_url_blocked(state: State<'_, AppState>, url: String) -> Result<bool, AppError> {
    Ok(state.engine.blocks(&url))
}
