//! Blocker toggle, PIN challenge, and status commands.
//!
//! The toggle protocol lives in `core::gating`; this layer drives it: hold
//! the gate lock, compute the transition, persist its effect, resync rules,
//! and hand the UI a fresh status snapshot to render.

use serde::Serialize;
use tauri::State;

use crate::core::gating;
use crate::core::{GateEffect, GateRequest, GateState};
use crate::error::AppError;
use crate::sync;

use super::state::AppState;

/// Snapshot of blocker state for the UI.
#[derive(Debug, Clone, Serialize)]
pub struct BlockerStatus {
    pub enabled: bool,
    pub pin_set: bool,
    pub gate: GateState,
    pub blocked_count: usize,
}

#[tauri::command]
pub async fn get_blocker_status(state: State<'_, AppState>) -> Result<BlockerStatus, AppError> {
    let gate = state.gate.lock().await;
    status_snapshot(&state, *gate)
}

/// The gating entry point for the UI toggle (TOGGLE_BLOCKER).
///
/// Depending on stored state this either flips the blocker directly or
/// opens a PIN challenge; the returned status tells the UI which.
#[tauri::command]
pub async fn request_toggle(
    state: State<'_, AppState>,
    enabled: bool,
) -> Result<BlockerStatus, AppError> {
    tracing::info!("Toggle requested: enabled={enabled}");
    let request = if enabled {
        GateRequest::Enable
    } else {
        GateRequest::Disable
    };
    drive_gate(&state, request).await
}

/// Resolve an open PIN challenge with the submitted digits.
#[tauri::command]
pub async fn submit_pin(state: State<'_, AppState>, pin: String) -> Result<BlockerStatus, AppError> {
    drive_gate(&state, GateRequest::SubmitPin(pin)).await
}

/// Abandon an open PIN challenge, reverting to the persisted toggle state.
#[tauri::command]
pub async fn cancel_pin(state: State<'_, AppState>) -> Result<BlockerStatus, AppError> {
    drive_gate(&state, GateRequest::Cancel).await
}

/// Run one gate transition to completion: persist, resync, advance.
async fn drive_gate(state: &AppState, request: GateRequest) -> Result<BlockerStatus, AppError> {
    let mut gate = state.gate.lock().await;

    let stored_digest = state
        .database
        .pin_digest()
        .map_err(|e| AppError::Storage(e.to_string()))?;
    let transition = gating::transition(*gate, &request, stored_digest.as_deref())?;

    match &transition.effect {
        GateEffect::None => {
            *gate = transition.next;
        }
        GateEffect::Persist {
            enabled,
            new_pin_digest,
        } => {
            state
                .database
                .apply_gate_effect(*enabled, new_pin_digest.as_deref())
                .map_err(|e| AppError::Storage(e.to_string()))?;
            // Persisted state is now the source of truth; the gate advances
            // even if the resync below fails (the next trigger rebuilds).
            *gate = transition.next;
            tracing::info!(
                "Blocker {}",
                if *enabled { "enabled" } else { "disabled" }
            );
            sync::sync_rules(&state.database, state.engine.as_ref()).await?;
        }
    }

    status_snapshot(state, *gate)
}

fn status_snapshot(state: &AppState, gate: GateState) -> Result<BlockerStatus, AppError> {
    let enabled = state
        .database
        .blocker_enabled()
        .map_err(|e| AppError::Storage(e.to_string()))?;
    let pin_set = state
        .database
        .pin_digest()
        .map_err(|e| AppError::Storage(e.to_string()))?
        .is_some();
    let blocked_count = state
        .database
        .blocked_domains()
        .map_err(|e| AppError::Storage(e.to_string()))?
        .len();
    Ok(BlockerStatus {
        enabled,
        pin_set,
        gate,
        blocked_count,
    })
}
