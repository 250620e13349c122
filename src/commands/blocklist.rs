//! Blocked-site add/remove/list commands.
//!
//! Raw input is normalized before it touches storage; every successful edit
//! triggers a full rule resync. The updated list is returned so the UI can
//! re-render without a second round trip.

use tauri::State;

use crate::core::domain::normalize_domain;
use crate::error::AppError;
use crate::sync;

use super::state::AppState;

#[tauri::command]
pub async fn add_blocked_site(
    state: State<'_, AppState>,
    site: String,
) -> Result<Vec<String>, AppError> {
    add_site(&state, &site).await
}

#[tauri::command]
pub async fn remove_blocked_site(
    state: State<'_, AppState>,
    domain: String,
) -> Result<Vec<String>, AppError> {
    remove_site(&state, &domain).await
}

#[tauri::command]
pub async fn get_blocked_sites(state: State<'_, AppState>) -> Result<Vec<String>, AppError> {
    state
        .database
        .blocked_domains()
        .map_err(|e| AppError::Storage(e.to_string()))
}

/// Normalize, insert, and resync for one new blocklist entry.
async fn add_site(state: &AppState, site: &str) -> Result<Vec<String>, AppError> {
    let Some(domain) = normalize_domain(site) else {
        return Err(AppError::InvalidInput(
            "Invalid site format. Use domain.com".into(),
        ));
    };

    let _gate = state.gate.lock().await;

    let added = state
        .database
        .add_domain(&domain)
        .map_err(|e| AppError::Storage(e.to_string()))?;
    if !added {
        return Err(AppError::InvalidInput(format!(
            "\"{domain}\" is already blocked"
        )));
    }
    tracing::info!("Blocked site added: {domain}");

    sync::sync_rules(&state.database, state.engine.as_ref()).await?;
    state
        .database
        .blocked_domains()
        .map_err(|e| AppError::Storage(e.to_string()))
}

/// Delete an entry and resync. Removal of an unlisted domain still resyncs.
async fn remove_site(state: &AppState, domain: &str) -> Result<Vec<String>, AppError> {
    let _gate = state.gate.lock().await;

    let removed = state
        .database
        .remove_domain(domain)
        .map_err(|e| AppError::Storage(e.to_string()))?;
    if removed {
        tracing::info!("Blocked site removed: {domain}");
    } else {
        tracing::warn!("Requested removal of unlisted site: {domain}");
    }

    sync::sync_rules(&state.database, state.engine.as_ref()).await?;
    state
        .database
        .blocked_domains()
        .map_err(|e| AppError::Storage(e.to_string()))
}
