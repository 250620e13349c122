mod commands;
mod config;
mod core;
mod db;
mod engine;
mod error;
mod sync;

use std::sync::Arc;

use tauri::{
    menu::{Menu, MenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    Manager,
};

use commands::AppState;
use engine::memory::MemoryRuleEngine;

use crate::core::gating::GateState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("PANIC in FocusGuard: {info}");
        default_hook(info);
    }));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "focusguard=info".into()),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            commands::blocker::get_blocker_status,
            commands::blocker::request_toggle,
            commands::blocker::submit_pin,
            commands::blocker::cancel_pin,
            commands::blocklist::add_blocked_site,
            commands::blocklist::remove_blocked_site,
            commands::blocklist::get_blocked_sites,
            commands::rules::update_rules,
            commands::rules::is_url_blocked,
        ])
        .setup(move |app| {
            let app_data_dir = app.path().app_data_dir().expect("failed to resolve app data dir");
            std::fs::create_dir_all(&app_data_dir)?;
            let db_path = app_data_dir.join("focusguard.db");
            let database =
                Arc::new(db::Database::open(&db_path).expect("Failed to open SQLite database"));
            tracing::info!("Database opened at {}", db_path.display());

            let engine = Arc::new(MemoryRuleEngine::new());
            let initial_gate = GateState::from_enabled(
                database
                    .blocker_enabled()
                    .unwrap_or(config::DEFAULT_BLOCKER_ENABLED),
            );

            app.manage(AppState {
                database: Arc::clone(&database),
                engine: Arc::clone(&engine),
                gate: tokio::sync::Mutex::new(initial_gate),
            });

            // The engine's filter table is empty on every launch; rebuild it
            // from persisted state so blocking survives restarts.
            let startup_db = Arc::clone(&database);
            let startup_engine = Arc::clone(&engine);
            tauri::async_runtime::spawn(async move {
                match sync::sync_rules(&startup_db, startup_engine.as_ref()).await {
                    Ok(summary) => tracing::info!(
                        "Startup sync: {} rule(s) installed (blocker {})",
                        summary.added,
                        if summary.enabled { "enabled" } else { "disabled" }
                    ),
                    Err(e) => tracing::warn!("Startup rule sync failed: {e}"),
                }
            });

            // --- System Tray ---
            let show_item = MenuItem::with_id(app, "show", "Show FocusGuard", true, None::<&str>)?;
            let quit_item = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
            let menu = Menu::with_items(app, &[&show_item, &quit_item])?;

            let _tray = TrayIconBuilder::with_id("main")
                .icon(app.default_window_icon().cloned().unwrap())
                .tooltip("FocusGuard")
                .menu(&menu)
                .show_menu_on_left_click(false)
                .on_menu_event(|app, event| match event.id().as_ref() {
                    "show" => {
                        if let Some(window) = app.get_webview_window("main") {
                            let _ = window.show();
                            let _ = window.unminimize();
                            let _ = window.set_focus();
                        }
                    }
                    "quit" => app.exit(0),
                    _ => {}
                })
                .on_tray_icon_event(|tray, event| {
                    if let TrayIconEvent::Click {
                        button: MouseButton::Left,
                        button_state: MouseButtonState::Up,
                        ..
                    } = event
                    {
                        let app = tray.app_handle();
                        if let Some(window) = app.get_webview_window("main") {
                            let _ = window.show();
                            let _ = window.unminimize();
                            let _ = window.set_focus();
                        }
                    }
                })
                .build(app)?;

            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::CloseRequested { api, .. } = event {
                api.prevent_close();
                let _ = window.hide();
            }
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
