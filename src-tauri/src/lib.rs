// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod intake;
pub mod generation;
pub mod commands;

use std::sync::Arc;
use tauri::Manager;
use tracing::{debug, info, warn};
use crate::commands::{
    generate_style, get_session, pick_image, remove_image, reset_session, select_image,
};

// Public exports for external consumers
pub use crate::core::{AppState, SelectedImage, Session, SessionSnapshot, Slot};
pub use crate::generation::{GeminiClient, GeminiConfig, ImageGenerator};
pub use crate::utils::{AppError, AppResult};

/// Builds the Tauri application and runs its event loop.
///
/// Expects the tracing subscriber to be installed by the caller.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            get_session,
            pick_image,
            select_image,
            remove_image,
            generate_style,
            reset_session,
        ])
        .setup(|app| {
            let config = GeminiConfig::from_env();
            if config.api_key.is_none() {
                warn!("GEMINI_API_KEY is not set; generation requests will fail");
            }

            app.manage(AppState::new(Arc::new(GeminiClient::new(config))));
            debug!("✓ AppState initialized");
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}
