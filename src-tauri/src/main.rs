// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// This is the primary entry point for the Nail Style AI application.
// The Tauri builder lives in lib.rs next to the commands it registers.

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nail_style_ai_lib=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact()                // Use compact formatter instead of pretty
        .init();

    info!("=== Application Starting ===");
    nail_style_ai_lib::run();
}
