//! Tauri command handlers for the nail style session.

use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tracing::debug;
use crate::commands::emit_session;
use crate::core::{AppState, SessionSnapshot, Slot};
use crate::utils::{AppResult, IntakeError, accepted_extensions};

/// Returns the current session without changing it.
#[tauri::command]
pub fn get_session(state: State<'_, AppState>) -> SessionSnapshot {
    state.snapshot()
}

/// Opens the native file picker for `slot` and loads the chosen file.
///
/// The picker is filtered to PNG, JPEG and WEBP. Cancelling leaves the
/// slot untouched.
#[tauri::command]
pub async fn pick_image(
    app: AppHandle,
    state: State<'_, AppState>,
    slot: Slot,
) -> AppResult<SessionSnapshot> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .set_title(slot.title())
        .add_filter("Images", &accepted_extensions())
        .pick_file(move |file| {
            forward_pick(tx, file, slot);
        });

    let picked = rx.await.map_err(|e| IntakeError::Picker(e.to_string()))?;
    let Some(file) = picked else {
        debug!("Picker for {} slot cancelled", slot);
        return Ok(state.snapshot());
    };
    let path = file
        .into_path()
        .map_err(|e| IntakeError::Picker(e.to_string()))?;

    let snapshot = state.load_image(slot, path).await;
    emit_session(&app, &snapshot);
    Ok(snapshot)
}

/// Hands the picker's answer back to the waiting command. Returns whether
/// anyone was still listening.
fn forward_pick<T>(tx: tokio::sync::oneshot::Sender<T>, picked: T, slot: Slot) -> bool {
    let delivered = tx.send(picked).is_ok();
    if !delivered {
        debug!("Picked file dropped: pick_image for {} slot no longer waiting", slot);
    }
    delivered
}

/// Loads the file at `path` into `slot`, replacing whatever was there.
///
/// # Arguments
/// * `slot` - `"destination"` (model's hand) or `"source"` (nail design)
/// * `path` - Absolute path of the image file
///
/// # Returns
/// The new session. An unreadable file leaves the slot empty.
#[tauri::command]
pub async fn select_image(
    app: AppHandle,
    state: State<'_, AppState>,
    slot: Slot,
    path: String,
) -> AppResult<SessionSnapshot> {
    debug!("Received select_image command for {} slot", slot);
    let snapshot = state.load_image(slot, &path).await;
    emit_session(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub fn remove_image(app: AppHandle, state: State<'_, AppState>, slot: Slot) -> SessionSnapshot {
    let snapshot = state.remove_image(slot);
    emit_session(&app, &snapshot);
    snapshot
}

/// Sends both images to the generator and waits for the result.
///
/// # Events Emitted
/// * `session-updated` - once when loading starts, once on completion
///
/// # Errors
/// `Busy` if a generation is already running. Missing images and failed
/// generations are reported through the snapshot's `error` field instead.
#[tauri::command]
pub async fn generate_style(
    app: AppHandle,
    state: State<'_, AppState>,
) -> AppResult<SessionSnapshot> {
    debug!("Received generate_style command");
    let emitter = app.clone();
    let snapshot = state
        .generate(move |loading| emit_session(&emitter, loading))
        .await?;

    emit_session(&app, &snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub fn reset_session(app: AppHandle, state: State<'_, AppState>) -> SessionSnapshot {
    let snapshot = state.reset();
    emit_session(&app, &snapshot);
    snapshot
}
