use tauri::{AppHandle, Emitter};
use tracing::warn;
use crate::core::SessionSnapshot;

/// Emitted with a [`SessionSnapshot`] after every state change.
pub const SESSION_UPDATED: &str = "session-updated";

pub fn emit_session(app: &AppHandle, snapshot: &SessionSnapshot) {
    if let Err(e) = app.emit(SESSION_UPDATED, snapshot) {
        warn!("Failed to emit {}: {}", SESSION_UPDATED, e);
    }
}
