//! Tauri command handlers for the frontend.
//!
//! One command per user action. Each returns the new [`SessionSnapshot`]
//! and also emits it as [`SESSION_UPDATED`]:
//! - [`get_session`]: Current state, for the first render
//! - [`pick_image`]: Native picker, then intake
//! - [`select_image`]: Intake for a known path (drag and drop)
//! - [`remove_image`]: Clear one slot
//! - [`generate_style`]: Run the style transfer
//! - [`reset_session`]: Start over
//!
//! [`SessionSnapshot`]: crate::core::SessionSnapshot

mod events;
mod session;

pub use events::{SESSION_UPDATED, emit_session};
pub use session::*;
