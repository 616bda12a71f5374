//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Application state managed by Tauri
//! - [`Session`]: The state controller for one user flow
//! - [`SelectedImage`]: An encoded image held in a [`Slot`]
//! - [`SessionSnapshot`]: What the webview renders

mod session;
mod state;
mod types;

pub use session::{
    GENERATION_FAILED_MESSAGE, GenerationTicket, MISSING_IMAGES_MESSAGE, Resolution, Session,
};
pub use state::AppState;
pub use types::{SelectedImage, SessionSnapshot, Slot};
