//! The session state controller.
//!
//! Holds both image slots, the generated output, the loading flag and the
//! error message. Every mutation goes through one method per user action.
//! A generation is split into [`Session::begin_generation`] and
//! [`Session::finish_generation`] so the caller can release the lock while
//! the remote call is in flight.

use tracing::{debug, error};
use crate::core::{SelectedImage, SessionSnapshot, Slot};
use crate::utils::{GenerationError, SessionError};

/// Shown when generate is triggered with a slot empty.
pub const MISSING_IMAGES_MESSAGE: &str =
    "Please upload both a model hand image and a nail design image.";

/// Shown for any failed generation, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate image. Please try again.";

/// Inputs captured for one generation call.
///
/// The token ties the eventual result back to the session state it was
/// started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub token: u64,
    pub destination: String,
    pub source: String,
}

/// What happened to a finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Succeeded,
    Failed,
    /// Reset or re-selection happened after the call started
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    destination_image: Option<SelectedImage>,
    source_image: Option<SelectedImage>,
    generated_image: Option<String>,
    is_loading: bool,
    error: Option<String>,
    /// Bumped whenever in-flight results must be ignored
    generation: u64,
    /// Per-slot counterpart of `generation` for pending file loads
    destination_intake: u64,
    source_intake: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self, slot: Slot) -> Option<&SelectedImage> {
        match slot {
            Slot::Destination => self.destination_image.as_ref(),
            Slot::Source => self.source_image.as_ref(),
        }
    }

    pub fn generated_image(&self) -> Option<&str> {
        self.generated_image.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start loading a file into `slot`; any earlier pending load for the
    /// slot is abandoned.
    pub fn begin_intake(&mut self, slot: Slot) -> u64 {
        let token = self.intake_token(slot);
        *token += 1;
        *token
    }

    /// Apply a finished load if nothing touched the slot since `token` was
    /// taken. Returns whether the image was stored.
    pub fn finish_intake(&mut self, slot: Slot, token: u64, image: Option<SelectedImage>) -> bool {
        if *self.intake_token(slot) != token {
            debug!("Discarding stale load {} for {} slot", token, slot);
            return false;
        }
        self.set_image(slot, image);
        true
    }

    /// Replace a slot wholesale. `None` clears it.
    ///
    /// Changing the inputs while a generation is in flight abandons that
    /// generation: its result will be discarded.
    pub fn set_image(&mut self, slot: Slot, image: Option<SelectedImage>) {
        debug!(
            "Setting {} slot to {}",
            slot,
            image.as_ref().map(|i| i.file_name.as_str()).unwrap_or("<empty>")
        );
        if self.is_loading {
            self.invalidate_in_flight();
        }
        *self.intake_token(slot) += 1;
        match slot {
            Slot::Destination => self.destination_image = image,
            Slot::Source => self.source_image = image,
        }
    }

    pub fn remove_image(&mut self, slot: Slot) {
        self.set_image(slot, None);
    }

    /// Validate inputs and enter the loading state.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, SessionError> {
        let (destination, source) = match (&self.destination_image, &self.source_image) {
            (Some(d), Some(s)) => (d.data_url.clone(), s.data_url.clone()),
            _ => {
                self.error = Some(MISSING_IMAGES_MESSAGE.to_string());
                return Err(SessionError::MissingImages);
            }
        };

        if self.is_loading {
            return Err(SessionError::Busy);
        }

        self.error = None;
        self.generated_image = None;
        self.is_loading = true;
        self.generation += 1;

        debug!("Generation {} started", self.generation);
        Ok(GenerationTicket {
            token: self.generation,
            destination,
            source,
        })
    }

    /// Apply the outcome of the call started with `token`.
    pub fn finish_generation(
        &mut self,
        token: u64,
        result: Result<String, GenerationError>,
    ) -> Resolution {
        if token != self.generation || !self.is_loading {
            debug!(
                "Discarding stale result of generation {} (current {})",
                token, self.generation
            );
            return Resolution::Stale;
        }

        self.is_loading = false;
        match result {
            Ok(image) => {
                debug!("Generation {} succeeded", token);
                self.generated_image = Some(image);
                self.error = None;
                Resolution::Succeeded
            }
            Err(e) => {
                error!("Generation {} failed: {}", token, e);
                self.generated_image = None;
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                Resolution::Failed
            }
        }
    }

    /// Return to the initial state. Idempotent.
    pub fn reset(&mut self) {
        debug!("Resetting session");
        self.destination_image = None;
        self.source_image = None;
        self.generated_image = None;
        self.error = None;
        self.destination_intake += 1;
        self.source_intake += 1;
        self.invalidate_in_flight();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let both = self.destination_image.is_some() && self.source_image.is_some();
        SessionSnapshot {
            destination_image: self.destination_image.clone(),
            source_image: self.source_image.clone(),
            generated_image: self.generated_image.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
            can_generate: both && !self.is_loading,
            can_reset: self.destination_image.is_some()
                || self.source_image.is_some()
                || self.generated_image.is_some(),
        }
    }

    fn intake_token(&mut self, slot: Slot) -> &mut u64 {
        match slot {
            Slot::Destination => &mut self.destination_intake,
            Slot::Source => &mut self.source_intake,
        }
    }

    fn invalidate_in_flight(&mut self) {
        self.is_loading = false;
        self.generation += 1;
    }
}
