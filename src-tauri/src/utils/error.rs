//! Error types for the nail style app.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Errors raised while reading and encoding a user-selected image.
#[derive(Error, Debug, Serialize)]
pub enum IntakeError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
    /// IO error reading the file
    #[error("IO error: {0}")]
    Io(String),
    /// Native file picker failed
    #[error("File picker error: {0}")]
    Picker(String),
}

/// Errors from the remote image generation service.
///
/// The variants only matter for diagnostics; the user sees a single
/// generic message whatever the cause.
#[derive(Error, Debug, Serialize)]
pub enum GenerationError {
    /// Client is not configured (missing API key)
    #[error("Configuration error: {0}")]
    Config(String),
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),
    /// Service answered with a non-success status
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body was not the expected JSON
    #[error("Malformed response: {0}")]
    Decode(String),
    /// Service refused the prompt
    #[error("Request blocked: {0}")]
    Blocked(String),
    /// Response carried no image part
    #[error("Response contained no image")]
    NoImage,
    /// An input was not a base64 data URL
    #[error("Invalid image data: {0}")]
    InvalidImage(String),
}

/// State controller rejections.
#[derive(Error, Debug, Serialize, PartialEq, Eq)]
pub enum SessionError {
    /// One or both slots are empty
    #[error("Both a model hand image and a nail design image are required")]
    MissingImages,
    /// A generation is already in flight
    #[error("A generation is already in progress")]
    Busy,
}

/// Main error type for the application.
///
/// All errors are converted to this type before being returned to the
/// frontend.
#[derive(Error, Debug, Serialize)]
pub enum AppError {
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Convenience result type for command handlers.
pub type AppResult<T> = Result<T, AppError>;
pub type IntakeResult<T> = Result<T, IntakeError>;
pub type GenerationResult<T> = Result<T, GenerationError>;

impl IntakeError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotFile(path.into())
    }
}

impl GenerationError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_image<T: Into<String>>(msg: T) -> Self {
        Self::InvalidImage(msg.into())
    }
}

// Convert std::io::Error to IntakeError
impl From<io::Error> for IntakeError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
