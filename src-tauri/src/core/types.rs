//! Core types for the two image slots and the session view.

use serde::{Deserialize, Serialize};

/// One of the two named image inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// The model's hand the style is applied to
    Destination,
    /// The nail art design to copy
    Source,
}

impl Slot {
    /// Title shown above the upload area
    pub fn title(&self) -> &'static str {
        match self {
            Self::Destination => "Model's Hand",
            Self::Source => "Nail Art Design",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Destination => f.write_str("destination"),
            Self::Source => f.write_str("source"),
        }
    }
}

/// A user-selected image held in one slot.
///
/// The path, name and size stand in for the raw file handle; `data_url`
/// is the encoded form used both for preview and for transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedImage {
    /// Original file name, for display
    pub file_name: String,
    /// Absolute path the file was read from
    pub path: String,
    /// MIME type embedded in the data URL
    pub mime_type: String,
    /// Size of the raw file in bytes
    pub size_bytes: u64,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
}

/// Serializable view of the session sent to the webview after every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub destination_image: Option<SelectedImage>,
    pub source_image: Option<SelectedImage>,
    pub generated_image: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Both slots filled and nothing in flight
    pub can_generate: bool,
    /// Something worth clearing is on screen
    pub can_reset: bool,
}
