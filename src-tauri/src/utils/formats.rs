use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image formats offered by the native file picker. Advisory only: other
/// files are still encoded if the user gets them past the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    PNG,
    JPEG,
    WebP,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [Self::PNG, Self::JPEG, Self::WebP];

    /// MIME type used in data URLs and `inlineData` parts
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PNG => "image/png",
            Self::JPEG => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::WebP => &["webp"],
        }
    }

    /// Accepted format for a MIME type, if any
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.mime_type() == mime_type)
    }
}

/// Extensions for the picker filter
pub fn accepted_extensions() -> Vec<&'static str> {
    ImageFormat::ALL
        .iter()
        .flat_map(|f| f.extensions().iter().copied())
        .collect()
}

/// Resolve the MIME type for a file: extension first, then magic bytes,
/// then `application/octet-stream`.
pub fn resolve_mime_type(path: impl AsRef<Path>, bytes: &[u8]) -> String {
    let octet_stream = mime_guess::mime::APPLICATION_OCTET_STREAM;
    mime_guess::from_path(path)
        .first()
        .filter(|m| *m != octet_stream)
        .map(|m| m.essence_str().to_string())
        .or_else(|| {
            image::guess_format(bytes)
                .ok()
                .map(|f| f.to_mime_type().to_string())
        })
        .unwrap_or_else(|| octet_stream.essence_str().to_string())
}
