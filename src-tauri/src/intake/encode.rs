use std::path::Path;
use tracing::{debug, warn};
use crate::core::SelectedImage;
use crate::intake::to_data_url;
use crate::utils::{ImageFormat, IntakeResult, file_name, read_file, resolve_mime_type};

/// Read a user-selected file and encode it as a data URL.
///
/// Types outside [`ImageFormat`] are still encoded; the formats only feed
/// the picker filter.
pub async fn encode_file(path: impl AsRef<Path>) -> IntakeResult<SelectedImage> {
    let path = path.as_ref();
    let bytes = read_file(path).await?;
    let mime_type = resolve_mime_type(path, &bytes);

    if ImageFormat::from_mime(&mime_type).is_none() {
        warn!("{} is not a recognised image type ({})", path.display(), mime_type);
    }
    debug!("Encoded {} ({} bytes, {})", path.display(), bytes.len(), mime_type);

    Ok(SelectedImage {
        file_name: file_name(path),
        path: path.to_string_lossy().to_string(),
        size_bytes: bytes.len() as u64,
        data_url: to_data_url(&mime_type, &bytes),
        mime_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::IntakeError;

    #[tokio::test]
    async fn encodes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = encode_file(&path).await.unwrap();
        assert_eq!(image.file_name, "hand.png");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.size_bytes, 4);
        assert_eq!(image.data_url, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn unknown_types_fall_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.unknownext");
        std::fs::write(&path, b"xyz").unwrap();

        let image = encode_file(&path).await.unwrap();
        assert_eq!(image.data_url, "data:application/octet-stream;base64,eHl6");
    }

    #[tokio::test]
    async fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_file(dir.path().join("gone.jpg")).await.unwrap_err();
        assert!(matches!(err, IntakeError::NotFound(_)));
    }
}
