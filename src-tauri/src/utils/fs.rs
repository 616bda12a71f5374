use std::path::Path;
use tokio::fs;
use crate::utils::{IntakeError, IntakeResult};

/// Check that `path` names an existing regular file
pub async fn validate_input_path(path: impl AsRef<Path>) -> IntakeResult<()> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IntakeError::not_found(path));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_file() {
        return Err(IntakeError::not_a_file(path));
    }
    Ok(())
}

/// Read the whole file after validating it
pub async fn read_file(path: impl AsRef<Path>) -> IntakeResult<Vec<u8>> {
    let path = path.as_ref();
    validate_input_path(path).await?;
    Ok(fs::read(path).await?)
}

/// Final path component as a display string
pub fn file_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
