pub mod error;
pub mod formats;
pub mod fs;

pub use error::{
    AppError, AppResult,
    GenerationError, GenerationResult,
    IntakeError, IntakeResult,
    SessionError,
};
pub use formats::{ImageFormat, accepted_extensions, resolve_mime_type};
pub use fs::{file_name, read_file, validate_input_path};
