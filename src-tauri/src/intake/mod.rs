//! Image intake: turning a picked file into its encoded data URL form.

mod data_url;
mod encode;

pub use data_url::{DataUrl, to_data_url};
pub use encode::encode_file;
