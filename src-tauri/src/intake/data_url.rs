use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use crate::utils::{GenerationError, GenerationResult};

/// A borrowed view of a `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub mime_type: &'a str,
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a base64 data URL into its MIME type and payload.
    ///
    /// The payload is returned as-is, without decoding it.
    pub fn parse(input: &'a str) -> GenerationResult<Self> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| GenerationError::invalid_image("missing data: prefix"))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| GenerationError::invalid_image("not base64 encoded"))?;
        if payload.is_empty() {
            return Err(GenerationError::invalid_image("empty payload"));
        }

        Ok(Self { mime_type, payload })
    }
}

/// Encode raw bytes as a data URL.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mime_and_payload() {
        let url = DataUrl::parse("data:image/webp;base64,UklGRg==").unwrap();
        assert_eq!(url.mime_type, "image/webp");
        assert_eq!(url.payload, "UklGRg==");
    }

    #[test]
    fn rejects_non_data_urls() {
        for bad in [
            "https://example.com/hand.png",
            "data:image/png,rawtext",
            "data:image/png;base64,",
        ] {
            assert!(matches!(DataUrl::parse(bad), Err(GenerationError::InvalidImage(_))), "{bad}");
        }
    }

    #[test]
    fn encodes_with_padding() {
        assert_eq!(to_data_url("image/png", b"ab"), "data:image/png;base64,YWI=");
    }
}
