//! `data:<mime>;base64,<payload>` decoding for canvas snapshots.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::DataUrlError;

pub const DEFAULT_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Split on the first comma and base64-decode the payload.
///
/// The image itself is not inspected; whatever bytes the caller sent are
/// forwarded as-is.
pub fn decode_data_url(url: &str) -> Result<DecodedImage, DataUrlError> {
    let (header, payload) = url.split_once(',').ok_or(DataUrlError::MissingComma)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok(DecodedImage {
        mime_type: mime_from_header(header),
        bytes,
    })
}

fn mime_from_header(header: &str) -> String {
    let mime = header
        .trim()
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if mime.is_empty() {
        DEFAULT_MIME.to_string()
    } else {
        mime.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_data_url() {
        let img = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(img.mime_type, "image/png");
        assert_eq!(img.bytes, b"hello");
    }

    #[test]
    fn keeps_declared_mime() {
        let img = decode_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(img.mime_type, "image/jpeg");
    }

    #[test]
    fn bare_header_falls_back_to_png() {
        let img = decode_data_url(",aGVsbG8=").unwrap();
        assert_eq!(img.mime_type, DEFAULT_MIME);
        assert_eq!(img.bytes, b"hello");

        let img = decode_data_url("data:;base64,aGVsbG8=").unwrap();
        assert_eq!(img.mime_type, DEFAULT_MIME);
    }

    #[test]
    fn missing_comma_is_an_error() {
        assert!(matches!(
            decode_data_url("aGVsbG8="),
            Err(DataUrlError::MissingComma)
        ));
    }

    #[test]
    fn bad_base64_is_an_error() {
        assert!(matches!(
            decode_data_url("data:image/png;base64,not*base64!"),
            Err(DataUrlError::Base64(_))
        ));
    }
}
