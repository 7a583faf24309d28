use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;

use crate::constants::{BASE64_MARKER, DATA_URL_SCHEME, PNG_MIME_TYPE, PNG_SIGNATURE};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    #[error("missing `data:` scheme")]
    MissingScheme,
    #[error("missing `,` between header and payload")]
    MissingComma,
    /// Only base64 payloads are produced by a canvas encoder.
    #[error("payload is not base64 encoded")]
    NotBase64,
    #[error("unexpected mime type `{0}`")]
    UnexpectedMime(String),
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),
    #[error("payload is not a PNG image")]
    NotPng,
}

/// An image carried inline as `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataUrl {
    mime_type: String,
    payload: Vec<u8>,
}

impl ImageDataUrl {
    pub fn new(mime_type: impl Into<String>, payload: Vec<u8>) -> Self {
        ImageDataUrl {
            mime_type: mime_type.into(),
            payload,
        }
    }

    pub fn parse(value: &str) -> Result<Self, DataUrlError> {
        let rest = value
            .strip_prefix(DATA_URL_SCHEME)
            .ok_or(DataUrlError::MissingScheme)?;
        let (header, encoded) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;
        let mime_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or(DataUrlError::NotBase64)?;

        let payload = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|err| DataUrlError::InvalidPayload(err.to_string()))?;

        Ok(ImageDataUrl::new(mime_type, payload))
    }

    /// Parses a value that must hold a PNG image, checking both the declared
    /// mime type and the PNG signature of the payload.
    pub fn parse_png(value: &str) -> Result<Self, DataUrlError> {
        let data_url = Self::parse(value)?;
        if data_url.mime_type != PNG_MIME_TYPE {
            return Err(DataUrlError::UnexpectedMime(data_url.mime_type));
        }
        if !data_url.payload.starts_with(&PNG_SIGNATURE) {
            return Err(DataUrlError::NotPng);
        }
        Ok(data_url)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Display for ImageDataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{},{}",
            DATA_URL_SCHEME,
            self.mime_type,
            BASE64_MARKER,
            general_purpose::STANDARD.encode(&self.payload)
        )
    }
}

#[cfg(test)]
pub(crate) fn tiny_png() -> Vec<u8> {
    let mut payload = PNG_SIGNATURE.to_vec();
    // IHDR length and type, enough for the signature check
    payload.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
    payload
}

#[cfg(test)]
mod success {
    use super::{ImageDataUrl, tiny_png};

    #[test]
    fn display_produces_png_data_url() {
        let data_url = ImageDataUrl::new("image/png", tiny_png());

        let text = data_url.to_string();

        assert!(text.starts_with("data:image/png;base64,"));
        assert_eq!(text, "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==");
    }

    #[test]
    fn parse_png_data_url() {
        let data_url =
            ImageDataUrl::parse_png("data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==").unwrap();

        assert_eq!(data_url.mime_type(), "image/png");
        assert_eq!(data_url.payload(), tiny_png().as_slice());
    }

    #[test]
    fn parse_other_mime_type() {
        let data_url = ImageDataUrl::parse("data:text/plain;base64,aGVsbG8=").unwrap();

        assert_eq!(data_url.mime_type(), "text/plain");
        assert_eq!(data_url.payload(), b"hello");
    }
}

#[cfg(test)]
mod failure {
    use super::{DataUrlError, ImageDataUrl};

    #[test]
    fn empty_canvas_output_is_rejected() {
        // what a zero-sized canvas returns from toDataURL
        let err = ImageDataUrl::parse_png("data:,").unwrap_err();

        assert_eq!(err, DataUrlError::NotBase64);
    }

    #[test]
    fn missing_scheme() {
        let err = ImageDataUrl::parse("image/png;base64,AAAA").unwrap_err();

        assert_eq!(err, DataUrlError::MissingScheme);
    }

    #[test]
    fn missing_comma() {
        let err = ImageDataUrl::parse("data:image/png;base64").unwrap_err();

        assert_eq!(err, DataUrlError::MissingComma);
    }

    #[test]
    fn broken_base64() {
        let err = ImageDataUrl::parse("data:image/png;base64,***").unwrap_err();

        assert!(matches!(err, DataUrlError::InvalidPayload(_)));
    }

    #[test]
    fn jpeg_is_not_accepted_as_png() {
        let err = ImageDataUrl::parse_png("data:image/jpeg;base64,/9j/4AAQ").unwrap_err();

        assert_eq!(err, DataUrlError::UnexpectedMime("image/jpeg".to_string()));
    }

    #[test]
    fn png_mime_with_foreign_payload() {
        let err = ImageDataUrl::parse_png("data:image/png;base64,aGVsbG8=").unwrap_err();

        assert_eq!(err, DataUrlError::NotPng);
    }
}
