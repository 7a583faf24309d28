use thiserror::Error;

use crate::data_url::DataUrlError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The hosting page does not provide an element with this id.
    #[error("element #{0} is missing from the page")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    ElementType { id: String, expected: &'static str },
    /// The camera could not be acquired (permission denied, no device, ...).
    #[error("camera acquisition failed: {0}")]
    StreamAcquisition(String),
    #[error("capture surface error: {0}")]
    Surface(String),
    #[error("captured frame could not be encoded: {0}")]
    Encoding(#[from] DataUrlError),
    #[error("invalid capture config: {0}")]
    Config(String),
}

impl CaptureError {
    pub fn surface(err: anyhow::Error) -> Self {
        CaptureError::Surface(format!("{err:#}"))
    }
}
