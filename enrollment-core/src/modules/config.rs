use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::{
    constants::{
        DEFAULT_CANVAS_ELEMENT_ID, DEFAULT_FORM_ELEMENT_ID, DEFAULT_IMAGE_ELEMENT_ID,
        DEFAULT_LOG_LEVEL, DEFAULT_VIDEO_ELEMENT_ID,
    },
    error::CaptureError,
};

/// Ids of the four elements the hosting page must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub video: String,
    pub canvas: String,
    pub image: String,
    pub form: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        ElementIds {
            video: DEFAULT_VIDEO_ELEMENT_ID.to_string(),
            canvas: DEFAULT_CANVAS_ELEMENT_ID.to_string(),
            image: DEFAULT_IMAGE_ELEMENT_ID.to_string(),
            form: DEFAULT_FORM_ELEMENT_ID.to_string(),
        }
    }
}

impl ElementIds {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("video", self.video.as_str()),
            ("canvas", self.canvas.as_str()),
            ("image", self.image.as_str()),
            ("form", self.form.as_str()),
        ]
        .into_iter()
    }
}

/// What a submit does while no frame size is known yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockedSubmitPolicy {
    /// Swallow the submission. The user gets no network request.
    #[default]
    Block,
    /// Submit natively with the image field left empty.
    SubmitWithoutImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConfig {
    pub element_ids: ElementIds,
    pub blocked_submit: BlockedSubmitPolicy,
    pub log_level: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            element_ids: ElementIds::default(),
            blocked_submit: BlockedSubmitPolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), CaptureError> {
        for (role, id) in self.element_ids.iter() {
            if id.trim().is_empty() {
                return Err(CaptureError::Config(format!("{role} element id is empty")));
            }
        }
        self.log_filter()?;
        Ok(())
    }

    /// Parses `log_level` as a tracing filter. Any invalid directive is an
    /// error rather than being dropped.
    pub fn log_filter(&self) -> Result<EnvFilter, CaptureError> {
        if self.log_level.trim().is_empty() {
            return Err(CaptureError::Config("log level is empty".to_string()));
        }
        EnvFilter::builder()
            .parse(&self.log_level)
            .map_err(|err| CaptureError::Config(format!("invalid log level: {err}")))
    }
}
