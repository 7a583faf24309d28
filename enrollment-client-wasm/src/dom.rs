use anyhow::{Result, anyhow};
use enrollment_core::{
    capture_surface::CaptureSurface, config::ElementIds, error::CaptureError,
    geometry::FrameSize,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlFormElement, HtmlInputElement,
    HtmlVideoElement, MediaStream,
};

/// The four page elements of the enrollment form.
pub struct DomSurface {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    image: HtmlInputElement,
    form: HtmlFormElement,
}

impl DomSurface {
    /// Looks up every element by id. Fails on the first one that is missing or
    /// has the wrong type.
    pub fn resolve(document: &Document, ids: &ElementIds) -> Result<Self, CaptureError> {
        Ok(DomSurface {
            video: element_by_id(document, &ids.video, "video element")?,
            canvas: element_by_id(document, &ids.canvas, "canvas element")?,
            image: element_by_id(document, &ids.image, "input element")?,
            form: element_by_id(document, &ids.form, "form element")?,
        })
    }

    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    fn context_2d(&self) -> Result<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| anyhow!("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("2d context has an unexpected type"))
    }
}

impl CaptureSurface for DomSurface {
    fn native_dimensions(&self) -> (u32, u32) {
        (self.video.video_width(), self.video.video_height())
    }

    fn resize_canvas(&self, size: FrameSize) -> Result<()> {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        Ok(())
    }

    fn draw_video_frame(&self, size: FrameSize) -> Result<()> {
        self.context_2d()?
            .draw_image_with_html_video_element_and_dw_and_dh(
                &self.video,
                0.0,
                0.0,
                f64::from(size.width),
                f64::from(size.height),
            )
            .map_err(js_error)
    }

    fn encode_canvas(&self, mime_type: &str) -> Result<String> {
        self.canvas.to_data_url_with_type(mime_type).map_err(js_error)
    }

    fn set_image_value(&self, value: &str) -> Result<()> {
        self.image.set_value(value);
        Ok(())
    }

    fn pause_video(&self) -> Result<()> {
        self.video.pause().map_err(js_error)
    }

    fn submit_form(&self) -> Result<()> {
        self.form.submit().map_err(js_error)
    }
}

/// Attaches the camera stream to the video element and starts playback.
pub async fn play_stream(video: &HtmlVideoElement, stream: &MediaStream) -> Result<(), JsValue> {
    video.set_src_object(Some(stream));
    JsFuture::from(video.play()?).await?;
    Ok(())
}

fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, CaptureError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| CaptureError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| CaptureError::ElementType {
            id: id.to_string(),
            expected,
        })
}

/// Message of a thrown JS value, `Name: message` for `Error`/`DOMException`.
pub fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.to_string());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn js_error(err: JsValue) -> anyhow::Error {
    anyhow!(describe_js_error(&err))
}
