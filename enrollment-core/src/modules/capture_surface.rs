use anyhow::Result;
use mockall::automock;

use crate::geometry::FrameSize;

/// The page elements a capture controller drives: a live video element, an
/// off-screen canvas, a hidden image field and the enclosing form.
#[automock]
pub trait CaptureSurface {
    /// Native `(width, height)` of the attached stream. Zero while the stream
    /// has not reported its dimensions.
    fn native_dimensions(&self) -> (u32, u32);

    /// Sets the canvas pixel dimensions. The visible video element is left to
    /// the page's own styling.
    fn resize_canvas(&self, size: FrameSize) -> Result<()>;

    /// Rasterizes the current video frame at (0, 0), scaled to `size`.
    fn draw_video_frame(&self, size: FrameSize) -> Result<()>;

    /// Encodes the canvas contents as a data URL of `mime_type`.
    fn encode_canvas(&self, mime_type: &str) -> Result<String>;

    fn set_image_value(&self, value: &str) -> Result<()>;

    fn pause_video(&self) -> Result<()>;

    /// Submits the form natively, without dispatching another submit event.
    fn submit_form(&self) -> Result<()>;
}
