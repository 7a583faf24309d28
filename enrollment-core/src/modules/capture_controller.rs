use crate::{
    capture_state::CaptureState,
    capture_surface::CaptureSurface,
    config::BlockedSubmitPolicy,
    constants::PNG_MIME_TYPE,
    data_url::ImageDataUrl,
    error::CaptureError,
    geometry::FrameSize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The frame was written to the image field and the form submitted.
    Submitted { data_url_len: usize },
    /// No frame size is known yet and the submission was swallowed.
    Blocked,
    /// No frame size is known yet and the form was submitted without an image.
    SubmittedWithoutImage,
}

/// Single-frame webcam capture for the enrollment form.
pub struct CaptureController<S: CaptureSurface> {
    surface: S,
    state: CaptureState,
    blocked_submit: BlockedSubmitPolicy,
}

impl<S: CaptureSurface> CaptureController<S> {
    pub fn new(surface: S, blocked_submit: BlockedSubmitPolicy) -> Self {
        CaptureController {
            surface,
            state: CaptureState::default(),
            blocked_submit,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Records a failed camera acquisition. Nothing is retried, the form stays
    /// bound and the state stays `AwaitingStream`.
    pub fn handle_stream_failure(&self, message: &str) -> CaptureError {
        tracing::error!("An error occurred: {}", message);
        CaptureError::StreamAcquisition(message.to_string())
    }

    /// Handles a readiness signal of the video element.
    ///
    /// Sizes the canvas on the first signal and returns the size; every later
    /// signal is a no-op returning `None`.
    pub fn handle_can_play(&mut self) -> Result<Option<FrameSize>, CaptureError> {
        if self.state.is_ready() {
            tracing::trace!("canplay ignored, capture surface already sized");
            return Ok(None);
        }

        let (native_width, native_height) = self.surface.native_dimensions();
        let Some(size) = self.state.become_ready(native_width, native_height) else {
            return Ok(None);
        };

        self.surface
            .resize_canvas(size)
            .map_err(CaptureError::surface)?;

        tracing::info!(
            "stream ready: native {}x{}, frame {}x{}",
            native_width,
            native_height,
            size.width,
            size.height
        );

        Ok(Some(size))
    }

    /// Handles an intercepted form submission. The caller has already
    /// prevented the default action.
    pub fn handle_submit(&mut self) -> Result<SubmitOutcome, CaptureError> {
        let Some(size) = self.state.drawable_size() else {
            return self.handle_blocked_submit();
        };

        self.surface
            .resize_canvas(size)
            .map_err(CaptureError::surface)?;
        self.surface
            .draw_video_frame(size)
            .map_err(CaptureError::surface)?;

        let encoded = self
            .surface
            .encode_canvas(PNG_MIME_TYPE)
            .map_err(CaptureError::surface)?;
        let image = ImageDataUrl::parse_png(&encoded)?;
        tracing::debug!("captured {} byte frame", image.payload().len());

        self.surface
            .set_image_value(&encoded)
            .map_err(CaptureError::surface)?;
        self.surface.pause_video().map_err(CaptureError::surface)?;
        self.surface.submit_form().map_err(CaptureError::surface)?;

        tracing::info!("submitted enrollment frame {}x{}", size.width, size.height);

        Ok(SubmitOutcome::Submitted {
            data_url_len: encoded.len(),
        })
    }

    fn handle_blocked_submit(&self) -> Result<SubmitOutcome, CaptureError> {
        match self.blocked_submit {
            BlockedSubmitPolicy::Block => {
                tracing::warn!("submit blocked: camera stream is not ready");
                Ok(SubmitOutcome::Blocked)
            }
            BlockedSubmitPolicy::SubmitWithoutImage => {
                tracing::warn!("camera stream is not ready, submitting without image");
                self.surface.submit_form().map_err(CaptureError::surface)?;
                Ok(SubmitOutcome::SubmittedWithoutImage)
            }
        }
    }
}


#[cfg(test)]
mod failure {
    use anyhow::anyhow;
    use mockall::predicate::*;

    use super::{CaptureController, SubmitOutcome};
    use crate::{
        capture_surface::MockCaptureSurface, config::BlockedSubmitPolicy,
        data_url::DataUrlError, error::CaptureError,
    };

    fn ready_surface() -> MockCaptureSurface {
        let mut surface = MockCaptureSurface::new();
        surface
            .expect_native_dimensions()
            .return_const((1280u32, 720u32));
        surface.expect_resize_canvas().returning(|_| Ok(()));
        surface.expect_draw_video_frame().returning(|_| Ok(()));
        surface
    }

    #[test]
    fn empty_canvas_encoding_does_not_submit() {
        let mut surface = ready_surface();
        surface
            .expect_encode_canvas()
            .with(eq("image/png"))
            .returning(|_| Ok("data:,".to_string()));
        surface.expect_set_image_value().never();
        surface.expect_pause_video().never();
        surface.expect_submit_form().never();

        let mut controller = CaptureController::new(surface, BlockedSubmitPolicy::Block);
        controller.handle_can_play().unwrap();

        let err = controller.handle_submit().unwrap_err();

        assert_eq!(err, CaptureError::Encoding(DataUrlError::NotBase64));
    }

    #[test]
    fn zero_native_height_blocks_submit() {
        let mut surface = MockCaptureSurface::new();
        surface
            .expect_native_dimensions()
            .return_const((1920u32, 0u32));
        surface.expect_resize_canvas().times(1).returning(|_| Ok(()));
        surface.expect_submit_form().never();

        let mut controller = CaptureController::new(surface, BlockedSubmitPolicy::Block);
        controller.handle_can_play().unwrap();

        assert_eq!(controller.handle_submit().unwrap(), SubmitOutcome::Blocked);
    }

    #[test]
    fn draw_failure_is_reported() {
        let mut surface = MockCaptureSurface::new();
        surface
            .expect_native_dimensions()
            .return_const((1280u32, 720u32));
        surface.expect_resize_canvas().returning(|_| Ok(()));
        surface
            .expect_draw_video_frame()
            .returning(|_| Err(anyhow!("InvalidStateError")));
        surface.expect_encode_canvas().never();
        surface.expect_submit_form().never();

        let mut controller = CaptureController::new(surface, BlockedSubmitPolicy::Block);
        controller.handle_can_play().unwrap();

        let err = controller.handle_submit().unwrap_err();

        assert_eq!(err, CaptureError::Surface("InvalidStateError".to_string()));
    }

    #[test]
    fn resize_failure_on_ready_is_reported_but_state_advances() {
        let mut surface = MockCaptureSurface::new();
        surface
            .expect_native_dimensions()
            .times(1)
            .return_const((1280u32, 720u32));
        surface
            .expect_resize_canvas()
            .times(1)
            .returning(|_| Err(anyhow!("detached")));

        let mut controller = CaptureController::new(surface, BlockedSubmitPolicy::Block);

        assert!(controller.handle_can_play().is_err());
        assert!(controller.state().is_ready());
        assert_eq!(controller.handle_can_play().unwrap(), None);
    }
}
