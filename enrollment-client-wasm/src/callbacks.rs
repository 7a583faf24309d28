// Shared with the DOM listeners, so it lives outside `EnrollmentCapture`.
// The callbacks are passed from JavaScript.
#[derive(Default)]
pub(crate) struct CaptureCallbacks {
    ready_callback: Option<js_sys::Function>,
    stream_error_callback: Option<js_sys::Function>,
    captured_callback: Option<js_sys::Function>,
    submit_blocked_callback: Option<js_sys::Function>,
}

impl CaptureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready_callback(&self) -> Option<js_sys::Function> {
        self.ready_callback.clone()
    }

    pub fn set_ready_callback(&mut self, callback: js_sys::Function) {
        self.ready_callback = Some(callback);
    }

    pub fn stream_error_callback(&self) -> Option<js_sys::Function> {
        self.stream_error_callback.clone()
    }

    pub fn set_stream_error_callback(&mut self, callback: js_sys::Function) {
        self.stream_error_callback = Some(callback);
    }

    pub fn captured_callback(&self) -> Option<js_sys::Function> {
        self.captured_callback.clone()
    }

    pub fn set_captured_callback(&mut self, callback: js_sys::Function) {
        self.captured_callback = Some(callback);
    }

    pub fn submit_blocked_callback(&self) -> Option<js_sys::Function> {
        self.submit_blocked_callback.clone()
    }

    pub fn set_submit_blocked_callback(&mut self, callback: js_sys::Function) {
        self.submit_blocked_callback = Some(callback);
    }
}
