mod callbacks;
mod dom;
mod listeners;
mod messages;
mod utils;

pub use messages::*;

use std::{cell::RefCell, rc::Rc};

use enrollment_core::{
    capture_controller::CaptureController, config::CaptureConfig, data_url::ImageDataUrl,
    error::CaptureError, geometry::FrameSize,
};
use wasm_bindgen::{JsCast, prelude::*};

use callbacks::CaptureCallbacks;
use dom::DomSurface;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// Call `utils::set_panic_hook` automatically
#[wasm_bindgen(start)]
fn main() {
    utils::set_panic_hook();
}

pub(crate) type ControllerHandle = Rc<RefCell<Option<CaptureController<DomSurface>>>>;

/// Webcam capture for the MFA enrollment form.
///
/// ```javascript
/// const capture = new EnrollmentCapture({ blockedSubmit: "block" });
/// capture.onStreamError((message) => showHint(message));
/// capture.start();
/// ```
#[wasm_bindgen]
pub struct EnrollmentCapture {
    config: CaptureConfig,
    controller: ControllerHandle,
    callbacks: Rc<RefCell<CaptureCallbacks>>,
}

#[wasm_bindgen]
impl EnrollmentCapture {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<EnrollmentCapture, JsValue> {
        let config = parse_config(config)?;
        utils::init_logging(config.log_filter().map_err(to_js_error)?);

        Ok(EnrollmentCapture {
            config,
            controller: Rc::new(RefCell::new(None)),
            callbacks: Rc::new(RefCell::new(CaptureCallbacks::new())),
        })
    }

    #[wasm_bindgen(js_name = onReady)]
    pub fn set_ready_callback(&mut self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().set_ready_callback(callback);
    }

    #[wasm_bindgen(js_name = onStreamError)]
    pub fn set_stream_error_callback(&mut self, callback: js_sys::Function) {
        self.callbacks
            .borrow_mut()
            .set_stream_error_callback(callback);
    }

    #[wasm_bindgen(js_name = onCaptured)]
    pub fn set_captured_callback(&mut self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().set_captured_callback(callback);
    }

    #[wasm_bindgen(js_name = onSubmitBlocked)]
    pub fn set_submit_blocked_callback(&mut self, callback: js_sys::Function) {
        self.callbacks
            .borrow_mut()
            .set_submit_blocked_callback(callback);
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.controller
            .borrow()
            .as_ref()
            .is_some_and(|controller| controller.state().is_ready())
    }

    #[wasm_bindgen(js_name = frameSize)]
    pub fn frame_size(&self) -> Option<FrameSizeMessage> {
        self.controller
            .borrow()
            .as_ref()
            .and_then(|controller| controller.state().frame_size())
            .map(FrameSizeMessage::from)
    }

    /// Binds the page elements and asks for the camera. Returns as soon as the
    /// listeners are in place; the permission prompt is not awaited.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.controller.borrow().is_some() {
            return Err(JsValue::from_str("capture already started"));
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let surface =
            DomSurface::resolve(&document, &self.config.element_ids).map_err(to_js_error)?;
        let video = surface.video().clone();
        let form = surface.form().clone();
        *self.controller.borrow_mut() =
            Some(CaptureController::new(surface, self.config.blocked_submit));

        listeners::bind_can_play(&video, self.controller.clone(), self.callbacks.clone())?;
        listeners::bind_submit(&form, self.controller.clone(), self.callbacks.clone())?;
        listeners::acquire_camera(window, video, self.controller.clone(), self.callbacks.clone());

        tracing::info!("enrollment capture started");
        Ok(())
    }
}

/// Starts capture once the page has loaded, or right away when it already has.
#[wasm_bindgen(js_name = mountOnLoad)]
pub fn mount_on_load(config: JsValue) -> Result<(), JsValue> {
    let capture = EnrollmentCapture::new(config)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

    let loaded = window
        .document()
        .is_some_and(|document| document.ready_state() == "complete");
    if loaded {
        return capture.start();
    }

    let startup = Closure::once_into_js(move || {
        if let Err(err) = capture.start() {
            console_log!("enrollment capture failed to start: {:?}", err);
        }
    });
    window.add_event_listener_with_callback("load", startup.unchecked_ref())?;

    Ok(())
}

/// Canvas size for a stream of the given native dimensions.
#[wasm_bindgen(js_name = computeFrameSize)]
pub fn compute_frame_size(native_width: u32, native_height: u32) -> FrameSizeMessage {
    FrameSize::from_native(native_width, native_height).into()
}

#[wasm_bindgen(js_name = parseImageDataUrl)]
pub fn parse_image_data_url(value: &str) -> Result<ImageDataUrlMessage, JsValue> {
    let data_url = ImageDataUrl::parse(value).map_err(to_js_error)?;
    Ok(ImageDataUrlMessage::from(&data_url))
}

fn parse_config(value: JsValue) -> Result<CaptureConfig, JsValue> {
    let config = if value.is_undefined() || value.is_null() {
        CaptureConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|err| to_js_error(CaptureError::Config(err.to_string())))?
    };
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}
