use std::{cell::RefCell, rc::Rc};

use enrollment_core::{capture_controller::SubmitOutcome, geometry::FrameSize};
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Event, HtmlFormElement, HtmlVideoElement, MediaStream, MediaStreamConstraints, Window,
};

use crate::{
    ControllerHandle,
    callbacks::CaptureCallbacks,
    dom::{describe_js_error, play_stream},
    messages::FrameSizeMessage,
};

type CallbacksHandle = Rc<RefCell<CaptureCallbacks>>;
type ListenerSlot = Rc<RefCell<Option<Closure<dyn FnMut(Event)>>>>;

/// Requests the camera without waiting for the user's answer.
pub(crate) fn acquire_camera(
    window: Window,
    video: HtmlVideoElement,
    controller: ControllerHandle,
    callbacks: CallbacksHandle,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let stream = match request_camera_stream(&window).await {
            Ok(stream) => stream,
            Err(err) => {
                let message = describe_js_error(&err);
                let error = controller
                    .borrow()
                    .as_ref()
                    .map(|controller| controller.handle_stream_failure(&message));
                let message = error.map(|error| error.to_string()).unwrap_or(message);

                let callback = callbacks.borrow().stream_error_callback();
                if let Some(callback) = callback {
                    if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&message)) {
                        tracing::error!("stream_error callback error: {:?}", err);
                    }
                }
                return;
            }
        };

        tracing::debug!("camera stream acquired: {}", stream.id());
        if let Err(err) = play_stream(&video, &stream).await {
            tracing::warn!("video playback did not start: {}", describe_js_error(&err));
        }
    });
}

async fn request_camera_stream(window: &Window) -> Result<MediaStream, JsValue> {
    let media_devices = window.navigator().media_devices()?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);

    let stream =
        JsFuture::from(media_devices.get_user_media_with_constraints(&constraints)?).await?;
    stream.dyn_into::<MediaStream>()
}

/// Sizes the canvas on the first `canplay` and then unregisters itself.
pub(crate) fn bind_can_play(
    video: &HtmlVideoElement,
    controller: ControllerHandle,
    callbacks: CallbacksHandle,
) -> Result<(), JsValue> {
    // The slot keeps the closure alive for the page after it unregisters.
    let slot: ListenerSlot = Rc::new(RefCell::new(None));
    let listener_slot = slot.clone();
    let target = video.clone();

    let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let result = match controller.borrow_mut().as_mut() {
            Some(controller) => controller.handle_can_play(),
            None => return,
        };

        match result {
            Ok(Some(size)) => notify_ready(&callbacks, size),
            Ok(None) => {}
            Err(err) => tracing::error!("canvas sizing failed: {}", err),
        }

        let ready = controller
            .borrow()
            .as_ref()
            .is_some_and(|controller| controller.state().is_ready());
        if ready {
            if let Some(listener) = listener_slot.borrow().as_ref() {
                let callback: &js_sys::Function = listener.as_ref().unchecked_ref();
                if let Err(err) = target.remove_event_listener_with_callback("canplay", callback) {
                    tracing::warn!("canplay listener not removed: {:?}", err);
                }
            }
        }
    });

    video.add_event_listener_with_callback("canplay", listener.as_ref().unchecked_ref())?;
    *slot.borrow_mut() = Some(listener);

    Ok(())
}

fn notify_ready(callbacks: &CallbacksHandle, size: FrameSize) {
    let callback = callbacks.borrow().ready_callback();
    if let Some(callback) = callback {
        let size: JsValue = FrameSizeMessage::from(size).into();
        if let Err(err) = callback.call1(&JsValue::NULL, &size) {
            tracing::error!("ready callback error: {:?}", err);
        }
    }
}

/// Intercepts every submit of the form. The default action is always
/// prevented; the controller decides whether the form is submitted natively.
pub(crate) fn bind_submit(
    form: &HtmlFormElement,
    controller: ControllerHandle,
    callbacks: CallbacksHandle,
) -> Result<(), JsValue> {
    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let result = match controller.borrow_mut().as_mut() {
            Some(controller) => controller.handle_submit(),
            None => return,
        };

        match result {
            Ok(SubmitOutcome::Submitted { data_url_len }) => {
                let callback = callbacks.borrow().captured_callback();
                if let Some(callback) = callback {
                    let len = JsValue::from(data_url_len as f64);
                    if let Err(err) = callback.call1(&JsValue::NULL, &len) {
                        tracing::error!("captured callback error: {:?}", err);
                    }
                }
            }
            Ok(SubmitOutcome::Blocked) => {
                let callback = callbacks.borrow().submit_blocked_callback();
                if let Some(callback) = callback {
                    if let Err(err) = callback.call0(&JsValue::NULL) {
                        tracing::error!("submit_blocked callback error: {:?}", err);
                    }
                }
            }
            Ok(SubmitOutcome::SubmittedWithoutImage) => {}
            Err(err) => tracing::error!("capture failed: {}", err),
        }
    });

    form.add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())?;
    // Bound for the life of the page.
    listener.forget();

    Ok(())
}
