//! JavaScript-friendly wrapper types for capture results
use enrollment_core::{data_url::ImageDataUrl, geometry::FrameSize};
use wasm_bindgen::prelude::*;

/// JavaScript-friendly wrapper for the canvas frame size
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct FrameSizeMessage {
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl FrameSizeMessage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl From<FrameSize> for FrameSizeMessage {
    fn from(size: FrameSize) -> Self {
        FrameSizeMessage {
            width: size.width,
            height: size.height,
        }
    }
}

/// JavaScript-friendly summary of a parsed image data URL
#[wasm_bindgen]
#[derive(Clone)]
pub struct ImageDataUrlMessage {
    mime_type: String,
    byte_length: usize,
}

#[wasm_bindgen]
impl ImageDataUrlMessage {
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }
}

impl From<&ImageDataUrl> for ImageDataUrlMessage {
    fn from(data_url: &ImageDataUrl) -> Self {
        ImageDataUrlMessage {
            mime_type: data_url.mime_type().to_string(),
            byte_length: data_url.payload().len(),
        }
    }
}
