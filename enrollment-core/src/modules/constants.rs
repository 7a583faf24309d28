/// Width in pixels of every captured frame.
pub const TARGET_WIDTH: u32 = 1080;

/// Aspect ratio (width, height) used when the camera does not report its
/// native dimensions.
pub const FALLBACK_ASPECT_RATIO: (u32, u32) = (4, 3);

pub const PNG_MIME_TYPE: &str = "image/png";
pub const DATA_URL_SCHEME: &str = "data:";
pub const BASE64_MARKER: &str = ";base64";

// PNG file signature, first 8 bytes of every PNG stream
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub const DEFAULT_VIDEO_ELEMENT_ID: &str = "video";
pub const DEFAULT_CANVAS_ELEMENT_ID: &str = "canvas";
pub const DEFAULT_IMAGE_ELEMENT_ID: &str = "image";
pub const DEFAULT_FORM_ELEMENT_ID: &str = "form";

pub const DEFAULT_LOG_LEVEL: &str = "info";
