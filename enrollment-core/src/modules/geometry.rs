use crate::constants::{FALLBACK_ASPECT_RATIO, TARGET_WIDTH};

/// Pixel dimensions of the off-screen drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        FrameSize { width, height }
    }

    /// Scales the camera's native dimensions to [`TARGET_WIDTH`].
    ///
    /// The height is `TARGET_WIDTH * native_height / native_width` rounded
    /// down, the same truncation a canvas applies to a fractional dimension
    /// attribute. A zero native width means the stream has not reported its
    /// size yet, so the 4:3 fallback ratio is used instead.
    pub fn from_native(native_width: u32, native_height: u32) -> Self {
        let width = TARGET_WIDTH;

        let height = if native_width == 0 {
            let (ratio_width, ratio_height) = FALLBACK_ASPECT_RATIO;
            tracing::debug!(
                "native video width is unavailable, falling back to {}:{}",
                ratio_width,
                ratio_height
            );
            u64::from(width) * u64::from(ratio_height) / u64::from(ratio_width)
        } else {
            u64::from(width) * u64::from(native_height) / u64::from(native_width)
        };

        FrameSize {
            width,
            height: u32::try_from(height).unwrap_or(u32::MAX),
        }
    }

    /// Whether a frame of this size can be rasterized at all.
    pub fn is_drawable(&self) -> bool {
        self.width != 0 && self.height != 0
    }
}

#[cfg(test)]
mod success {
    use super::FrameSize;
    use crate::constants::TARGET_WIDTH;

    #[test]
    fn full_hd_stream_is_scaled_to_target_width() {
        let size = FrameSize::from_native(1920, 1080);

        assert_eq!(size, FrameSize::new(1080, 607));
    }

    #[test]
    fn vga_stream_keeps_four_by_three() {
        let size = FrameSize::from_native(640, 480);

        assert_eq!(size, FrameSize::new(1080, 810));
    }

    #[test]
    fn portrait_stream_is_taller_than_wide() {
        let size = FrameSize::from_native(720, 1280);

        assert_eq!(size, FrameSize::new(1080, 1920));
    }

    #[test]
    fn unreported_width_falls_back_to_four_by_three() {
        assert_eq!(FrameSize::from_native(0, 0), FrameSize::new(1080, 810));
        assert_eq!(FrameSize::from_native(0, 720), FrameSize::new(1080, 810));
    }

    #[test]
    fn width_is_always_target_width() {
        for (w, h) in [(1, 1), (320, 240), (4096, 2160), (1080, 1080)] {
            assert_eq!(FrameSize::from_native(w, h).width, TARGET_WIDTH);
        }
    }

    #[test]
    fn drawable_requires_both_dimensions() {
        assert!(FrameSize::new(1080, 607).is_drawable());
        assert!(!FrameSize::new(1080, 0).is_drawable());
        assert!(!FrameSize::default().is_drawable());
    }
}

#[cfg(test)]
mod failure {
    use super::FrameSize;

    #[test]
    fn zero_native_height_is_not_drawable() {
        let size = FrameSize::from_native(1920, 0);

        assert_eq!(size.height, 0);
        assert!(!size.is_drawable());
    }

    #[test]
    fn extreme_ratio_saturates() {
        let size = FrameSize::from_native(1, u32::MAX);

        assert_eq!(size.height, u32::MAX);
    }
}
