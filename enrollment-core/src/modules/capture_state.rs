use crate::geometry::FrameSize;

/// Lifecycle of the capture surface.
///
/// The only transition is `AwaitingStream -> Ready`, taken on the first
/// readiness signal of the video element. Frame sizing happens as part of that
/// transition and therefore at most once per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    AwaitingStream,
    Ready(FrameSize),
}

impl CaptureState {
    /// Takes the `AwaitingStream -> Ready` transition.
    ///
    /// Returns the new frame size when the transition happened, `None` when
    /// the state was already `Ready`.
    pub fn become_ready(&mut self, native_width: u32, native_height: u32) -> Option<FrameSize> {
        match self {
            CaptureState::AwaitingStream => {
                let size = FrameSize::from_native(native_width, native_height);
                *self = CaptureState::Ready(size);
                Some(size)
            }
            CaptureState::Ready(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CaptureState::Ready(_))
    }

    pub fn frame_size(&self) -> Option<FrameSize> {
        match self {
            CaptureState::AwaitingStream => None,
            CaptureState::Ready(size) => Some(*size),
        }
    }

    /// Frame size usable for drawing, i.e. ready and non-degenerate.
    pub fn drawable_size(&self) -> Option<FrameSize> {
        self.frame_size().filter(FrameSize::is_drawable)
    }
}

#[cfg(test)]
mod success {
    use super::CaptureState;
    use crate::geometry::FrameSize;

    #[test]
    fn first_signal_transitions_to_ready() {
        let mut state = CaptureState::default();

        let size = state.become_ready(1920, 1080);

        assert_eq!(size, Some(FrameSize::new(1080, 607)));
        assert_eq!(state, CaptureState::Ready(FrameSize::new(1080, 607)));
        assert!(state.is_ready());
    }

    #[test]
    fn later_signals_keep_first_size() {
        let mut state = CaptureState::default();
        state.become_ready(1920, 1080);

        let size = state.become_ready(640, 480);

        assert_eq!(size, None);
        assert_eq!(state.frame_size(), Some(FrameSize::new(1080, 607)));
    }

    #[test]
    fn awaiting_stream_has_no_size() {
        let state = CaptureState::AwaitingStream;

        assert!(!state.is_ready());
        assert_eq!(state.frame_size(), None);
        assert_eq!(state.drawable_size(), None);
    }

    #[test]
    fn degenerate_size_is_not_drawable() {
        let mut state = CaptureState::default();
        state.become_ready(1920, 0);

        assert!(state.is_ready());
        assert_eq!(state.drawable_size(), None);
    }
}
