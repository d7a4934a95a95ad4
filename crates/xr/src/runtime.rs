use glam::Vec3;
use vrspace_common::Transform;
use vrspace_input::FrameInput;

/// Handle to the XR head-mounted camera created during session bootstrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XrCamera {
    pub pose: Transform,
}

impl Default for XrCamera {
    fn default() -> Self {
        // Standing eye height, matching the sample scene's start pose.
        Self {
            pose: Transform::from_position(Vec3::new(0.0, 1.6, 0.0)),
        }
    }
}

/// What a successful session bootstrap hands back to the caller.
#[derive(Debug, Clone, Copy)]
pub struct XrSessionInfo {
    pub camera: XrCamera,
}

/// Errors from the runtime boundary.
#[derive(Debug, thiserror::Error)]
pub enum XrError {
    #[error("session already started")]
    AlreadyStarted,
    #[error("runtime unavailable: {0}")]
    Unavailable(String),
}

/// The external XR engine seam.
///
/// Session negotiation is genuinely asynchronous on real backends, so
/// `start_session` is async and must be awaited to completion before the
/// frame loop begins polling. Controllers appearing and disappearing are
/// conveyed per frame through `poll_frame`: a `None` slot is a controller
/// that is not currently tracked.
#[allow(async_fn_in_trait)]
pub trait XrRuntime {
    /// One-time session bootstrap. Returns the camera handle.
    async fn start_session(&mut self) -> Result<XrSessionInfo, XrError>;

    /// Sample both controllers for the current frame.
    fn poll_frame(&mut self) -> FrameInput;
}
