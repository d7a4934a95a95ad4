use std::collections::VecDeque;

use vrspace_input::FrameInput;

use crate::runtime::{XrError, XrRuntime, XrSessionInfo};

/// Deterministic runtime that replays a pre-built sequence of frame
/// samples. Once the script runs out, every further poll reports both
/// controllers disconnected.
///
/// This is the swap-in implementation used by tests and the headless demo;
/// a device-backed runtime implements the same trait.
#[derive(Debug, Clone, Default)]
pub struct ScriptedXr {
    frames: VecDeque<FrameInput>,
    started: bool,
}

impl ScriptedXr {
    /// A runtime with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime that will replay the given frames in order.
    pub fn from_frames(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            started: false,
        }
    }

    /// Append one frame to the script.
    pub fn push_frame(&mut self, frame: FrameInput) {
        self.frames.push_back(frame);
    }

    /// Append the same frame `count` times.
    pub fn push_repeated(&mut self, frame: FrameInput, count: usize) {
        for _ in 0..count {
            self.frames.push_back(frame);
        }
    }

    /// Frames remaining in the script.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl XrRuntime for ScriptedXr {
    async fn start_session(&mut self) -> Result<XrSessionInfo, XrError> {
        if self.started {
            return Err(XrError::AlreadyStarted);
        }
        self.started = true;
        tracing::debug!("scripted XR session started ({} frames)", self.frames.len());
        Ok(XrSessionInfo {
            camera: Default::default(),
        })
    }

    fn poll_frame(&mut self) -> FrameInput {
        self.frames.pop_front().unwrap_or_default()
    }
}
