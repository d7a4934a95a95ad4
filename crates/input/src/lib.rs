//! Controller input: per-frame polling state, edge detection, control events.
//!
//! Raw controller samples are diffed against the previous poll and mapped to
//! a shared tagged event enum that downstream consumers match on; nothing
//! here registers per-control callbacks.
//!
//! # Invariants
//! - An edge event is produced iff the polled state differs from the
//!   immediately preceding poll for that controller.
//! - A disconnected hand contributes no events (skip, not error).
//! - Event order within a frame is deterministic: left hand before right,
//!   connection transitions before button edges, buttons in declaration
//!   order, axis last.

pub mod rig;
pub mod state;

pub use rig::{log_event, ControlEvent, FrameInput, InputRig};
pub use state::{AxisState, ButtonId, ButtonState, ControllerInput, ControllerState, BUTTON_COUNT};

pub fn crate_info() -> &'static str {
    "vrspace-input v0.1.0"
}
