//! XR runtime boundary: session bootstrap, per-frame polling, teleportation.
//!
//! # Invariants
//! - `start_session` completes before the first `poll_frame`.
//! - The runtime cannot mutate scene truth; it only supplies samples.
//!
//! # Workaround
//! Provides a trait-based runtime interface with a scripted, deterministic
//! implementation as a workaround for a real OpenXR/WebXR device backend.
//! The trait is stable; swap in a device-backed runtime without changing
//! consumers.

pub mod runtime;
pub mod scripted;
pub mod teleport;

pub use runtime::{XrCamera, XrError, XrRuntime, XrSessionInfo};
pub use scripted::ScriptedXr;
pub use teleport::Teleportation;

pub fn crate_info() -> &'static str {
    "vrspace-xr v0.1.0"
}
