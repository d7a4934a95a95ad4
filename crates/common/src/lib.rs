//! Shared types for the vrspace workspace: handedness, ids, transforms.
//!
//! # Invariants
//! - `NodeId` ordering is stable so BTreeMap iteration is deterministic.
//! - `Transform` composition assumes TRS without shear.

pub mod types;

pub use types::{Hand, NodeId, Transform};

pub fn crate_info() -> &'static str {
    "vrspace-common v0.1.0"
}
