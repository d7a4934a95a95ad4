//! Scene graph truth: nodes, parenting, mutation event log.
//!
//! # Invariants
//! - All state mutations flow through explicit operations and append a
//!   `SceneEvent`.
//! - Parent links form a forest; `attach` rejects cycles.
//! - Reparenting preserves a node's world pose.
//! - Query order is node registration order, not id order.

pub mod graph;

pub use graph::{Collider, NodeData, SceneError, SceneEvent, SceneGraph};

pub fn crate_info() -> &'static str {
    "vrspace-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
