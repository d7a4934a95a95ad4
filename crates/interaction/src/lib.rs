//! Grab-and-carry interaction: a one-slot state machine per controller.
//!
//! # Invariants
//! - A controller holds at most one object; a press while holding is a
//!   no-op.
//! - Holding terminates only via the squeeze release edge.
//! - Candidate scan order is registration order; the scan short-circuits
//!   on the first bounding volume containing the grip point.
//! - A grab attempt that intersects nothing is silently ignored.

pub mod grab;

pub use grab::{node_contains_point, GrabController, GrabState};

pub fn crate_info() -> &'static str {
    "vrspace-interaction v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("interaction"));
    }
}
