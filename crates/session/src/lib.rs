//! Session: one-time bootstrap, then the synchronous per-frame loop.
//!
//! # Invariants
//! - Bootstrap completes (awaited) before the first frame is polled.
//! - All per-frame logic runs synchronously inside `tick`; nothing blocks,
//!   suspends, or spawns background work.
//! - Missing input or missing intersection is a no-op, never an error.

pub mod session;

pub use session::{Session, SessionError};

pub fn crate_info() -> &'static str {
    "vrspace-session v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("session"));
    }
}
