//! Developer tooling: read-only queries against scene state.

pub mod inspector;

pub use inspector::{NodeInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "vrspace-tools v0.1.0"
}
