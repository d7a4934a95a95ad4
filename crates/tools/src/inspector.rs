use vrspace_common::NodeId;
use vrspace_scene::SceneGraph;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against scene state for debugging and
/// development output.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &SceneGraph) -> SceneSummary {
        SceneSummary {
            node_count: scene.node_count(),
            root_count: scene
                .ids()
                .iter()
                .filter(|id| scene.parent_of(**id).is_none())
                .count(),
            pending_events: scene.events().len(),
        }
    }

    /// Inspect a single node's placement.
    pub fn inspect_node(scene: &SceneGraph, id: NodeId) -> Option<NodeInfo> {
        let data = scene.get(id)?;
        let world = scene.world_transform(id)?;
        Some(NodeInfo {
            id,
            name: data.name.clone(),
            parent: data.parent,
            world_position: [world.position.x, world.position.y, world.position.z],
        })
    }

    /// All node ids in registration order.
    pub fn list_nodes(scene: &SceneGraph) -> Vec<NodeId> {
        scene.ids().to_vec()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub node_count: usize,
    pub root_count: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} roots={} pending_events={}",
            self.node_count, self.root_count, self.pending_events
        )
    }
}

/// Detailed info about a single node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub world_position: [f32; 3],
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node [{}] '{}' world=({:.2}, {:.2}, {:.2})",
            self.id,
            self.name,
            self.world_position[0],
            self.world_position[1],
            self.world_position[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use vrspace_common::Transform;

    #[test]
    fn summary_empty_scene() {
        let scene = SceneGraph::new();
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.node_count, 0);
        assert_eq!(summary.root_count, 0);
    }

    #[test]
    fn summary_counts_roots_and_events() {
        let mut scene = SceneGraph::new();
        let root = scene.add_node("root", Transform::default());
        scene.add_child("leaf", Transform::default(), root).unwrap();
        scene.add_node("other_root", Transform::default());

        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.root_count, 2);
        assert_eq!(summary.pending_events, 3);
    }

    #[test]
    fn inspect_node_found() {
        let mut scene = SceneGraph::new();
        let id = scene.add_node(
            "crate",
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
        );
        let info = SceneInspector::inspect_node(&scene, id).unwrap();
        assert_eq!(info.name, "crate");
        assert_eq!(info.world_position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn inspect_node_not_found() {
        let scene = SceneGraph::new();
        assert!(SceneInspector::inspect_node(&scene, NodeId::new()).is_none());
    }

    #[test]
    fn list_nodes_in_registration_order() {
        let mut scene = SceneGraph::new();
        let a = scene.add_node("a", Transform::default());
        let b = scene.add_node("b", Transform::default());
        assert_eq!(SceneInspector::list_nodes(&scene), vec![a, b]);
    }

    #[test]
    fn summary_display() {
        let scene = SceneGraph::new();
        let s = format!("{}", SceneInspector::summary(&scene));
        assert!(s.contains("nodes=0"));
    }
}
