use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vrspace_common::{NodeId, Transform};

/// Bounding volume used for grab intersection tests, in node-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Collider {
    /// Whether a point expressed in node-local space lies inside the volume.
    pub fn contains_local(&self, point: Vec3) -> bool {
        match self {
            Collider::Box { half_extents } => {
                point.x.abs() <= half_extents.x
                    && point.y.abs() <= half_extents.y
                    && point.z.abs() <= half_extents.z
            }
            Collider::Sphere { radius } => point.length_squared() <= radius * radius,
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::Box {
            half_extents: Vec3::splat(0.5),
        }
    }
}

/// An event record produced by every mutation to the scene graph.
///
/// The event log is the observability surface: tests and tooling read it to
/// verify which structural commands were actually issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Node was registered with the given name.
    NodeAdded { id: NodeId, name: String },
    /// Node local transform was updated.
    TransformUpdated {
        id: NodeId,
        old: Transform,
        new: Transform,
    },
    /// Node was reparented under `parent`, world pose preserved.
    Attached { node: NodeId, parent: NodeId },
    /// Node was reparented to world space, world pose preserved.
    Detached { node: NodeId },
}

/// Per-node data stored in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub name: String,
    pub local: Transform,
    pub parent: Option<NodeId>,
    pub collider: Option<Collider>,
}

/// Errors from scene graph operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("attaching {node} under {parent} would form a cycle")]
    WouldCycle { node: NodeId, parent: NodeId },
}

/// The scene graph.
///
/// Nodes live in a BTreeMap for deterministic id-keyed access; a separate
/// registration-order list backs the ordered queries (`children_of`,
/// `nodes_with_prefix`). Grab tie-breaking resolves in registration order,
/// which uuid-keyed iteration cannot provide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, NodeData>,
    order: Vec<NodeId>,
    #[serde(skip)]
    event_log: Vec<SceneEvent>,
}

impl SceneGraph {
    /// Create an empty scene graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in registration order.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Register a root-level node. Returns its id.
    pub fn add_node(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        let id = NodeId::new();
        let name = name.into();
        self.nodes.insert(
            id,
            NodeData {
                name: name.clone(),
                local,
                parent: None,
                collider: None,
            },
        );
        self.order.push(id);
        self.event_log.push(SceneEvent::NodeAdded { id, name });
        id
    }

    /// Register a node under an existing parent. The local transform is
    /// relative to the parent.
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        local: Transform,
        parent: NodeId,
    ) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let id = self.add_node(name, local);
        // Safe: just inserted.
        if let Some(data) = self.nodes.get_mut(&id) {
            data.parent = Some(parent);
        }
        Ok(id)
    }

    /// Get a reference to node data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    /// Current parent of a node, if any.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Assign a bounding volume to a node.
    pub fn set_collider(&mut self, id: NodeId, collider: Collider) -> Result<(), SceneError> {
        let data = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        data.collider = Some(collider);
        Ok(())
    }

    /// Update a node's local transform and log the change.
    pub fn set_local_transform(&mut self, id: NodeId, new: Transform) -> Result<(), SceneError> {
        let data = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        let old = data.local;
        data.local = new;
        self.event_log.push(SceneEvent::TransformUpdated { id, old, new });
        Ok(())
    }

    /// Compute a node's world transform by walking its parent chain.
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let node = self.nodes.get(&id)?;
        let mut world = node.local;
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.nodes.get(&parent_id)?;
            world = parent.local.compose(&world);
            current = parent.parent;
        }
        Some(world)
    }

    /// Reparent `node` under `parent`, preserving the node's world pose.
    ///
    /// Rejects unknown nodes, self-parenting, and any attach that would
    /// form a cycle.
    pub fn attach(&mut self, node: NodeId, parent: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&node) {
            return Err(SceneError::NodeNotFound(node));
        }
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        if node == parent || self.is_ancestor(node, parent) {
            return Err(SceneError::WouldCycle { node, parent });
        }

        // Both lookups succeed: the ids were checked above.
        let world = self
            .world_transform(node)
            .ok_or(SceneError::NodeNotFound(node))?;
        let parent_world = self
            .world_transform(parent)
            .ok_or(SceneError::NodeNotFound(parent))?;
        let local = Transform::relative_to(&world, &parent_world);

        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = Some(parent);
            data.local = local;
        }
        self.event_log.push(SceneEvent::Attached { node, parent });
        tracing::debug!("attached {node} under {parent}");
        Ok(())
    }

    /// Reparent `node` to world space, preserving its world pose.
    ///
    /// A node that is already at the root is left untouched and no event is
    /// logged.
    pub fn detach(&mut self, node: NodeId) -> Result<(), SceneError> {
        let world = self
            .world_transform(node)
            .ok_or(SceneError::NodeNotFound(node))?;
        let data = self
            .nodes
            .get_mut(&node)
            .ok_or(SceneError::NodeNotFound(node))?;
        if data.parent.is_none() {
            return Ok(());
        }
        data.parent = None;
        data.local = world;
        self.event_log.push(SceneEvent::Detached { node });
        tracing::debug!("detached {node} to world space");
        Ok(())
    }

    /// Direct children of a node, in registration order.
    pub fn children_of(&self, parent: NodeId) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.parent_of(*id) == Some(parent))
            .collect()
    }

    /// Nodes whose name starts with `prefix`, in registration order.
    pub fn nodes_with_prefix(&self, prefix: &str) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|n| n.name.starts_with(prefix))
            })
            .collect()
    }

    /// First node with the exact name, in registration order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.nodes.get(id).is_some_and(|n| n.name == name))
    }

    /// Whether `ancestor` appears on `node`'s parent chain (or is the node).
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }
}
