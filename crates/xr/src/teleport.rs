use vrspace_common::NodeId;

/// Floor-mesh registrar for the locomotion system.
///
/// Teleportation itself is engine-provided; this side of the boundary only
/// records which meshes are valid teleport targets. Registration order is
/// preserved and duplicates are ignored.
#[derive(Debug, Clone, Default)]
pub struct Teleportation {
    floors: Vec<NodeId>,
}

impl Teleportation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh as a valid teleport floor.
    pub fn add_floor_mesh(&mut self, id: NodeId) {
        if self.floors.contains(&id) {
            return;
        }
        tracing::debug!("registered floor mesh {id}");
        self.floors.push(id);
    }

    /// Number of registered floor meshes.
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Whether a mesh is a registered teleport floor.
    pub fn is_floor(&self, id: NodeId) -> bool {
        self.floors.contains(&id)
    }

    /// Registered floors, in registration order.
    pub fn floors(&self) -> &[NodeId] {
        &self.floors
    }
}
