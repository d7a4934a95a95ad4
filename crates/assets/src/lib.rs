//! Environment assets: manifest loading, content-addressed ids, scene
//! instantiation.
//!
//! The environment is described by a JSON manifest listing named meshes,
//! optionally grouped under a parent node. Two naming conventions are the
//! only format contract in the system: meshes whose name starts with the
//! configured floor prefix become teleport floors, and meshes grouped under
//! the configured props group become grabbable.
//!
//! # Invariants
//! - `AssetId` is a content hash: identical manifests get identical ids.
//! - Instantiation preserves manifest order, so grab tie-breaking and
//!   floor registration are deterministic.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use vrspace_common::{NodeId, Transform};
use vrspace_scene::{Collider, SceneError, SceneGraph};

/// Content-addressed id computed from manifest data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

/// One mesh entry in the environment manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDef {
    pub name: String,
    /// Parent group node, created under the root on first use.
    #[serde(default)]
    pub group: Option<String>,
    /// Position relative to the group (or the root when ungrouped).
    #[serde(default)]
    pub position: Vec3,
    /// Bounding volume for grab intersection. Meshes without one are
    /// scenery: never grabbable.
    #[serde(default)]
    pub collider: Option<Collider>,
}

/// The environment asset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentManifest {
    pub name: String,
    #[serde(default)]
    pub root_position: Vec3,
    pub meshes: Vec<MeshDef>,
}

impl EnvironmentManifest {
    /// Load a manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let manifest: Self = serde_json::from_reader(file)?;
        Ok(manifest)
    }

    /// Save the manifest to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Content hash over the manifest fields.
    pub fn asset_id(&self) -> AssetId {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hash_vec3(&mut hasher, self.root_position);
        for mesh in &self.meshes {
            hasher.update(mesh.name.as_bytes());
            if let Some(group) = &mesh.group {
                hasher.update(group.as_bytes());
            }
            hash_vec3(&mut hasher, mesh.position);
            match mesh.collider {
                None => hasher.update([0u8]),
                Some(Collider::Box { half_extents }) => {
                    hasher.update([1u8]);
                    hash_vec3(&mut hasher, half_extents);
                }
                Some(Collider::Sphere { radius }) => {
                    hasher.update([2u8]);
                    hasher.update(radius.to_le_bytes());
                }
            }
        }
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        AssetId(u64::from_le_bytes(bytes))
    }

    /// The built-in sample environment: two terrain tiles, a scenery rock,
    /// and a props group with a box and a sphere at standing reach.
    pub fn demo() -> Self {
        Self {
            name: "world".into(),
            root_position: Vec3::new(0.0, 0.5, 0.0),
            meshes: vec![
                MeshDef {
                    name: "rpgpp_lt_terrain_01".into(),
                    group: None,
                    position: Vec3::ZERO,
                    collider: None,
                },
                MeshDef {
                    name: "rpgpp_lt_terrain_02".into(),
                    group: None,
                    position: Vec3::new(8.0, 0.0, 0.0),
                    collider: None,
                },
                MeshDef {
                    name: "rock_01".into(),
                    group: None,
                    position: Vec3::new(2.0, 0.0, 3.0),
                    collider: None,
                },
                MeshDef {
                    name: "wooden_box".into(),
                    group: Some("Props".into()),
                    position: Vec3::new(-0.6, 0.6, -0.4),
                    collider: Some(Collider::Box {
                        half_extents: Vec3::splat(0.3),
                    }),
                },
                MeshDef {
                    name: "stone_sphere".into(),
                    group: Some("Props".into()),
                    position: Vec3::new(0.6, 0.6, -0.4),
                    collider: Some(Collider::Sphere { radius: 0.3 }),
                },
            ],
        }
    }
}

/// The naming conventions that classify environment meshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Meshes whose name starts with this prefix register as teleport
    /// floors.
    pub floor_prefix: String,
    /// Meshes grouped under this node become grabbable.
    pub props_group: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            floor_prefix: "rpgpp_lt_terrain".into(),
            props_group: "Props".into(),
        }
    }
}

/// An instantiated environment: node ids into the scene graph.
#[derive(Debug, Clone)]
pub struct Environment {
    pub id: AssetId,
    pub root: NodeId,
    /// Floor meshes in manifest order.
    pub floors: Vec<NodeId>,
    /// Grabbable props in manifest order.
    pub props: Vec<NodeId>,
    /// Group nodes by name.
    pub groups: BTreeMap<String, NodeId>,
}

/// Build scene nodes for every manifest mesh and classify floors and props.
pub fn instantiate(
    manifest: &EnvironmentManifest,
    config: &EnvironmentConfig,
    scene: &mut SceneGraph,
) -> Result<Environment, AssetError> {
    let root = scene.add_node(
        manifest.name.clone(),
        Transform::from_position(manifest.root_position),
    );

    let mut groups: BTreeMap<String, NodeId> = BTreeMap::new();
    let mut floors = Vec::new();
    let mut props = Vec::new();

    for mesh in &manifest.meshes {
        let parent = match &mesh.group {
            None => root,
            Some(group) => match groups.get(group) {
                Some(&id) => id,
                None => {
                    let id = scene.add_child(group.clone(), Transform::default(), root)?;
                    groups.insert(group.clone(), id);
                    id
                }
            },
        };

        let id = scene.add_child(
            mesh.name.clone(),
            Transform::from_position(mesh.position),
            parent,
        )?;
        if let Some(collider) = mesh.collider {
            scene.set_collider(id, collider)?;
        }

        if mesh.name.starts_with(&config.floor_prefix) {
            floors.push(id);
        }
        if mesh.group.as_deref() == Some(config.props_group.as_str()) {
            props.push(id);
        }
    }

    tracing::debug!(
        "instantiated environment '{}': {} meshes, {} floors, {} props",
        manifest.name,
        manifest.meshes.len(),
        floors.len(),
        props.len()
    );

    Ok(Environment {
        id: manifest.asset_id(),
        root,
        floors,
        props,
        groups,
    })
}

fn hash_vec3(hasher: &mut Sha256, v: Vec3) {
    hasher.update(v.x.to_le_bytes());
    hasher.update(v.y.to_le_bytes());
    hasher.update(v.z.to_le_bytes());
}

pub fn crate_info() -> &'static str {
    "vrspace-assets v0.1.0"
}
