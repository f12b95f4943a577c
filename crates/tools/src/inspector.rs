use serde::Serialize;
use texcube_common::NodeId;
use texcube_scene::{NodeKind, SceneGraph};

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against the scene graph for the debug panel
/// and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &SceneGraph) -> SceneSummary {
        let mut summary = SceneSummary {
            node_count: scene.len(),
            meshes: 0,
            lights: 0,
            helpers: 0,
        };
        for (id, _) in scene.traverse() {
            match scene.get(id).map(|n| &n.kind) {
                Some(NodeKind::Mesh { .. }) => summary.meshes += 1,
                Some(NodeKind::AmbientLight { .. } | NodeKind::PointLight { .. }) => {
                    summary.lights += 1
                }
                Some(NodeKind::AxesHelper { .. }) => summary.helpers += 1,
                _ => {}
            }
        }
        summary
    }

    /// Report on a single node, with its world-space position.
    pub fn inspect_node(scene: &SceneGraph, id: NodeId) -> Option<NodeReport> {
        let node = scene.get(id)?;
        let world = scene.world_matrix(id)?.transform_point3(glam::Vec3::ZERO);
        let t = node.transform;
        Some(NodeReport {
            id,
            name: node.name.clone(),
            kind: node.kind.label(),
            parent: node.parent,
            position: t.position.to_array(),
            rotation: t.rotation.to_array(),
            scale: t.scale.to_array(),
            world_position: world.to_array(),
        })
    }

    /// Report every node in traversal order.
    pub fn list_nodes(scene: &SceneGraph) -> Vec<NodeReport> {
        scene
            .traverse()
            .into_iter()
            .filter_map(|(id, _)| Self::inspect_node(scene, id))
            .collect()
    }
}

/// Summary of the scene for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub node_count: usize,
    pub meshes: usize,
    pub lights: usize,
    pub helpers: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} meshes={} lights={} helpers={}",
            self.node_count, self.meshes, self.lights, self.helpers
        )
    }
}

/// Detailed info about a single node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    pub id: NodeId,
    pub name: String,
    pub kind: &'static str,
    pub parent: Option<NodeId>,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub world_position: [f32; 3],
}

impl std::fmt::Display for NodeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} '{}' pos=({:.2}, {:.2}, {:.2}) rot=({:.2}, {:.2}, {:.2})",
            self.id.short(),
            self.kind,
            self.name,
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
        )
    }
}
