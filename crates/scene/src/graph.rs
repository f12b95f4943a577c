use glam::{Mat4, Vec3};
use serde::Serialize;
use std::collections::BTreeMap;
use texcube_common::{NodeId, Transform};

/// Linear RGB colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0]);

    /// Build from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self([r, g, b])
    }

    pub fn scaled(self, k: f32) -> Self {
        Self([self.0[0] * k, self.0[1] * k, self.0[2] * k])
    }
}

/// Mesh geometry. Only axis-aligned boxes are needed so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
}

impl Geometry {
    pub fn unit_box() -> Self {
        Self::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }

    /// Scale applied to the unit mesh the renderer holds for this geometry.
    pub fn extent(&self) -> Vec3 {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaterialKind {
    /// Unlit: colour and texture only, lights are ignored.
    Basic,
    /// Diffuse-lit by the scene's ambient and point lights.
    Lambert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    /// Key of a texture registered with the renderer, usually the asset path.
    pub texture: Option<String>,
}

impl Material {
    pub fn basic(texture: Option<String>) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color: Color::WHITE,
            texture,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.kind == MaterialKind::Lambert
    }
}

/// What a node is. Every variant shares the node's transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    Group,
    AmbientLight { color: Color, intensity: f32 },
    PointLight { color: Color, intensity: f32 },
    Mesh {
        geometry: Geometry,
        material: Material,
    },
    Camera,
    AxesHelper { size: f32 },
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::AmbientLight { .. } => "ambient light",
            NodeKind::PointLight { .. } => "point light",
            NodeKind::Mesh { .. } => "mesh",
            NodeKind::Camera => "camera",
            NodeKind::AxesHelper { .. } => "axes helper",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),
}

/// The scene: a root group owning every other node.
///
/// Nodes live in a BTreeMap keyed by id; tree structure is carried by the
/// parent/children links. Traversal always starts at the root and follows
/// insertion order of children, so render order is stable.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    root: NodeId,
    nodes: BTreeMap<NodeId, Node>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a scene holding only its root group.
    pub fn new() -> Self {
        let root = NodeId::new();
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            Node {
                name: "scene".into(),
                kind: NodeKind::Group,
                transform: Transform::default(),
                parent: None,
                children: Vec::new(),
            },
        );
        Self { root, nodes }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Add a node directly under the root. Returns its id.
    pub fn add(&mut self, name: impl Into<String>, kind: NodeKind, transform: Transform) -> NodeId {
        let id = NodeId::new();
        self.attach(id, self.root, name.into(), kind, transform);
        id
    }

    /// Add a node under an existing parent.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        transform: Transform,
    ) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let id = NodeId::new();
        self.attach(id, parent, name.into(), kind, transform);
        Ok(id)
    }

    fn attach(
        &mut self,
        id: NodeId,
        parent: NodeId,
        name: String,
        kind: NodeKind,
        transform: Transform,
    ) {
        tracing::debug!("adding {} '{}' [{}]", kind.label(), name, id.short());
        self.nodes.insert(
            id,
            Node {
                name,
                kind,
                transform,
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// First node with the given name, in traversal order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse()
            .into_iter()
            .map(|(id, _)| id)
            .find(|id| self.nodes.get(id).is_some_and(|n| n.name == name))
    }

    pub fn transform(&self, id: NodeId) -> Result<Transform, SceneError> {
        self.nodes
            .get(&id)
            .map(|n| n.transform)
            .ok_or(SceneError::UnknownNode(id))
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))?;
        node.transform.position = position;
        Ok(())
    }

    /// Set Euler rotation angles in radians.
    pub fn set_rotation(&mut self, id: NodeId, rotation: Vec3) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))?;
        node.transform.rotation = rotation;
        Ok(())
    }

    /// Local-to-world matrix, composed along the parent chain.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.nodes.get(&id)?;
        let mut m = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            m = node.transform.matrix() * m;
        }
        Some(m)
    }

    /// Depth-first walk from the root, yielding every node with its world
    /// matrix. The root itself is included first.
    pub fn traverse(&self) -> Vec<(NodeId, Mat4)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let world = parent_world * node.transform.matrix();
            out.push((id, world));
            for child in node.children.iter().rev() {
                stack.push((*child, world));
            }
        }
        out
    }

    /// Sum of all ambient light contributions (colour * intensity).
    pub fn ambient(&self) -> Color {
        let mut sum = [0.0f32; 3];
        for node in self.nodes.values() {
            if let NodeKind::AmbientLight { color, intensity } = &node.kind {
                let c = color.scaled(*intensity);
                for (s, v) in sum.iter_mut().zip(c.0) {
                    *s += v;
                }
            }
        }
        Color(sum)
    }

    /// World position and radiance of the first point light, in traversal order.
    pub fn point_light(&self) -> Option<(Vec3, Color)> {
        self.traverse().into_iter().find_map(|(id, world)| {
            match self.nodes.get(&id).map(|n| &n.kind) {
                Some(NodeKind::PointLight { color, intensity }) => {
                    Some((world.transform_point3(Vec3::ZERO), color.scaled(*intensity)))
                }
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> NodeKind {
        NodeKind::Mesh {
            geometry: Geometry::unit_box(),
            material: Material::basic(None),
        }
    }

    #[test]
    fn scene_starts_with_root_only() {
        let s = SceneGraph::new();
        assert_eq!(s.len(), 1);
        assert!(s.is_empty());
        assert!(s.get(s.root()).is_some());
    }

    #[test]
    fn add_links_parent_and_child() {
        let mut s = SceneGraph::new();
        let id = s.add("cube", cube(), Transform::default());
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(id).unwrap().parent, Some(s.root()));
        assert_eq!(s.get(s.root()).unwrap().children, vec![id]);
    }

    #[test]
    fn add_child_to_unknown_parent_fails() {
        let mut s = SceneGraph::new();
        let err = s.add_child(
            NodeId::new(),
            "orphan",
            NodeKind::Group,
            Transform::default(),
        );
        assert!(matches!(err, Err(SceneError::UnknownNode(_))));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn set_position_updates_node() {
        let mut s = SceneGraph::new();
        let id = s.add("cube", cube(), Transform::default());
        s.set_position(id, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(s.transform(id).unwrap().position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn set_on_unknown_node_fails() {
        let mut s = SceneGraph::new();
        assert!(s.set_rotation(NodeId::new(), Vec3::ONE).is_err());
        assert!(s.transform(NodeId::new()).is_err());
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut s = SceneGraph::new();
        let parent = s.add("group", NodeKind::Group, Transform::from_position(Vec3::X));
        let child = s
            .add_child(parent, "cube", cube(), Transform::from_position(Vec3::Y))
            .unwrap();
        let p = s.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn traverse_is_depth_first_in_insertion_order() {
        let mut s = SceneGraph::new();
        let a = s.add("a", NodeKind::Group, Transform::default());
        let a1 = s
            .add_child(a, "a1", NodeKind::Group, Transform::default())
            .unwrap();
        let b = s.add("b", NodeKind::Group, Transform::default());
        let order: Vec<NodeId> = s.traverse().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![s.root(), a, a1, b]);
    }

    #[test]
    fn find_by_name() {
        let mut s = SceneGraph::new();
        let id = s.add("test cube", cube(), Transform::default());
        assert_eq!(s.find_by_name("test cube"), Some(id));
        assert_eq!(s.find_by_name("missing"), None);
    }

    #[test]
    fn lights_are_summarised() {
        let mut s = SceneGraph::new();
        s.add(
            "ambient",
            NodeKind::AmbientLight {
                color: Color::WHITE,
                intensity: 0.5,
            },
            Transform::default(),
        );
        s.add(
            "point",
            NodeKind::PointLight {
                color: Color::from_hex(0xffffff),
                intensity: 0.5,
            },
            Transform::from_position(Vec3::new(2.0, 3.0, 4.0)),
        );
        assert_eq!(s.ambient(), Color([0.5, 0.5, 0.5]));
        let (pos, radiance) = s.point_light().unwrap();
        assert!(pos.abs_diff_eq(Vec3::new(2.0, 3.0, 4.0), 1e-6));
        assert_eq!(radiance, Color([0.5, 0.5, 0.5]));
    }

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex(0xff0000), Color([1.0, 0.0, 0.0]));
        assert_eq!(Color::from_hex(0x000000), Color([0.0, 0.0, 0.0]));
    }

    #[test]
    fn material_lighting() {
        assert!(!Material::basic(None).is_lit());
        let lit = Material {
            kind: MaterialKind::Lambert,
            ..Material::basic(None)
        };
        assert!(lit.is_lit());
    }
}
