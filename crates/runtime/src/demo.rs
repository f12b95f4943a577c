//! The demo scene: camera, two lights, one textured cube, an axes helper.

use crate::config::SceneConfig;
use glam::Vec3;
use texcube_common::{NodeId, Transform};
use texcube_scene::{Color, Geometry, Material, NodeKind, SceneGraph};

/// The scene plus handles to the nodes the frame loop touches.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub scene: SceneGraph,
    pub cube: NodeId,
    pub camera: NodeId,
}

impl DemoScene {
    pub fn build(config: &SceneConfig) -> Self {
        let mut scene = SceneGraph::new();

        let camera = scene.add(
            "camera",
            NodeKind::Camera,
            Transform::from_position(Vec3::from_array(config.camera_position)),
        );
        scene.add(
            "ambient light",
            NodeKind::AmbientLight {
                color: Color::from_hex(0xffffff),
                intensity: 0.5,
            },
            Transform::default(),
        );
        scene.add(
            "point light",
            NodeKind::PointLight {
                color: Color::from_hex(0xffffff),
                intensity: 0.5,
            },
            Transform::from_position(Vec3::new(2.0, 3.0, 4.0)),
        );
        let cube = scene.add(
            "test cube",
            NodeKind::Mesh {
                geometry: Geometry::unit_box(),
                material: Material::basic(Some(config.texture_key())),
            },
            Transform::default(),
        );
        scene.add(
            "axes",
            NodeKind::AxesHelper { size: 1.0 },
            Transform::default(),
        );

        tracing::info!("demo scene built with {} nodes", scene.len());
        Self {
            scene,
            cube,
            camera,
        }
    }
}
