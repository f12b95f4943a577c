use crate::camera::PerspectiveCamera;
use crate::viewport::Viewport;
use std::convert::Infallible;
use std::fmt::Write as _;
use texcube_scene::{NodeKind, SceneGraph};

/// A drawable target that produces one frame per call to `render`.
///
/// Implementations read the scene and camera and never mutate them; the
/// scene graph is owned by the application context.
pub trait RenderSurface {
    type Error: std::error::Error;

    /// Resize the drawable buffer to match the viewport.
    fn resize(&mut self, viewport: &Viewport);

    /// Render one frame of the scene as seen through the camera.
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<(), Self::Error>;
}

/// Headless surface that renders a human-readable description of the frame.
///
/// Used by the CLI and by tests that need a surface without a GPU.
#[derive(Debug, Default)]
pub struct TextSurface {
    buffer_size: (u32, u32),
    pixel_ratio: f32,
    frames: u64,
    last_frame: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        self.buffer_size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }
}

impl RenderSurface for TextSurface {
    type Error = Infallible;

    fn resize(&mut self, viewport: &Viewport) {
        self.buffer_size = viewport.buffer_size();
        self.pixel_ratio = viewport.pixel_ratio();
    }

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<(), Infallible> {
        self.frames += 1;
        let mut out = String::new();
        let (w, h) = self.buffer_size;
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{} @{:.1}x) ===",
            self.frames, w, h, self.pixel_ratio
        );
        let p = camera.position;
        let t = camera.target();
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            p.x,
            p.y,
            p.z,
            t.x,
            t.y,
            t.z,
            camera.fov(),
            camera.aspect()
        );

        for (id, _) in scene.traverse() {
            let Some(node) = scene.get(id) else {
                continue;
            };
            if matches!(node.kind, NodeKind::Group) {
                continue;
            }
            let tr = &node.transform;
            let _ = writeln!(
                out,
                "  {} '{}' pos=({:.2}, {:.2}, {:.2}) rot=({:.2}, {:.2}, {:.2})",
                node.kind.label(),
                node.name,
                tr.position.x,
                tr.position.y,
                tr.position.z,
                tr.rotation.x,
                tr.rotation.y,
                tr.rotation.z
            );
        }

        self.last_frame = out;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use texcube_common::{Dimensions, Transform};
    use texcube_scene::{Geometry, Material};

    #[test]
    fn text_surface_empty_scene() {
        let scene = SceneGraph::new();
        let camera = PerspectiveCamera::default();
        let mut surface = TextSurface::new();
        surface.render(&scene, &camera).unwrap();

        assert_eq!(surface.frames(), 1);
        assert!(surface.last_frame().contains("Frame 1"));
        assert!(surface.last_frame().contains("Camera:"));
    }

    #[test]
    fn text_surface_lists_nodes() {
        let mut scene = SceneGraph::new();
        scene.add(
            "cube",
            NodeKind::Mesh {
                geometry: Geometry::unit_box(),
                material: Material::basic(None),
            },
            Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
        );
        let mut surface = TextSurface::new();
        let camera = PerspectiveCamera::default();
        surface.render(&scene, &camera).unwrap();

        assert!(surface.last_frame().contains("mesh 'cube'"));
        assert!(surface.last_frame().contains("pos=(1.00, 2.00, 3.00)"));
    }

    #[test]
    fn resize_tracks_viewport() {
        let mut surface = TextSurface::new();
        let viewport = Viewport::new(Dimensions::new(1920, 1080), 3.0, 2.0);
        surface.resize(&viewport);
        assert_eq!(surface.buffer_size(), (3840, 2160));
        assert_eq!(surface.pixel_ratio(), 2.0);
    }
}
