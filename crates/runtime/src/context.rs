use crate::clock::{Clock, FrameStats};
use crate::config::SceneConfig;
use crate::demo::DemoScene;
use crate::fullscreen::{Presentation, toggle_fullscreen};
use glam::Vec3;
use std::time::Instant;
use texcube_common::{Dimensions, NodeId};
use texcube_input::{EventQueue, PointerButton, SceneEvent};
use texcube_render::{OrbitControls, PerspectiveCamera, RenderSurface, Viewport};
use texcube_scene::SceneGraph;
use texcube_tools::{DebugPanel, PanelError};

/// Everything the demo owns, constructed once at startup.
///
/// Hosts push events with [`AppContext::push`], drain them with
/// [`AppContext::process_events`], and call [`AppContext::tick`] once per
/// display refresh.
pub struct AppContext {
    config: SceneConfig,
    scene: SceneGraph,
    cube: NodeId,
    camera_node: NodeId,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    panel: DebugPanel,
    viewport: Viewport,
    clock: Clock,
    last_tick: Instant,
    stats: FrameStats,
    events: EventQueue,
}

impl AppContext {
    pub fn new(
        config: SceneConfig,
        dimensions: Dimensions,
        scale_factor: f64,
        now: Instant,
    ) -> Self {
        let DemoScene {
            scene,
            cube,
            camera: camera_node,
        } = DemoScene::build(&config);

        let viewport = Viewport::new(dimensions, scale_factor, config.max_pixel_ratio);

        let mut camera = PerspectiveCamera::new(config.fov_degrees, viewport.aspect());
        camera.position = Vec3::from_array(config.camera_position);
        let cube_position = scene
            .transform(cube)
            .map(|t| t.position)
            .unwrap_or(Vec3::ZERO);
        camera.look_at(cube_position);

        let mut controls = OrbitControls::new(cube_position).with_damping(config.damping_factor);
        controls.set_viewport_height(dimensions.height);

        let panel = DebugPanel::for_position(
            cube,
            config.slider_min,
            config.slider_max,
            config.slider_step,
        );

        Self {
            config,
            scene,
            cube,
            camera_node,
            camera,
            controls,
            panel,
            viewport,
            clock: Clock::new(now),
            last_tick: now,
            stats: FrameStats::default(),
            events: EventQueue::new(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The animated demo mesh.
    pub fn cube(&self) -> NodeId {
        self.cube
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn panel(&self) -> &DebugPanel {
        &self.panel
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Size a freshly created surface to the current viewport.
    pub fn configure_surface<S: RenderSurface>(&self, surface: &mut S) {
        surface.resize(&self.viewport);
    }

    pub fn push(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Handle every queued event, oldest first.
    pub fn process_events<S: RenderSurface, P: Presentation>(
        &mut self,
        surface: &mut S,
        presentation: &P,
    ) {
        if !self.events.is_empty() {
            tracing::trace!("processing {} queued events", self.events.len());
        }
        while let Some(event) = self.events.pop() {
            self.handle(event, surface, presentation);
        }
    }

    pub fn handle<S: RenderSurface, P: Presentation>(
        &mut self,
        event: SceneEvent,
        surface: &mut S,
        presentation: &P,
    ) {
        match event {
            SceneEvent::Resized {
                dimensions,
                scale_factor,
            } => self.resize(dimensions, scale_factor, surface),
            SceneEvent::ToggleFullscreen => toggle_fullscreen(presentation),
            SceneEvent::PointerDrag {
                button: PointerButton::Primary,
                dx,
                dy,
            } => self.controls.rotate_drag(dx, dy),
            SceneEvent::PointerDrag {
                button: PointerButton::Secondary,
                dx,
                dy,
            } => self.controls.pan_drag(&self.camera, dx, dy),
            SceneEvent::Zoom(notches) => self.controls.zoom(notches),
            SceneEvent::SetSlider { index, value } => {
                if let Err(e) = self.set_slider(index, value) {
                    tracing::warn!("slider write dropped: {e}");
                }
            }
            SceneEvent::TogglePanel => self.panel.toggle_visible(),
        }
    }

    /// Propagate new window dimensions to the camera and the surface.
    pub fn resize<S: RenderSurface>(
        &mut self,
        dimensions: Dimensions,
        scale_factor: f64,
        surface: &mut S,
    ) {
        self.viewport.resize(dimensions, scale_factor);
        self.camera.set_aspect(self.viewport.aspect());
        self.controls.set_viewport_height(dimensions.height);
        surface.resize(&self.viewport);
        let (bw, bh) = self.viewport.buffer_size();
        tracing::debug!(
            "resized to {}x{} (buffer {bw}x{bh} @{:.2}x)",
            dimensions.width,
            dimensions.height,
            self.viewport.pixel_ratio()
        );
    }

    /// Write a debug panel slider through to the scene.
    pub fn set_slider(&mut self, index: usize, value: f32) -> Result<f32, PanelError> {
        self.panel.set(&mut self.scene, index, value)
    }

    /// Run one frame: timing, controls, animation, render.
    pub fn tick<S: RenderSurface>(
        &mut self,
        now: Instant,
        surface: &mut S,
    ) -> Result<FrameStats, S::Error> {
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        let elapsed = self.clock.elapsed_at(now);
        self.stats.record(delta, elapsed);

        self.controls.update(&mut self.camera);

        let t = elapsed.as_secs_f32();
        if let Some(node) = self.scene.get_mut(self.cube) {
            node.transform.rotation.x = t;
            node.transform.rotation.y = t;
        }
        if let Some(node) = self.scene.get_mut(self.camera_node) {
            node.transform.position = self.camera.position;
        }

        surface.render(&self.scene, &self.camera)?;
        tracing::trace!(
            frame = self.stats.frame,
            ms = self.stats.frame_ms(),
            fps = self.stats.fps,
            "frame"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fullscreen::tests::FakeWindow;
    use std::convert::Infallible;
    use std::time::Duration;
    use texcube_render::TextSurface;

    /// Surface double that records what each render saw.
    #[derive(Default)]
    struct RecordingSurface {
        buffer: (u32, u32),
        frames: Vec<Frame>,
    }

    struct Frame {
        camera_position: Vec3,
        cube_rotation: Vec3,
        cube_position: Vec3,
    }

    impl RenderSurface for RecordingSurface {
        type Error = Infallible;

        fn resize(&mut self, viewport: &Viewport) {
            self.buffer = viewport.buffer_size();
        }

        fn render(
            &mut self,
            scene: &SceneGraph,
            camera: &PerspectiveCamera,
        ) -> Result<(), Infallible> {
            let cube = scene.find_by_name("test cube").unwrap();
            let t = scene.transform(cube).unwrap();
            self.frames.push(Frame {
                camera_position: camera.position,
                cube_rotation: t.rotation,
                cube_position: t.position,
            });
            Ok(())
        }
    }

    fn context(w: u32, h: u32, t0: Instant) -> AppContext {
        AppContext::new(SceneConfig::default(), Dimensions::new(w, h), 1.0, t0)
    }

    #[test]
    fn initial_camera_looks_at_cube() {
        let ctx = context(800, 600, Instant::now());
        assert_eq!(ctx.camera().position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(ctx.camera().target(), Vec3::ZERO);
        assert!((ctx.camera().aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(ctx.camera().fov(), 55.0);
    }

    #[test]
    fn resize_scenario() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();
        ctx.configure_surface(&mut surface);
        assert_eq!(surface.buffer, (800, 600));

        ctx.push(SceneEvent::Resized {
            dimensions: Dimensions::new(1920, 1080),
            scale_factor: 1.0,
        });
        ctx.process_events(&mut surface, &FakeWindow::granting());

        assert!((ctx.camera().aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(surface.buffer, (1920, 1080));
    }

    #[test]
    fn aspect_tracks_every_resize() {
        let mut ctx = context(800, 600, Instant::now());
        let mut surface = RecordingSurface::default();
        for (w, h) in [(1, 1), (640, 480), (3000, 7), (7, 3000), (1024, 768)] {
            ctx.resize(Dimensions::new(w, h), 1.0, &mut surface);
            assert_eq!(ctx.camera().aspect(), w as f32 / h as f32);
        }
    }

    #[test]
    fn high_dpi_ratio_is_clamped() {
        let mut ctx = context(800, 600, Instant::now());
        let mut surface = RecordingSurface::default();
        ctx.resize(Dimensions::new(1000, 500), 3.0, &mut surface);
        assert_eq!(ctx.viewport().pixel_ratio(), 2.0);
        assert_eq!(surface.buffer, (2000, 1000));
    }

    #[test]
    fn rotation_equals_elapsed_seconds() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();

        for secs in [0.0, 0.5, 2.5, 10.0] {
            let now = t0 + Duration::from_secs_f32(secs);
            ctx.tick(now, &mut surface).unwrap();
            let frame = surface.frames.last().unwrap();
            assert!((frame.cube_rotation.x - secs).abs() < 1e-4);
            assert!((frame.cube_rotation.y - secs).abs() < 1e-4);
            assert_eq!(frame.cube_rotation.z, 0.0);
        }
    }

    #[test]
    fn rotation_is_monotonic_even_if_host_time_jumps_back() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();
        let later = t0 + Duration::from_secs(3);
        ctx.tick(later, &mut surface).unwrap();
        let earlier = t0 + Duration::from_secs(1);
        ctx.tick(earlier, &mut surface).unwrap();
        assert!(surface.frames[1].cube_rotation.x >= surface.frames[0].cube_rotation.x);
    }

    #[test]
    fn controls_update_before_render() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();
        let start = ctx.camera().position;

        ctx.push(SceneEvent::PointerDrag {
            button: PointerButton::Primary,
            dx: 100.0,
            dy: 0.0,
        });
        ctx.process_events(&mut surface, &FakeWindow::granting());
        let now = t0 + Duration::from_millis(16);
        ctx.tick(now, &mut surface).unwrap();

        let rendered = surface.frames[0].camera_position;
        assert_ne!(rendered, start);
        assert_eq!(rendered, ctx.camera().position);
        assert!((rendered.length() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn damped_drag_keeps_moving_after_input_stops() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();
        ctx.push(SceneEvent::PointerDrag {
            button: PointerButton::Primary,
            dx: 50.0,
            dy: 0.0,
        });
        ctx.process_events(&mut surface, &FakeWindow::granting());
        for i in 1..=3 {
            let now = t0 + Duration::from_millis(16 * i);
            ctx.tick(now, &mut surface).unwrap();
        }
        let p: Vec<Vec3> = surface.frames.iter().map(|f| f.camera_position).collect();
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
    }

    #[test]
    fn slider_write_visible_at_next_render() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();
        ctx.tick(t0, &mut surface).unwrap();

        ctx.set_slider(0, 12.3).unwrap();
        ctx.push(SceneEvent::SetSlider {
            index: 2,
            value: -4.0,
        });
        ctx.process_events(&mut surface, &FakeWindow::granting());
        let now = t0 + Duration::from_millis(16);
        ctx.tick(now, &mut surface).unwrap();

        let pos = surface.frames[1].cube_position;
        assert!((pos.x - 12.3).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
        assert!((pos.z + 4.0).abs() < 1e-4);
    }

    #[test]
    fn bad_slider_event_is_dropped() {
        let mut ctx = context(800, 600, Instant::now());
        let mut surface = RecordingSurface::default();
        let before = ctx.scene().transform(ctx.cube()).unwrap();
        ctx.push(SceneEvent::SetSlider {
            index: 7,
            value: 1.0,
        });
        ctx.process_events(&mut surface, &FakeWindow::granting());
        assert_eq!(ctx.scene().transform(ctx.cube()).unwrap(), before);
        assert_eq!(surface.buffer, (0, 0));
    }

    #[test]
    fn fullscreen_toggle_pair_returns_to_windowed() {
        let mut ctx = context(800, 600, Instant::now());
        let mut surface = RecordingSurface::default();
        let window = FakeWindow::granting();

        ctx.push(SceneEvent::ToggleFullscreen);
        ctx.process_events(&mut surface, &window);
        assert!(window.is_fullscreen());

        ctx.push(SceneEvent::ToggleFullscreen);
        ctx.process_events(&mut surface, &window);
        assert!(!window.is_fullscreen());
    }

    #[test]
    fn tick_records_frame_delta() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = TextSurface::new();
        let now = t0 + Duration::from_millis(10);
        ctx.tick(now, &mut surface).unwrap();
        let now = t0 + Duration::from_millis(26);
        let stats = ctx.tick(now, &mut surface).unwrap();
        assert_eq!(stats.frame, 2);
        assert_eq!(stats.delta, Duration::from_millis(16));
        assert_eq!(stats.elapsed, Duration::from_millis(26));
        assert_eq!(surface.frames(), 2);
    }

    #[test]
    fn zoom_and_pan_events_reach_controls() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();
        ctx.push(SceneEvent::Zoom(2.0));
        ctx.push(SceneEvent::PointerDrag {
            button: PointerButton::Secondary,
            dx: 0.0,
            dy: 30.0,
        });
        ctx.process_events(&mut surface, &FakeWindow::granting());
        for i in 1..=100 {
            let now = t0 + Duration::from_millis(16 * i);
            ctx.tick(now, &mut surface).unwrap();
        }
        assert!(ctx.controls().target.y > 0.0);
        let distance = (ctx.camera().position - ctx.controls().target).length();
        assert!(distance < 6.0);
    }

    #[test]
    fn panel_toggle_event() {
        let mut ctx = context(800, 600, Instant::now());
        let mut surface = RecordingSurface::default();
        ctx.push(SceneEvent::TogglePanel);
        ctx.process_events(&mut surface, &FakeWindow::granting());
        assert!(!ctx.panel().is_visible());
    }

    #[test]
    fn camera_node_mirrors_camera() {
        let t0 = Instant::now();
        let mut ctx = context(800, 600, t0);
        let mut surface = RecordingSurface::default();
        ctx.push(SceneEvent::PointerDrag {
            button: PointerButton::Primary,
            dx: 40.0,
            dy: 10.0,
        });
        ctx.process_events(&mut surface, &FakeWindow::granting());
        let now = t0 + Duration::from_millis(16);
        ctx.tick(now, &mut surface).unwrap();
        let node = ctx.scene().find_by_name("camera").unwrap();
        assert_eq!(
            ctx.scene().transform(node).unwrap().position,
            ctx.camera().position
        );
    }
}
