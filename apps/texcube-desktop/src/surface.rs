use std::sync::Arc;
use texcube_render::{PerspectiveCamera, RenderSurface, Viewport};
use texcube_render_wgpu::{RenderError, TextureImage, WgpuRenderer};
use texcube_runtime::{FullscreenError, Presentation};
use texcube_scene::SceneGraph;
use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Prefer a non-sRGB format so texture and clear colours are written as-is.
pub fn preferred_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or(formats.first())
        .copied()
}

/// The window's physical size when it differs from the swapchain extent.
/// Hosts with a scale factor above the pixel ratio cap get a smaller buffer
/// that the compositor stretches.
pub fn extent_mismatch(buffer: (u32, u32), window: PhysicalSize<u32>) -> Option<(u32, u32)> {
    let physical = (window.width.max(1), window.height.max(1));
    (physical != buffer).then_some(physical)
}

/// The window's swapchain plus everything drawn into it: the scene renderer
/// and the egui debug overlay.
pub struct GpuSurface {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pixel_ratio: f32,
    renderer: WgpuRenderer,
    egui_renderer: egui_wgpu::Renderer,
    overlay: Option<Vec<egui::ClippedPrimitive>>,
    pending_free: Vec<egui::TextureId>,
}

impl GpuSurface {
    pub fn new(window: Arc<Window>) -> Result<Self, StartupError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let size = window.inner_size();
        let pixel_ratio = window.scale_factor() as f32;
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(StartupError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("texcube_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let caps = surface.get_capabilities(&adapter);
        let format = preferred_format(&caps.formats)
            .ok_or(StartupError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, &queue, format, config.width, config.height);
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend, surface format {format:?}",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pixel_ratio,
            renderer,
            egui_renderer,
            overlay: None,
            pending_free: Vec::new(),
        })
    }

    pub fn register_texture(&mut self, key: &str, image: &TextureImage) {
        self.renderer
            .register_texture(&self.device, &self.queue, key, image);
    }

    /// Queue the debug panel for the next rendered frame. Texture uploads
    /// happen now; frees wait until the overlay has been drawn.
    pub fn set_overlay(
        &mut self,
        primitives: Vec<egui::ClippedPrimitive>,
        textures: egui::TexturesDelta,
    ) {
        for (id, delta) in &textures.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        self.pending_free.extend(textures.free);
        self.overlay = Some(primitives);
    }

    fn paint_overlay(&mut self, view: &wgpu::TextureView) {
        let Some(primitives) = self.overlay.take() else {
            return;
        };
        // egui lays out in logical points; map them onto the buffer at the
        // applied pixel ratio, which may be below the host's.
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.pixel_ratio,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        let extra = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &primitives,
            &screen,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &primitives, &screen);
        }
        self.queue
            .submit(extra.into_iter().chain(std::iter::once(encoder.finish())));

        for id in self.pending_free.drain(..) {
            self.egui_renderer.free_texture(&id);
        }
    }
}

impl RenderSurface for GpuSurface {
    type Error = RenderError;

    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.buffer_size();
        self.config.width = width;
        self.config.height = height;
        self.pixel_ratio = viewport.pixel_ratio();
        if let Some((pw, ph)) = extent_mismatch((width, height), self.window.inner_size()) {
            tracing::debug!("swapchain {width}x{height} differs from window {pw}x{ph}");
        }
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, width, height);
    }

    fn render(
        &mut self,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                tracing::debug!("surface {e}, reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, scene, camera);
        self.paint_overlay(&view);
        output.present();
        Ok(())
    }
}

/// Fullscreen control for a winit window.
pub struct WindowPresentation<'a>(pub &'a Window);

impl Presentation for WindowPresentation<'_> {
    fn is_fullscreen(&self) -> bool {
        self.0.fullscreen().is_some()
    }

    fn enter_fullscreen(&self) -> Result<(), FullscreenError> {
        // `None` lets winit pick when the current monitor is unknown.
        self.0
            .set_fullscreen(Some(Fullscreen::Borderless(self.0.current_monitor())));
        Ok(())
    }

    fn exit_fullscreen(&self) -> Result<(), FullscreenError> {
        self.0.set_fullscreen(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texcube_common::Dimensions;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_linear_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(preferred_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            preferred_format(&formats),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(preferred_format(&[]), None);
    }

    #[test]
    fn clamped_ratio_leaves_buffer_below_window() {
        let viewport = Viewport::new(Dimensions::new(800, 600), 3.0, 2.0);
        let window = PhysicalSize::new(2400, 1800);
        assert_eq!(
            extent_mismatch(viewport.buffer_size(), window),
            Some((2400, 1800))
        );
    }

    #[test]
    fn unclamped_ratio_matches_window() {
        let viewport = Viewport::new(Dimensions::new(800, 600), 1.5, 2.0);
        let window = PhysicalSize::new(1200, 900);
        assert_eq!(extent_mismatch(viewport.buffer_size(), window), None);
    }
}
