use crate::input::{key_action, logical_dimensions, pointer_button, wheel_notches};
use crate::surface::{GpuSurface, StartupError, WindowPresentation};
use crate::ui;
use egui::Context as EguiContext;
use std::sync::Arc;
use std::time::Instant;
use texcube_input::{ClickTracker, PointerButton, PointerTracker, SceneEvent};
use texcube_render_wgpu::TextureImage;
use texcube_runtime::AppContext;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

/// Resources that exist only once the event loop has resumed.
struct Gpu {
    window: Arc<Window>,
    surface: GpuSurface,
    egui_winit: egui_winit::State,
}

pub struct GpuApp {
    context: AppContext,
    texture: TextureImage,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    pointer: PointerTracker,
    clicks: ClickTracker,
    startup_error: Option<StartupError>,
}

impl GpuApp {
    pub fn new(context: AppContext, texture: TextureImage) -> Self {
        Self {
            context,
            texture,
            gpu: None,
            egui_ctx: EguiContext::default(),
            pointer: PointerTracker::new(),
            clicks: ClickTracker::default(),
            startup_error: None,
        }
    }

    /// Fatal error raised while creating the window or GPU, if any.
    pub fn take_startup_error(&mut self) -> Option<StartupError> {
        self.startup_error.take()
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu, StartupError> {
        let config = self.context.config();
        let attrs = Window::default_attributes()
            .with_title("texcube")
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let mut surface = GpuSurface::new(window.clone())?;
        surface.register_texture(&config.texture_key(), &self.texture);

        let scale_factor = window.scale_factor();
        let dimensions = logical_dimensions(window.inner_size(), scale_factor);
        self.context.resize(dimensions, scale_factor, &mut surface);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(scale_factor as f32),
            None,
            None,
        );

        Ok(Gpu {
            window,
            surface,
            egui_winit,
        })
    }

    fn mouse_input(&mut self, state: ElementState, button: MouseButton) {
        let Some(button) = pointer_button(button) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                if button == PointerButton::Primary {
                    let pos = self.pointer.position().unwrap_or_default();
                    if self.clicks.press(Instant::now(), pos) {
                        self.context.push(SceneEvent::ToggleFullscreen);
                    }
                }
                self.pointer.press(button);
            }
            ElementState::Released => self.pointer.release(button),
        }
    }

    /// One display refresh: build the panel, apply queued input, run a tick.
    fn redraw(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let context = &self.context;
        let mut panel_events = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            panel_events = ui::draw_panel(ctx, context);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);
        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        gpu.surface
            .set_overlay(primitives, full_output.textures_delta);

        for event in panel_events {
            self.context.push(event);
        }
        self.context
            .process_events(&mut gpu.surface, &WindowPresentation(&gpu.window));

        if let Err(e) = self.context.tick(Instant::now(), &mut gpu.surface) {
            tracing::error!("frame dropped: {e}");
        }
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("startup failed: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let window = gpu.window.clone();
        let consumed = gpu.egui_winit.on_window_event(&window, &event).consumed;

        // Releases always reach the tracker so a drag that ends over the
        // panel does not stay latched.
        if let WindowEvent::MouseInput {
            state: ElementState::Released,
            button,
            ..
        } = event
        {
            self.mouse_input(ElementState::Released, button);
            return;
        }
        if consumed {
            // Restart the drag delta once the cursor is back over the scene.
            if matches!(event, WindowEvent::CursorMoved { .. }) {
                self.pointer.leave();
            }
            return;
        }

        let scale_factor = window.scale_factor();
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.context.push(SceneEvent::Resized {
                    dimensions: logical_dimensions(size, scale_factor),
                    scale_factor,
                });
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.context.push(SceneEvent::Resized {
                    dimensions: logical_dimensions(window.inner_size(), scale_factor),
                    scale_factor,
                });
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = key_action(key) {
                    self.context.push(action);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(state, button),
            WindowEvent::CursorMoved { position, .. } => {
                let p = position.to_logical::<f64>(scale_factor);
                if let Some(drag) = self.pointer.moved(p.x, p.y) {
                    self.context.push(drag);
                }
            }
            WindowEvent::CursorLeft { .. } => self.pointer.leave(),
            WindowEvent::MouseWheel { delta, .. } => {
                self.context
                    .push(SceneEvent::Zoom(wheel_notches(delta, scale_factor)));
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}
