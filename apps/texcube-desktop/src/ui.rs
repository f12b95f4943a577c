use egui::Context as EguiContext;
use texcube_input::SceneEvent;
use texcube_runtime::AppContext;
use texcube_tools::SceneInspector;

/// Draw the debug panel. Slider edits come back as events so they go through
/// the same queue as every other input.
pub fn draw_panel(ctx: &EguiContext, app: &AppContext) -> Vec<SceneEvent> {
    let mut events = Vec::new();
    if !app.panel().is_visible() {
        return events;
    }

    egui::Window::new("Debug")
        .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
        .default_width(260.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Cube position");
            for (index, binding) in app.panel().bindings().iter().enumerate() {
                let Ok(mut value) = binding.value(app.scene()) else {
                    continue;
                };
                let slider = egui::Slider::new(&mut value, binding.min..=binding.max)
                    .step_by(binding.step as f64)
                    .text(binding.label.as_str());
                if ui.add(slider).changed() {
                    events.push(SceneEvent::SetSlider { index, value });
                }
            }

            ui.separator();
            let stats = app.stats();
            ui.label(format!(
                "Frame {}  {:.1} ms  {:.0} fps",
                stats.frame,
                stats.frame_ms(),
                stats.fps
            ));
            ui.label(format!("Elapsed: {:.2} s", stats.elapsed.as_secs_f32()));
            let cam = app.camera().position;
            ui.label(format!("Camera: ({:.1}, {:.1}, {:.1})", cam.x, cam.y, cam.z));
            let (bw, bh) = app.viewport().buffer_size();
            ui.label(format!("Buffer: {bw}x{bh} @{:.2}x", app.viewport().pixel_ratio()));

            ui.separator();
            ui.collapsing(SceneInspector::summary(app.scene()).to_string(), |ui| {
                for report in SceneInspector::list_nodes(app.scene()) {
                    ui.small(report.to_string());
                }
            });

            ui.separator();
            ui.small("F1: Toggle panel | F / double-click: Fullscreen");
            ui.small("LMB: Orbit | RMB: Pan | Wheel: Zoom");
        });

    events
}
