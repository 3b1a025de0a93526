use crate::core::data::camera::CameraState;
use egui::Context;
use egui_winit::{EventResponse, State as EguiWinitState};
use std::time::Duration;
use winit::event::WindowEvent;
use winit::event_loop::EventLoop;
use winit::window::Window;

const MAX_SLIDER_ITERATIONS: u32 = 10_000;

/// egui debug panel showing the camera, with an iteration slider.
pub struct DebugOverlay {
    egui_ctx: Context,
    egui_state: EguiWinitState,
    iterations: u32,
    requested_iterations: Option<u32>,
}

impl DebugOverlay {
    pub fn new(window: &Window, event_loop: &EventLoop<()>, iterations: u32) -> Self {
        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None,
        );

        Self {
            egui_ctx,
            egui_state,
            iterations,
            requested_iterations: None,
        }
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.egui_ctx
    }

    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    pub fn set_pixels_per_point(&self, pixels_per_point: f32) {
        self.egui_ctx.set_pixels_per_point(pixels_per_point);
    }

    /// An iteration bound picked on the slider since the last call.
    pub fn take_requested_iterations(&mut self) -> Option<u32> {
        self.requested_iterations.take()
    }

    /// Runs one egui frame. Platform output is handled here; the returned
    /// output carries only what the presenter needs to paint.
    pub fn run(
        &mut self,
        window: &Window,
        camera: &CameraState,
        frame_time: Duration,
    ) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let size = window.inner_size();
        self.iterations = self.requested_iterations.unwrap_or(camera.iterations());

        let mut output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Camera")
                .default_pos([10.0, 10.0])
                .default_size([260.0, 160.0])
                .show(ctx, |ui| {
                    let center = camera.center();
                    ui.label(format!("Center: ({:.12}, {:.12})", center.x, center.y));
                    ui.label(format!("Scale: {:.6e}", camera.scale()));

                    ui.horizontal(|ui| {
                        ui.label("Iterations:");
                        let slider =
                            egui::Slider::new(&mut self.iterations, 1..=MAX_SLIDER_ITERATIONS)
                                .logarithmic(true);
                        if ui.add(slider).changed() {
                            self.requested_iterations = Some(self.iterations);
                        }
                    });

                    ui.separator();
                    ui.label(format!("Window: {}x{}", size.width, size.height));
                    ui.label(format!("Frame time: {:.2} ms", frame_time.as_secs_f64() * 1000.0));
                    ui.label("WASD / arrows: pan, wheel: zoom, F11: fullscreen");
                });
        });

        let platform_output = std::mem::take(&mut output.platform_output);
        self.egui_state.handle_platform_output(window, platform_output);

        output
    }
}
