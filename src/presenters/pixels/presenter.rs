use crate::adapters::gpu::context::GpuError;
use crate::adapters::gpu::pipeline::FractalPipeline;
use crate::adapters::gpu::shader::FragmentShader;
use crate::controllers::interactive::ports::display::{DisplayError, DisplayPort};
use crate::core::data::camera::CameraState;
use crate::core::data::resolution::Resolution;
use egui::{ClippedPrimitive, Context as EguiContext, FullOutput, TexturesDelta};
use egui_wgpu::Renderer as EguiRenderer;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use winit::window::{Fullscreen, Window};

#[derive(Debug, thiserror::Error)]
pub enum PixelsDisplayError {
    #[error("failed to create pixels surface: {0}")]
    Pixels(#[from] pixels::Error),
    #[error(transparent)]
    Pipeline(#[from] GpuError),
}

struct OverlayFrame {
    primitives: Vec<ClippedPrimitive>,
    textures: TexturesDelta,
    pixels_per_point: f32,
}

/// Window display: the fractal pipeline draws straight into the pixels
/// surface texture, with the egui overlay painted on top.
pub struct PixelsDisplay {
    window: &'static Window,
    pixels: Pixels<'static>,
    pipeline: FractalPipeline,
    egui_renderer: EguiRenderer,
    overlay: Option<OverlayFrame>,
    size: Resolution,
}

impl PixelsDisplay {
    pub fn new(
        window: &'static Window,
        size: Resolution,
        shader: &FragmentShader,
    ) -> Result<Self, PixelsDisplayError> {
        let surface_texture = SurfaceTexture::new(size.width(), size.height(), window);

        // The pixel buffer is never blitted; frames come from the pipeline.
        let pixels = PixelsBuilder::new(1, 1, surface_texture).build()?;

        let format = pixels.render_texture_format();
        let pipeline = FractalPipeline::new(pixels.device(), format, shader)?;
        let egui_renderer = EguiRenderer::new(pixels.device(), format, None, 1);

        Ok(Self {
            window,
            pixels,
            pipeline,
            egui_renderer,
            overlay: None,
            size,
        })
    }

    /// Stores the next overlay to paint. Texture updates from frames that
    /// were never presented are kept.
    pub fn queue_overlay(&mut self, egui_ctx: &EguiContext, output: FullOutput) {
        let FullOutput {
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = output;

        let primitives = egui_ctx.tessellate(shapes, pixels_per_point);

        let textures = match self.overlay.take() {
            Some(mut pending) => {
                pending.textures.append(textures_delta);
                pending.textures
            }
            None => textures_delta,
        };

        self.overlay = Some(OverlayFrame {
            primitives,
            textures,
            pixels_per_point,
        });
    }
}

impl DisplayPort for PixelsDisplay {
    fn resize(&mut self, resolution: Resolution) -> Result<(), DisplayError> {
        self.pixels
            .resize_surface(resolution.width(), resolution.height())
            .map_err(|error| DisplayError::Resize(error.to_string()))?;
        self.size = resolution;

        Ok(())
    }

    fn render(&mut self, camera: &CameraState, resolution: Resolution) -> Result<(), DisplayError> {
        if resolution != self.size {
            return Err(DisplayError::Render(format!(
                "frame requested at {resolution}, surface is {}",
                self.size
            )));
        }

        self.pipeline.bind(self.pixels.queue(), camera, resolution);
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        let overlay = self.overlay.take();
        let size = self.size;
        let pipeline = &self.pipeline;
        let egui_renderer = &mut self.egui_renderer;

        self.pixels
            .render_with(|encoder, render_target, context| {
                pipeline.draw(encoder, render_target);

                let Some(overlay) = overlay else {
                    return Ok(());
                };

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [size.width(), size.height()],
                    pixels_per_point: overlay.pixels_per_point,
                };

                for (id, delta) in &overlay.textures.set {
                    egui_renderer.update_texture(&context.device, &context.queue, *id, delta);
                }

                egui_renderer.update_buffers(
                    &context.device,
                    &context.queue,
                    encoder,
                    &overlay.primitives,
                    &screen_descriptor,
                );

                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: render_target,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    });

                    egui_renderer.render(&mut render_pass, &overlay.primitives, &screen_descriptor);
                }

                for id in &overlay.textures.free {
                    egui_renderer.free_texture(id);
                }

                Ok(())
            })
            .map_err(|error| DisplayError::Present(error.to_string()))
    }

    fn toggle_fullscreen(&mut self) {
        let next = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };

        self.window.set_fullscreen(next);
    }
}
