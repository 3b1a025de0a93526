use crate::adapters::gpu::context::{GpuContext, GpuError};
use crate::adapters::gpu::pipeline::FractalPipeline;
use crate::adapters::gpu::shader::FragmentShader;
use crate::adapters::pixel_format::{padded_rgba_row_len, strip_padded_rgba};
use crate::core::actions::ports::render_surface::{RenderSurface, SurfaceError};
use crate::core::data::camera::CameraState;
use crate::core::data::rendered_image::{RenderedImage, RowOrder};
use crate::core::data::resolution::Resolution;
use std::sync::mpsc;
use tracing::trace;

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Off-screen wgpu render surface. Each render allocates its own target and
/// readback buffer and destroys both before returning.
pub struct WgpuRenderSurface {
    context: GpuContext,
    pipeline: FractalPipeline,
}

impl WgpuRenderSurface {
    pub fn new(context: GpuContext, shader: &FragmentShader) -> Result<Self, GpuError> {
        let pipeline = FractalPipeline::new(context.device(), TARGET_FORMAT, shader)?;

        Ok(Self { context, pipeline })
    }

    fn read_back(
        &self,
        target: &RenderTarget,
        resolution: Resolution,
    ) -> Result<Vec<u8>, SurfaceError> {
        let slice = target.readback.slice(..);
        let (sender, receiver) = mpsc::channel();

        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = self.context.device().poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|error| SurfaceError::Readback(error.to_string()))?
            .map_err(|error| SurfaceError::Readback(error.to_string()))?;

        let rgb = {
            let mapped = slice.get_mapped_range();
            strip_padded_rgba(
                &mapped,
                resolution.width(),
                resolution.height(),
                target.padded_row_len,
            )
        };
        target.readback.unmap();

        Ok(rgb)
    }
}

impl RenderSurface for WgpuRenderSurface {
    fn max_dimension(&self) -> u32 {
        self.context.max_render_dimension()
    }

    fn render(
        &mut self,
        camera: &CameraState,
        resolution: Resolution,
    ) -> Result<RenderedImage, SurfaceError> {
        let max = self.max_dimension();

        if !resolution.fits_within(max) {
            return Err(SurfaceError::ResourceExhaustion {
                requested: resolution,
                max,
            });
        }

        let device = self.context.device();
        let queue = self.context.queue();

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let target = RenderTarget::new(device, resolution);
        self.pipeline.bind(queue, camera, resolution);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("fractal render"),
        });
        self.pipeline.draw(&mut encoder, &target.view);
        target.copy_to_readback(&mut encoder, resolution);
        queue.submit(Some(encoder.finish()));

        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());

        if let Some(error) = out_of_memory {
            return Err(SurfaceError::OutOfMemory(error.to_string()));
        }

        if let Some(error) = validation {
            return Err(SurfaceError::Backend(error.to_string()));
        }

        let rgb = self.read_back(&target, resolution)?;
        trace!(%resolution, "render read back");

        Ok(RenderedImage::from_rgb(resolution, RowOrder::TopDown, rgb)?)
    }
}

/// Render texture plus readback buffer for one render call.
struct RenderTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    readback: wgpu::Buffer,
    padded_row_len: usize,
}

impl RenderTarget {
    fn new(device: &wgpu::Device, resolution: Resolution) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("fractal target"),
            size: extent(resolution),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let padded_row_len =
            padded_rgba_row_len(resolution.width(), wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractal readback"),
            size: (padded_row_len * resolution.height() as usize) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            texture,
            view,
            readback,
            padded_row_len,
        }
    }

    fn copy_to_readback(&self, encoder: &mut wgpu::CommandEncoder, resolution: Resolution) {
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_row_len as u32),
                    rows_per_image: Some(resolution.height()),
                },
            },
            extent(resolution),
        );
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        self.readback.destroy();
        self.texture.destroy();
    }
}

fn extent(resolution: Resolution) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: resolution.width(),
        height: resolution.height(),
        depth_or_array_layers: 1,
    }
}
