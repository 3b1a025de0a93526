use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("shader rejected by the device: {0}")]
    Shader(String),
    #[error("failed to read shader {path}: {source}")]
    ShaderFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Bytes per pixel of the RGBA8 render target.
const TARGET_BYTES_PER_PIXEL: u64 = 4;

/// A headless device and queue, opened with the adapter's own limits.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    limits: wgpu::Limits,
}

impl GpuContext {
    pub fn new_headless() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        let limits = adapter.limits();

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("fractal_tiler headless device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits.clone(),
            },
            None,
        ))?;

        debug!(
            adapter = %info.name,
            backend = ?info.backend,
            max_texture_dimension = limits.max_texture_dimension_2d,
            max_buffer_size = limits.max_buffer_size,
            "headless GPU device ready"
        );

        Ok(Self {
            device,
            queue,
            limits,
        })
    }

    #[must_use]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[must_use]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Largest square render whose texture and readback buffer both fit.
    #[must_use]
    pub fn max_render_dimension(&self) -> u32 {
        max_square_side(self.limits.max_texture_dimension_2d, self.limits.max_buffer_size)
    }
}

/// Sides are multiples of 64 pixels, so a readback row of that side needs no
/// padding at the 256-byte copy alignment.
pub(crate) fn max_square_side(max_texture_dimension: u32, max_buffer_size: u64) -> u32 {
    let pixels = max_buffer_size / TARGET_BYTES_PER_PIXEL;
    let by_buffer = (pixels as f64).sqrt() as u64;
    let by_buffer = by_buffer - by_buffer % 64;

    u32::try_from(by_buffer)
        .unwrap_or(u32::MAX)
        .min(max_texture_dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_limit_wins_when_buffers_are_large() {
        assert_eq!(max_square_side(8192, 1 << 40), 8192);
    }

    #[test]
    fn buffer_limit_wins_when_textures_are_large() {
        // 256 MiB holds an 8192x8192 RGBA image exactly.
        assert_eq!(max_square_side(16384, 256 << 20), 8192);
        assert_eq!(max_square_side(16384, (256 << 20) - 1), 8128);
    }

    #[test]
    fn side_fits_in_the_buffer() {
        for buffer in [1u64 << 20, 3 << 24, 1 << 28, 1 << 30] {
            let side = u64::from(max_square_side(u32::MAX, buffer));
            assert!(side * side * TARGET_BYTES_PER_PIXEL <= buffer);
            assert_eq!(side % 64, 0);
        }
    }
}
