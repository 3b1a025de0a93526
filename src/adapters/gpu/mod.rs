//! wgpu implementation of the render surface.

pub mod context;
pub mod pipeline;
pub mod shader;
pub mod surface;

pub use context::{GpuContext, GpuError};
pub use pipeline::{FractalPipeline, FractalUniforms};
pub use shader::FragmentShader;
pub use surface::WgpuRenderSurface;
