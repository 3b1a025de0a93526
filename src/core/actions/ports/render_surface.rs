use crate::core::data::camera::CameraState;
use crate::core::data::rendered_image::{RenderedImage, RenderedImageError};
use crate::core::data::resolution::Resolution;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("render target {requested} exceeds the platform maximum of {max}px per side")]
    ResourceExhaustion { requested: Resolution, max: u32 },
    #[error("out of GPU memory: {0}")]
    OutOfMemory(String),
    #[error("render backend failure: {0}")]
    Backend(String),
    #[error("readback failed: {0}")]
    Readback(String),
    #[error(transparent)]
    Image(#[from] RenderedImageError),
}

/// A bounded off-screen target the fractal shader is evaluated on.
pub trait RenderSurface {
    /// Largest side, in pixels, a single render may have.
    fn max_dimension(&self) -> u32;

    /// Binds `camera` and renders one image of `resolution`. Any resources
    /// acquired for the call are released before it returns.
    fn render(
        &mut self,
        camera: &CameraState,
        resolution: Resolution,
    ) -> Result<RenderedImage, SurfaceError>;
}
