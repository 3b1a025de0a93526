use crate::core::data::camera::CameraState;
use crate::core::data::resolution::Resolution;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to resize display surface: {0}")]
    Resize(String),
    #[error("failed to render frame: {0}")]
    Render(String),
    #[error("failed to present frame: {0}")]
    Present(String),
}

/// The on-screen target of the interactive loop.
pub trait DisplayPort {
    fn resize(&mut self, resolution: Resolution) -> Result<(), DisplayError>;

    /// Renders the full viewport for `camera` at `resolution`.
    fn render(&mut self, camera: &CameraState, resolution: Resolution) -> Result<(), DisplayError>;

    fn present(&mut self) -> Result<(), DisplayError>;

    fn toggle_fullscreen(&mut self);
}
