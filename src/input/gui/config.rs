use crate::adapters::gpu::shader::FragmentShader;
use crate::core::data::camera::CameraState;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1000;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub frame_rate: u32,
    pub camera: CameraState,
    pub shader: FragmentShader,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            frame_rate: DEFAULT_FRAME_RATE,
            camera: CameraState::default(),
            shader: FragmentShader::default(),
        }
    }
}
