use crate::controllers::batch::controller::BatchError;
use crate::core::actions::plan_tiles::{TileGrid, TileMapping};
use crate::core::data::camera::CameraState;
use crate::core::data::resolution::Resolution;
use std::path::PathBuf;

pub const DEFAULT_WIDTH: u32 = 8000;
pub const DEFAULT_HEIGHT: u32 = 8000;
pub const DEFAULT_TILE_SIZE: u32 = 2000;
pub const DEFAULT_OUTPUT: &str = "output_image.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Tiled,
    /// One render of the whole output; it must fit on the surface.
    SinglePass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub output: PathBuf,
    pub camera: CameraState,
    pub mapping: TileMapping,
    pub mode: RenderMode,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            output: PathBuf::from(DEFAULT_OUTPUT),
            camera: CameraState::default(),
            mapping: TileMapping::default(),
            mode: RenderMode::default(),
        }
    }
}

impl BatchConfig {
    /// Checks the output size and, for tiled jobs, the tile bound. Needs no
    /// render surface, so callers can run it before opening a device.
    pub fn validate(&self) -> Result<Resolution, BatchError> {
        let resolution = Resolution::new(self.width, self.height)?;

        if self.mode == RenderMode::Tiled {
            TileGrid::new(resolution, self.tile_size)?;
        }

        Ok(resolution)
    }
}
