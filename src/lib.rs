pub mod adapters;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod presenters;

pub use adapters::gpu::{FragmentShader, GpuContext, GpuError, WgpuRenderSurface};
pub use controllers::batch::{
    BatchConfig, BatchError, BatchErrorKind, BatchRenderController, BatchReport, RenderMode,
};
pub use crate::core::actions::compose_tiles::{
    ComposeError, TileProgress, compose_tiles, render_single_pass,
};
pub use crate::core::actions::plan_tiles::{PlanError, TileGrid, TileMapping};
pub use crate::core::actions::ports::render_surface::{RenderSurface, SurfaceError};
pub use crate::core::data::camera::{CameraError, CameraState};
pub use crate::core::data::coord::FractalCoord;
pub use crate::core::data::resolution::{Resolution, ResolutionError};
pub use presenters::file::{ImageFileWriter, OutputFormat};

#[cfg(feature = "gui")]
pub use input::gui::{ViewerConfig, ViewerError, run_viewer};
