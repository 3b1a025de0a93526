use crate::controllers::batch::config::{BatchConfig, RenderMode};
use crate::controllers::batch::ports::image_writer::{ImageWriteError, ImageWriter};
use crate::core::actions::compose_tiles::{
    ComposeError, TileProgress, compose_tiles, render_single_pass,
};
use crate::core::actions::plan_tiles::{PlanError, TileGrid};
use crate::core::actions::ports::render_surface::{RenderSurface, SurfaceError};
use crate::core::data::resolution::{Resolution, ResolutionError};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// Broad failure classes a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchErrorKind {
    InvalidParameter,
    ResourceExhaustion,
    IoFailure,
    RenderFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("invalid output size: {0}")]
    OutputSize(#[from] ResolutionError),
    #[error("invalid tiling: {0}")]
    Tiling(#[from] PlanError),
    #[error("render failed: {0}")]
    Render(#[from] ComposeError),
    #[error(transparent)]
    Write(#[from] ImageWriteError),
}

impl BatchError {
    #[must_use]
    pub fn kind(&self) -> BatchErrorKind {
        match self {
            Self::OutputSize(_) | Self::Tiling(_) => BatchErrorKind::InvalidParameter,
            Self::Write(ImageWriteError::UnsupportedFormat(_)) => BatchErrorKind::InvalidParameter,
            Self::Write(_) => BatchErrorKind::IoFailure,
            Self::Render(error) => compose_error_kind(error),
        }
    }
}

fn compose_error_kind(error: &ComposeError) -> BatchErrorKind {
    match error {
        ComposeError::Plan(_) | ComposeError::Resolution(_) => BatchErrorKind::InvalidParameter,
        ComposeError::ResourceExhaustion { .. } => BatchErrorKind::ResourceExhaustion,
        ComposeError::Tile { source, .. } | ComposeError::Surface(source) => match source {
            SurfaceError::ResourceExhaustion { .. } | SurfaceError::OutOfMemory(_) => {
                BatchErrorKind::ResourceExhaustion
            }
            _ => BatchErrorKind::RenderFailure,
        },
        ComposeError::TileMismatch { .. } => BatchErrorKind::RenderFailure,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub output: PathBuf,
    pub resolution: Resolution,
    pub tiles: u64,
    pub render_time: Duration,
    pub total_time: Duration,
}

/// Renders one image per job and hands it to the writer.
pub struct BatchRenderController<S, W> {
    surface: S,
    writer: W,
}

impl<S: RenderSurface, W: ImageWriter> BatchRenderController<S, W> {
    pub fn new(surface: S, writer: W) -> Self {
        Self { surface, writer }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Validates every parameter before the first render; any failure
    /// afterwards aborts the whole job.
    pub fn run(&mut self, config: &BatchConfig) -> Result<BatchReport, BatchError> {
        self.run_with_progress(config, |_| {})
    }

    pub fn run_with_progress<F>(
        &mut self,
        config: &BatchConfig,
        on_tile: F,
    ) -> Result<BatchReport, BatchError>
    where
        F: FnMut(&TileProgress),
    {
        let job_start = Instant::now();
        let resolution = config.validate()?;
        self.writer.check(&config.output)?;

        info!(
            %resolution,
            output = %config.output.display(),
            center_x = config.camera.center().x,
            center_y = config.camera.center().y,
            scale = config.camera.scale(),
            iterations = config.camera.iterations(),
            mode = ?config.mode,
            "starting batch render"
        );

        let render_start = Instant::now();
        let (image, tiles) = match config.mode {
            RenderMode::Tiled => {
                let grid = TileGrid::new(resolution, config.tile_size)?;
                let image = compose_tiles(
                    &mut self.surface,
                    &config.camera,
                    &grid,
                    config.mapping,
                    on_tile,
                )?;
                (image, grid.tile_count())
            }
            RenderMode::SinglePass => {
                let image = render_single_pass(&mut self.surface, &config.camera, resolution)?;
                (image, 1)
            }
        };
        let render_time = render_start.elapsed();

        self.writer.write(&image, &config.output)?;
        info!(output = %config.output.display(), "fractal saved");

        Ok(BatchReport {
            output: config.output.clone(),
            resolution,
            tiles,
            render_time,
            total_time: job_start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::camera::CameraState;
    use crate::core::data::rendered_image::{RenderedImage, RowOrder};
    use image::RgbImage;
    use std::cell::RefCell;
    use std::path::Path;

    struct CountingSurface {
        max: u32,
        renders: u32,
    }

    impl RenderSurface for CountingSurface {
        fn max_dimension(&self) -> u32 {
            self.max
        }

        fn render(
            &mut self,
            _camera: &CameraState,
            resolution: Resolution,
        ) -> Result<RenderedImage, SurfaceError> {
            self.renders += 1;
            let data = vec![200; resolution.pixel_count() as usize * 3];
            Ok(RenderedImage::from_rgb(resolution, RowOrder::BottomUp, data)?)
        }
    }

    struct OutOfMemorySurface;

    impl RenderSurface for OutOfMemorySurface {
        fn max_dimension(&self) -> u32 {
            64
        }

        fn render(
            &mut self,
            _camera: &CameraState,
            _resolution: Resolution,
        ) -> Result<RenderedImage, SurfaceError> {
            Err(SurfaceError::OutOfMemory("texture allocation".to_string()))
        }
    }

    #[derive(Default)]
    struct MemoryWriter {
        written: RefCell<Vec<(PathBuf, (u32, u32))>>,
        fail: bool,
    }

    impl ImageWriter for MemoryWriter {
        fn check(&self, path: &Path) -> Result<(), ImageWriteError> {
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("png") | Some("ppm") => Ok(()),
                _ => Err(ImageWriteError::UnsupportedFormat(path.to_path_buf())),
            }
        }

        fn write(&self, image: &RgbImage, path: &Path) -> Result<(), ImageWriteError> {
            if self.fail {
                return Err(ImageWriteError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }

            self.written
                .borrow_mut()
                .push((path.to_path_buf(), image.dimensions()));
            Ok(())
        }
    }

    fn controller(max: u32) -> BatchRenderController<CountingSurface, MemoryWriter> {
        BatchRenderController::new(CountingSurface { max, renders: 0 }, MemoryWriter::default())
    }

    fn config(width: u32, height: u32, tile_size: u32) -> BatchConfig {
        BatchConfig {
            width,
            height,
            tile_size,
            output: PathBuf::from("out/fractal.png"),
            ..BatchConfig::default()
        }
    }

    #[test]
    fn tiled_job_renders_every_tile_and_writes_once() {
        let mut controller = controller(512);

        let report = controller.run(&config(1000, 600, 400)).unwrap();

        assert_eq!(report.tiles, 6);
        assert_eq!(report.resolution, Resolution::new(1000, 600).unwrap());
        assert_eq!(controller.surface().renders, 6);
        assert_eq!(
            *controller.writer().written.borrow(),
            vec![(PathBuf::from("out/fractal.png"), (1000, 600))]
        );
    }

    #[test]
    fn single_pass_job_renders_once() {
        let mut controller = controller(512);
        let config = BatchConfig {
            mode: RenderMode::SinglePass,
            ..config(300, 200, 100)
        };

        let report = controller.run(&config).unwrap();

        assert_eq!(report.tiles, 1);
        assert_eq!(controller.surface().renders, 1);
    }

    #[test]
    fn zero_width_is_an_invalid_parameter() {
        let mut controller = controller(512);

        let error = controller.run(&config(0, 600, 400)).unwrap_err();

        assert_eq!(error.kind(), BatchErrorKind::InvalidParameter);
        assert_eq!(controller.surface().renders, 0);
    }

    #[test]
    fn zero_tile_size_is_an_invalid_parameter() {
        let mut controller = controller(512);

        let error = controller.run(&config(100, 100, 0)).unwrap_err();

        assert!(matches!(error, BatchError::Tiling(PlanError::ZeroTileBound)));
        assert_eq!(error.kind(), BatchErrorKind::InvalidParameter);
    }

    #[test]
    fn unsupported_format_is_rejected_before_rendering() {
        let mut controller = controller(512);
        let config = BatchConfig {
            output: PathBuf::from("out/fractal.gif"),
            ..config(100, 100, 50)
        };

        let error = controller.run(&config).unwrap_err();

        assert_eq!(error.kind(), BatchErrorKind::InvalidParameter);
        assert_eq!(controller.surface().renders, 0);
    }

    #[test]
    fn tile_size_above_surface_limit_is_resource_exhaustion() {
        let mut controller = controller(256);

        let error = controller.run(&config(1000, 1000, 512)).unwrap_err();

        assert_eq!(error.kind(), BatchErrorKind::ResourceExhaustion);
        assert_eq!(controller.surface().renders, 0);
    }

    #[test]
    fn oversized_single_pass_is_resource_exhaustion() {
        let mut controller = controller(256);
        let config = BatchConfig {
            mode: RenderMode::SinglePass,
            ..config(1000, 100, 100)
        };

        let error = controller.run(&config).unwrap_err();

        assert_eq!(error.kind(), BatchErrorKind::ResourceExhaustion);
    }

    #[test]
    fn gpu_out_of_memory_aborts_the_job() {
        let mut controller =
            BatchRenderController::new(OutOfMemorySurface, MemoryWriter::default());

        let error = controller.run(&config(100, 100, 50)).unwrap_err();

        assert_eq!(error.kind(), BatchErrorKind::ResourceExhaustion);
        assert!(controller.writer().written.borrow().is_empty());
    }

    #[test]
    fn write_failure_is_an_io_failure() {
        let writer = MemoryWriter {
            fail: true,
            ..MemoryWriter::default()
        };
        let surface = CountingSurface { max: 64, renders: 0 };
        let mut controller = BatchRenderController::new(surface, writer);

        let error = controller.run(&config(64, 64, 32)).unwrap_err();

        assert_eq!(error.kind(), BatchErrorKind::IoFailure);
        assert_eq!(controller.surface().renders, 4);
    }

    #[test]
    fn progress_callback_sees_every_tile() {
        let mut controller = controller(512);
        let mut count = 0;

        controller
            .run_with_progress(&config(90, 90, 30), |progress| {
                assert_eq!(progress.total, 9);
                count += 1;
            })
            .unwrap();

        assert_eq!(count, 9);
    }
}
