use clap::Parser;
use fractal_tiler::controllers::batch::config::{
    DEFAULT_HEIGHT, DEFAULT_OUTPUT, DEFAULT_TILE_SIZE, DEFAULT_WIDTH,
};
use fractal_tiler::controllers::batch::ports::ImageWriter;
use fractal_tiler::core::data::camera::{DEFAULT_ITERATIONS, DEFAULT_SCALE};
use fractal_tiler::{
    BatchConfig, BatchRenderController, CameraState, FractalCoord, FragmentShader, GpuContext,
    ImageFileWriter, RenderMode, TileMapping, WgpuRenderSurface,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render a large escape-time fractal image tile by tile on the GPU.
#[derive(Debug, Parser)]
#[command(name = "fractal_tiler", version, about)]
struct Cli {
    /// Output width in pixels.
    #[arg(long, env = "FRACTAL_WIDTH", default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, env = "FRACTAL_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Largest tile side rendered in one GPU pass.
    #[arg(long, env = "FRACTAL_TILE_SIZE", default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,

    /// Output file; the extension picks PNG or PPM.
    #[arg(short, long, env = "FRACTAL_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(long, env = "FRACTAL_CENTER_X", default_value_t = 0.0, allow_negative_numbers = true)]
    center_x: f64,

    #[arg(long, env = "FRACTAL_CENTER_Y", default_value_t = 0.0, allow_negative_numbers = true)]
    center_y: f64,

    /// Half-extent of the view along the longer image axis.
    #[arg(long, env = "FRACTAL_SCALE", default_value_t = DEFAULT_SCALE)]
    scale: f64,

    #[arg(long, env = "FRACTAL_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// WGSL fragment shader to use instead of the built-in Mandelbrot.
    #[arg(long, env = "FRACTAL_SHADER")]
    shader: Option<PathBuf>,

    /// Map tiles with one pixel step for both axes instead of the legacy
    /// per-tile formulas.
    #[arg(long)]
    aspect_consistent: bool,

    /// Render the whole image in one pass instead of tiling.
    #[arg(long)]
    single_pass: bool,
}

impl Cli {
    fn batch_config(&self) -> Result<BatchConfig, Box<dyn std::error::Error>> {
        let camera = CameraState::new(
            FractalCoord::new(self.center_x, self.center_y),
            self.scale,
            self.iterations,
        )?;

        let config = BatchConfig {
            width: self.width,
            height: self.height,
            tile_size: self.tile_size,
            output: self.output.clone(),
            camera,
            mapping: if self.aspect_consistent {
                TileMapping::AspectConsistent
            } else {
                TileMapping::SourceCompatible
            },
            mode: if self.single_pass {
                RenderMode::SinglePass
            } else {
                RenderMode::Tiled
            },
        };

        // Size and format problems must surface before a GPU device is opened.
        config.validate()?;
        ImageFileWriter::new().check(&config.output)?;

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.batch_config()?;

    let shader = match &cli.shader {
        Some(path) => FragmentShader::from_file(path)?,
        None => FragmentShader::default(),
    };

    let context = GpuContext::new_headless()?;
    info!(max_dimension = context.max_render_dimension(), "gpu ready");

    let surface = WgpuRenderSurface::new(context, &shader)?;
    let mut controller = BatchRenderController::new(surface, ImageFileWriter::new());

    let report = controller.run(&config).inspect_err(|error| {
        tracing::error!(kind = ?error.kind(), %error, "batch render failed");
    })?;

    info!(
        output = %report.output.display(),
        resolution = %report.resolution,
        tiles = report.tiles,
        render_secs = report.render_time.as_secs_f64(),
        total_secs = report.total_time.as_secs_f64(),
        "done"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal_tiler::BatchError;

    #[test]
    fn defaults_match_the_standard_job() {
        let cli = Cli::try_parse_from(["fractal_tiler"]).unwrap();
        let config = cli.batch_config().unwrap();

        assert_eq!(config, BatchConfig::default());
    }

    #[test]
    fn negative_center_and_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "fractal_tiler",
            "--center-x",
            "-0.75",
            "--center-y",
            "0.1",
            "--scale",
            "0.5",
            "--aspect-consistent",
            "-o",
            "deep.ppm",
        ])
        .unwrap();
        let config = cli.batch_config().unwrap();

        assert_eq!(config.camera.center(), FractalCoord::new(-0.75, 0.1));
        assert_eq!(config.camera.scale(), 0.5);
        assert_eq!(config.mapping, TileMapping::AspectConsistent);
        assert_eq!(config.output, PathBuf::from("deep.ppm"));
    }

    #[test]
    fn invalid_camera_is_rejected() {
        let cli = Cli::try_parse_from(["fractal_tiler", "--scale", "0"]).unwrap();

        assert!(cli.batch_config().is_err());
    }

    #[test]
    fn invalid_sizes_fail_before_any_gpu_work() {
        for args in [
            ["fractal_tiler", "--width", "0"],
            ["fractal_tiler", "--height", "0"],
            ["fractal_tiler", "--tile-size", "0"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();

            let error = cli.batch_config().unwrap_err();

            assert!(error.downcast_ref::<BatchError>().is_some(), "{:?}", args);
        }
    }

    #[test]
    fn unsupported_output_format_fails_before_any_gpu_work() {
        let cli = Cli::try_parse_from(["fractal_tiler", "-o", "out.jpg"]).unwrap();

        assert!(cli.batch_config().is_err());
    }

    #[test]
    fn single_pass_selects_mode() {
        let cli = Cli::try_parse_from(["fractal_tiler", "--single-pass"]).unwrap();

        assert_eq!(cli.batch_config().unwrap().mode, RenderMode::SinglePass);
    }
}
