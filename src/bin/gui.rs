use clap::Parser;
use fractal_tiler::core::data::camera::{DEFAULT_ITERATIONS, DEFAULT_SCALE};
use fractal_tiler::input::gui::config::{
    DEFAULT_FRAME_RATE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};
use fractal_tiler::{CameraState, FractalCoord, FragmentShader, ViewerConfig, run_viewer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fly around an escape-time fractal: WASD or arrows to pan, wheel to zoom,
/// F11 for fullscreen.
#[derive(Debug, Parser)]
#[command(name = "fractal_tiler_gui", version, about)]
struct Cli {
    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    height: u32,

    /// Target frames per second.
    #[arg(
        long,
        default_value_t = DEFAULT_FRAME_RATE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    fps: u32,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center_x: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center_y: f64,

    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// WGSL fragment shader to use instead of the built-in Mandelbrot.
    #[arg(long, env = "FRACTAL_SHADER")]
    shader: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let shader = match &cli.shader {
        Some(path) => FragmentShader::from_file(path)?,
        None => FragmentShader::default(),
    };

    let config = ViewerConfig {
        window_width: cli.width,
        window_height: cli.height,
        frame_rate: cli.fps,
        camera: CameraState::new(
            FractalCoord::new(cli.center_x, cli.center_y),
            cli.scale,
            cli.iterations,
        )?,
        shader,
    };

    run_viewer(config)?;

    Ok(())
}
