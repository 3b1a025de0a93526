use crate::core::data::camera::CameraState;
use crate::core::data::coord::FractalCoord;
use crate::core::data::resolution::Resolution;

/// Maps a pixel of a top-down render of `camera` at `resolution` to fractal space.
///
/// Samples are taken at pixel centres, matching the rasterised full-screen
/// quad. `scale` spans the longer side, so pixels are square. Coordinates
/// outside the render are extrapolated, which lets callers compare
/// neighbouring tiles across their shared edge.
#[must_use]
pub fn pixel_to_fractal_coords(
    pixel_x: f64,
    pixel_y: f64,
    resolution: Resolution,
    camera: &CameraState,
) -> FractalCoord {
    let step = camera.pixel_step(resolution);
    let center = camera.center();
    let half_width = f64::from(resolution.width()) / 2.0;
    let half_height = f64::from(resolution.height()) / 2.0;

    FractalCoord {
        x: center.x + (pixel_x + 0.5 - half_width) * step,
        y: center.y - (pixel_y + 0.5 - half_height) * step,
    }
}
