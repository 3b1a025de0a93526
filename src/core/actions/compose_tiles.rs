use crate::core::actions::plan_tiles::{PlanError, TileGrid, TileMapping};
use crate::core::actions::ports::render_surface::{RenderSurface, SurfaceError};
use crate::core::data::camera::CameraState;
use crate::core::data::resolution::{Resolution, ResolutionError};
use crate::core::data::tile::{PlannedTile, TileSpec};
use image::RgbImage;
use image::imageops::{crop_imm, replace};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("render size {requested}px exceeds the surface maximum of {max}px")]
    ResourceExhaustion { requested: u32, max: u32 },
    #[error("tile at ({offset_x}, {offset_y}) failed to render: {source}")]
    Tile {
        offset_x: u32,
        offset_y: u32,
        #[source]
        source: SurfaceError,
    },
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("surface returned {actual_width}x{actual_height}, expected {expected}")]
    TileMismatch {
        expected: Resolution,
        actual_width: u32,
        actual_height: u32,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileProgress {
    /// Zero-based, row-major.
    pub index: u64,
    pub total: u64,
    pub spec: TileSpec,
    pub render_time: Duration,
}

/// Renders `camera` at the grid's output resolution through renders no
/// larger than the grid's tile bound.
///
/// Every tile camera is derived before the first render, so an invalid
/// derived view fails the job without touching the surface. The first
/// render failure aborts the job.
pub fn compose_tiles<S, F>(
    surface: &mut S,
    camera: &CameraState,
    grid: &TileGrid,
    mapping: TileMapping,
    mut on_tile: F,
) -> Result<RgbImage, ComposeError>
where
    S: RenderSurface + ?Sized,
    F: FnMut(&TileProgress),
{
    let max = surface.max_dimension();

    if grid.tile_bound() > max {
        return Err(ComposeError::ResourceExhaustion {
            requested: grid.tile_bound(),
            max,
        });
    }

    let output = grid.output();

    if camera.single_precision_exhausted(output) {
        warn!(
            scale = camera.scale(),
            %output,
            "pixel step is below f32 precision, expect blocky output"
        );
    }

    let planned: Vec<PlannedTile> = grid.plan(camera, mapping).collect::<Result<_, _>>()?;
    let total = planned.len() as u64;

    info!(
        %output,
        tile_bound = grid.tile_bound(),
        columns = grid.columns(),
        rows = grid.rows(),
        tiles = total,
        ?mapping,
        "composing tiled render"
    );

    let mut image = RgbImage::new(output.width(), output.height());
    let job_start = Instant::now();

    for (index, tile) in planned.iter().enumerate() {
        let spec = tile.spec;
        info!(
            x = spec.offset_x,
            y = spec.offset_y,
            tile = index + 1,
            of = total,
            "rendering tile"
        );

        let tile_start = Instant::now();
        let pixels = render_tile(surface, tile)?;
        let crop = crop_imm(&pixels, 0, 0, spec.tile_width, spec.tile_height).to_image();
        replace(
            &mut image,
            &crop,
            i64::from(spec.offset_x),
            i64::from(spec.offset_y),
        );

        let render_time = tile_start.elapsed();
        debug!(
            ?render_time,
            center = ?tile.camera.center(),
            scale = tile.camera.scale(),
            "tile painted"
        );

        on_tile(&TileProgress {
            index: index as u64,
            total,
            spec,
            render_time,
        });
    }

    log_totals(output, total, job_start.elapsed());

    Ok(image)
}

/// Renders `camera` in one pass when `resolution` fits on the surface.
pub fn render_single_pass<S>(
    surface: &mut S,
    camera: &CameraState,
    resolution: Resolution,
) -> Result<RgbImage, ComposeError>
where
    S: RenderSurface + ?Sized,
{
    let max = surface.max_dimension();

    if !resolution.fits_within(max) {
        return Err(ComposeError::ResourceExhaustion {
            requested: resolution.longer_side(),
            max,
        });
    }

    if camera.single_precision_exhausted(resolution) {
        warn!(scale = camera.scale(), %resolution, "pixel step is below f32 precision");
    }

    let start = Instant::now();
    let rendered = surface.render(camera, resolution)?;

    if rendered.width() != resolution.width() || rendered.height() != resolution.height() {
        return Err(ComposeError::TileMismatch {
            expected: resolution,
            actual_width: rendered.width(),
            actual_height: rendered.height(),
        });
    }

    let image = rendered.into_top_down();
    log_totals(resolution, 1, start.elapsed());

    Ok(image)
}

fn render_tile<S>(surface: &mut S, tile: &PlannedTile) -> Result<RgbImage, ComposeError>
where
    S: RenderSurface + ?Sized,
{
    let spec = tile.spec;
    let square = Resolution::square(spec.render_size)?;

    let rendered = surface
        .render(&tile.camera, square)
        .map_err(|source| ComposeError::Tile {
            offset_x: spec.offset_x,
            offset_y: spec.offset_y,
            source,
        })?;

    if rendered.width() != square.width() || rendered.height() != square.height() {
        return Err(ComposeError::TileMismatch {
            expected: square,
            actual_width: rendered.width(),
            actual_height: rendered.height(),
        });
    }

    Ok(rendered.into_top_down())
}

fn log_totals(output: Resolution, tiles: u64, elapsed: Duration) {
    let megapixels = output.pixel_count() as f64 / 1_000_000.0;
    let per_megapixel = elapsed.as_secs_f64() / megapixels;

    info!(
        %output,
        tiles,
        elapsed_secs = elapsed.as_secs_f64(),
        secs_per_megapixel = per_megapixel,
        "render complete"
    );
}
