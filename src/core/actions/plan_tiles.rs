use crate::core::data::camera::{CameraError, CameraState};
use crate::core::data::coord::FractalCoord;
use crate::core::data::resolution::Resolution;
use crate::core::data::tile::{PlannedTile, TileSpec};

#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("tile bound must be greater than zero")]
    ZeroTileBound,
    #[error("tile {offset_x},{offset_y} has an invalid camera: {source}")]
    TileCamera {
        offset_x: u32,
        offset_y: u32,
        #[source]
        source: CameraError,
    },
}

/// How a tile's camera is derived from the logical camera.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TileMapping {
    /// Per-axis scale factors `2 * scale / width` and `2 * scale / height`,
    /// tile camera placed at the fractal coordinate of the tile's top-left
    /// offset. Non-square outputs get slightly non-square pixels.
    #[default]
    SourceCompatible,
    /// One pixel step `2 * scale / max(width, height)` on both axes, tile
    /// camera centred on the rendered square. Every tile lines up with the
    /// single-pass render of the same camera.
    AspectConsistent,
}

/// The partition of an output image into cells of at most `tile_bound` pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileGrid {
    output: Resolution,
    tile_bound: u32,
}

impl TileGrid {
    pub fn new(output: Resolution, tile_bound: u32) -> Result<Self, PlanError> {
        if tile_bound == 0 {
            return Err(PlanError::ZeroTileBound);
        }

        Ok(Self { output, tile_bound })
    }

    #[must_use]
    pub fn output(&self) -> Resolution {
        self.output
    }

    #[must_use]
    pub fn tile_bound(&self) -> u32 {
        self.tile_bound
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.output.width().div_ceil(self.tile_bound)
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.output.height().div_ceil(self.tile_bound)
    }

    #[must_use]
    pub fn tile_count(&self) -> u64 {
        u64::from(self.columns()) * u64::from(self.rows())
    }

    /// Tiles in row-major order, top row first.
    pub fn tiles(&self) -> impl Iterator<Item = TileSpec> + '_ {
        let width = self.output.width();
        let height = self.output.height();
        let step = self.tile_bound;

        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |column| {
                let x = column * step;
                let y = row * step;

                TileSpec::new(x, y, step.min(width - x), step.min(height - y))
            })
        })
    }

    /// The camera a tile is rendered with. Derived copies never feed back
    /// into `camera`.
    pub fn tile_camera(
        &self,
        camera: &CameraState,
        tile: &TileSpec,
        mapping: TileMapping,
    ) -> Result<CameraState, PlanError> {
        let (center, scale) = match mapping {
            TileMapping::SourceCompatible => self.source_compatible_view(camera, tile),
            TileMapping::AspectConsistent => self.aspect_consistent_view(camera, tile),
        };

        camera
            .derive(center, scale)
            .map_err(|source| PlanError::TileCamera {
                offset_x: tile.offset_x,
                offset_y: tile.offset_y,
                source,
            })
    }

    pub fn plan(
        &self,
        camera: &CameraState,
        mapping: TileMapping,
    ) -> impl Iterator<Item = Result<PlannedTile, PlanError>> + '_ {
        let camera = *camera;

        self.tiles().map(move |spec| {
            self.tile_camera(&camera, &spec, mapping)
                .map(|camera| PlannedTile { spec, camera })
        })
    }

    fn source_compatible_view(&self, camera: &CameraState, tile: &TileSpec) -> (FractalCoord, f64) {
        let width = self.output.width();
        let height = self.output.height();
        let logical_scale = camera.scale();
        let logical_center = camera.center();

        let scale_x = logical_scale * 2.0 / f64::from(width);
        let scale_y = logical_scale * 2.0 / f64::from(height);

        let column_offset = i64::from(tile.offset_x) - i64::from(width / 2);
        let row_offset = i64::from(tile.offset_y) - i64::from(height / 2);

        let center = FractalCoord {
            x: logical_center.x + column_offset as f64 * scale_x,
            y: logical_center.y - row_offset as f64 * scale_y,
        };

        (center, self.tile_scale(logical_scale, tile))
    }

    fn aspect_consistent_view(&self, camera: &CameraState, tile: &TileSpec) -> (FractalCoord, f64) {
        let step = camera.pixel_step(self.output);
        let logical_center = camera.center();
        let half_render = f64::from(tile.render_size) / 2.0;

        let column_offset =
            f64::from(tile.offset_x) + half_render - f64::from(self.output.width()) / 2.0;
        let row_offset =
            f64::from(tile.offset_y) + half_render - f64::from(self.output.height()) / 2.0;

        let center = FractalCoord {
            x: logical_center.x + column_offset * step,
            y: logical_center.y - row_offset * step,
        };

        (center, self.tile_scale(camera.scale(), tile))
    }

    fn tile_scale(&self, logical_scale: f64, tile: &TileSpec) -> f64 {
        logical_scale * f64::from(tile.render_size) / f64::from(self.output.longer_side())
    }
}
