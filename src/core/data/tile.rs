use crate::core::data::camera::CameraState;

/// One cell of the output grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileSpec {
    pub offset_x: u32,
    pub offset_y: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Side of the square actually rendered, `max(tile_width, tile_height)`.
    pub render_size: u32,
}

impl TileSpec {
    #[must_use]
    pub fn new(offset_x: u32, offset_y: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            offset_x,
            offset_y,
            tile_width,
            tile_height,
            render_size: tile_width.max(tile_height),
        }
    }

    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.tile_width) * u64::from(self.tile_height)
    }

    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.offset_x
            && y >= self.offset_y
            && x - self.offset_x < self.tile_width
            && y - self.offset_y < self.tile_height
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlannedTile {
    pub spec: TileSpec,
    pub camera: CameraState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_size_covers_the_longer_side() {
        assert_eq!(TileSpec::new(0, 0, 400, 400).render_size, 400);
        assert_eq!(TileSpec::new(800, 0, 200, 400).render_size, 400);
        assert_eq!(TileSpec::new(0, 800, 400, 150).render_size, 400);
        assert_eq!(TileSpec::new(800, 800, 200, 150).render_size, 200);
    }

    #[test]
    fn contains_is_half_open() {
        let tile = TileSpec::new(10, 20, 5, 4);

        assert!(tile.contains(10, 20));
        assert!(tile.contains(14, 23));
        assert!(!tile.contains(15, 20));
        assert!(!tile.contains(10, 24));
        assert!(!tile.contains(9, 20));
    }

    #[test]
    fn pixel_count_is_logical_area() {
        assert_eq!(TileSpec::new(0, 0, 200, 150).pixel_count(), 30_000);
    }
}
