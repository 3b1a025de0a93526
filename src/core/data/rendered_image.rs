use crate::core::data::resolution::Resolution;
use image::RgbImage;
use image::imageops::flip_vertical_in_place;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderedImageError {
    #[error("resolution {resolution} needs {expected} bytes, buffer has {actual}")]
    BoundsMismatch {
        resolution: Resolution,
        expected: usize,
        actual: usize,
    },
}

/// Vertical order of the rows in a rendered buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RowOrder {
    /// Row 0 is the top of the image.
    TopDown,
    /// Row 0 is the bottom of the image (GL framebuffer readback order).
    BottomUp,
}

/// An RGB pixel buffer produced by a render surface.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    image: RgbImage,
    row_order: RowOrder,
}

impl RenderedImage {
    pub fn from_rgb(
        resolution: Resolution,
        row_order: RowOrder,
        data: Vec<u8>,
    ) -> Result<Self, RenderedImageError> {
        let expected = resolution.pixel_count() as usize * 3;
        let actual = data.len();
        let mismatch = RenderedImageError::BoundsMismatch {
            resolution,
            expected,
            actual,
        };

        if actual != expected {
            return Err(mismatch);
        }

        let image =
            RgbImage::from_raw(resolution.width(), resolution.height(), data).ok_or(mismatch)?;

        Ok(Self { image, row_order })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Returns the image with row 0 at the top, flipping if needed.
    #[must_use]
    pub fn into_top_down(self) -> RgbImage {
        let mut image = self.image;

        if self.row_order == RowOrder::BottomUp {
            flip_vertical_in_place(&mut image);
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(width: u32, height: u32) -> Resolution {
        Resolution::new(width, height).unwrap()
    }

    fn two_row_data() -> Vec<u8> {
        vec![
            1, 1, 1, 2, 2, 2, // row 0
            3, 3, 3, 4, 4, 4, // row 1
        ]
    }

    #[test]
    fn test_from_rgb_valid() {
        let image = RenderedImage::from_rgb(resolution(2, 2), RowOrder::TopDown, two_row_data())
            .unwrap();

        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.row_order(), RowOrder::TopDown);
        assert_eq!(image.as_raw(), two_row_data().as_slice());
    }

    #[test]
    fn test_from_rgb_buffer_too_small() {
        let result = RenderedImage::from_rgb(resolution(2, 2), RowOrder::TopDown, vec![0; 3]);

        assert_eq!(
            result.unwrap_err(),
            RenderedImageError::BoundsMismatch {
                resolution: resolution(2, 2),
                expected: 12,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_from_rgb_buffer_too_large() {
        let result = RenderedImage::from_rgb(resolution(2, 2), RowOrder::BottomUp, vec![0; 24]);

        assert_eq!(
            result.unwrap_err(),
            RenderedImageError::BoundsMismatch {
                resolution: resolution(2, 2),
                expected: 12,
                actual: 24,
            }
        );
    }

    #[test]
    fn test_top_down_buffer_is_not_flipped() {
        let image = RenderedImage::from_rgb(resolution(2, 2), RowOrder::TopDown, two_row_data())
            .unwrap();

        assert_eq!(image.into_top_down().into_raw(), two_row_data());
    }

    #[test]
    fn test_bottom_up_buffer_is_flipped() {
        let image = RenderedImage::from_rgb(resolution(2, 2), RowOrder::BottomUp, two_row_data())
            .unwrap();

        assert_eq!(
            image.into_top_down().into_raw(),
            vec![3, 3, 3, 4, 4, 4, 1, 1, 1, 2, 2, 2]
        );
    }
}
