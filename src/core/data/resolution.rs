use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("resolution must be non-zero: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Pixel dimensions of a render request or display surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ResolutionError> {
        if width == 0 || height == 0 {
            return Err(ResolutionError::InvalidSize { width, height });
        }

        Ok(Self { width, height })
    }

    pub fn square(size: u32) -> Result<Self, ResolutionError> {
        Self::new(size, size)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }

    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[must_use]
    pub fn fits_within(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_new_valid() {
        let resolution = Resolution::new(800, 600).unwrap();

        assert_eq!(resolution.width(), 800);
        assert_eq!(resolution.height(), 600);
        assert_eq!(resolution.longer_side(), 800);
        assert_eq!(resolution.pixel_count(), 480_000);
    }

    #[test]
    fn test_resolution_must_be_non_zero() {
        assert_eq!(
            Resolution::new(0, 10),
            Err(ResolutionError::InvalidSize { width: 0, height: 10 })
        );
        assert_eq!(
            Resolution::new(10, 0),
            Err(ResolutionError::InvalidSize { width: 10, height: 0 })
        );
        assert_eq!(
            Resolution::square(0),
            Err(ResolutionError::InvalidSize { width: 0, height: 0 })
        );
    }

    #[test]
    fn test_pixel_count_does_not_overflow_u32() {
        let resolution = Resolution::new(100_000, 100_000).unwrap();

        assert_eq!(resolution.pixel_count(), 10_000_000_000);
    }

    #[test]
    fn test_fits_within() {
        let resolution = Resolution::new(2048, 1024).unwrap();

        assert!(resolution.fits_within(2048));
        assert!(!resolution.fits_within(2047));
    }

    #[test]
    fn test_display() {
        assert_eq!(Resolution::new(1920, 1080).unwrap().to_string(), "1920x1080");
    }
}
