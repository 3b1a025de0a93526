use std::ops::{Add, Sub};

/// A point in fractal space. Y increases upward.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FractalCoord {
    pub x: f64,
    pub y: f64,
}

impl FractalCoord {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn max_abs_component(&self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}

impl Add for FractalCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for FractalCoord {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}
