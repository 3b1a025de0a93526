use crate::core::data::coord::FractalCoord;
use crate::core::data::resolution::Resolution;

pub const DEFAULT_CENTER: FractalCoord = FractalCoord::new(0.0, 0.0);
pub const DEFAULT_SCALE: f64 = 1.0;
pub const DEFAULT_ITERATIONS: u32 = 100;

#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
    #[error("center must be finite, got ({x}, {y})")]
    NonFiniteCenter { x: f64, y: f64 },
    #[error("pan displacement must be finite, got ({dx}, {dy})")]
    NonFinitePan { dx: f64, dy: f64 },
    #[error("zoom factor must be a positive finite number, got {0}")]
    InvalidZoomFactor(f64),
    #[error("iterations must be greater than zero")]
    ZeroIterations,
    #[error("frame rate must be greater than zero")]
    ZeroFrameRate,
}

/// The current view of fractal space.
///
/// `scale` is the half-extent of the viewport along the longer screen axis,
/// so a camera with scale `s` shows `[-s, s]` around `center` on that axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    center: FractalCoord,
    scale: f64,
    iterations: u32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            scale: DEFAULT_SCALE,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl CameraState {
    pub fn new(center: FractalCoord, scale: f64, iterations: u32) -> Result<Self, CameraError> {
        validate_center(center)?;
        validate_scale(scale)?;

        if iterations == 0 {
            return Err(CameraError::ZeroIterations);
        }

        Ok(Self {
            center,
            scale,
            iterations,
        })
    }

    #[must_use]
    pub fn center(&self) -> FractalCoord {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<(), CameraError> {
        let next = self.center + FractalCoord::new(dx, dy);

        if !dx.is_finite() || !dy.is_finite() || !next.is_finite() {
            return Err(CameraError::NonFinitePan { dx, dy });
        }

        self.center = next;
        Ok(())
    }

    /// Multiplies `scale` by `factor`. The camera is left untouched on error.
    pub fn zoom(&mut self, factor: f64) -> Result<(), CameraError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CameraError::InvalidZoomFactor(factor));
        }

        let next = self.scale * factor;
        validate_scale(next)?;

        self.scale = next;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<(), CameraError> {
        validate_scale(scale)?;

        self.scale = scale;
        Ok(())
    }

    pub fn set_iterations(&mut self, iterations: u32) -> Result<(), CameraError> {
        if iterations == 0 {
            return Err(CameraError::ZeroIterations);
        }

        self.iterations = iterations;
        Ok(())
    }

    /// Distance panned per held direction key per frame.
    pub fn pan_step(&self, frame_rate: u32) -> Result<f64, CameraError> {
        if frame_rate == 0 {
            return Err(CameraError::ZeroFrameRate);
        }

        Ok(self.scale / f64::from(frame_rate))
    }

    /// A copy looking at `center` with `scale`, keeping the iteration bound.
    pub fn derive(&self, center: FractalCoord, scale: f64) -> Result<Self, CameraError> {
        Self::new(center, scale, self.iterations)
    }

    /// Fractal-space width of one pixel when this camera is rendered at `resolution`.
    #[must_use]
    pub fn pixel_step(&self, resolution: Resolution) -> f64 {
        self.scale * 2.0 / f64::from(resolution.longer_side())
    }

    /// The shader evaluates in f32; past this point neighbouring pixels
    /// collapse onto the same coordinate.
    #[must_use]
    pub fn single_precision_exhausted(&self, resolution: Resolution) -> bool {
        let magnitude = self.center.max_abs_component().max(self.scale);
        self.pixel_step(resolution) < magnitude * f64::from(f32::EPSILON)
    }
}

fn validate_scale(scale: f64) -> Result<(), CameraError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CameraError::InvalidScale(scale));
    }

    Ok(())
}

fn validate_center(center: FractalCoord) -> Result<(), CameraError> {
    if !center.is_finite() {
        return Err(CameraError::NonFiniteCenter {
            x: center.x,
            y: center.y,
        });
    }

    Ok(())
}
