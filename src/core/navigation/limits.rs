use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationLimits {
    pub frame_rate: u32,
    /// Scale multiplier applied per wheel tick.
    pub zoom_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl NavigationLimits {
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
        }
    }
}

impl Default for NavigationLimits {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            zoom_step: 1.1,
            min_scale: 1e-13,
            max_scale: 16.0,
        }
    }
}
