pub mod controls;
pub mod limits;
pub mod motion;

pub use controls::{Direction, PanControls};
pub use limits::NavigationLimits;
pub use motion::{NavigationWarning, apply_pan, apply_wheel, clamp_to_limits, wheel_zoom_factor};
