use crate::core::data::camera::{CameraError, CameraState};
use crate::core::navigation::controls::PanControls;
use crate::core::navigation::limits::NavigationLimits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationWarning {
    ScaleClampedToMin,
    ScaleClampedToMax,
}

/// Pans by `scale / frame_rate` along each held axis. Opposite keys cancel.
pub fn apply_pan(
    camera: &mut CameraState,
    controls: PanControls,
    limits: &NavigationLimits,
) -> Result<(), CameraError> {
    let step = camera.pan_step(limits.frame_rate)?;
    let dx = axis_from_pair(controls.right, controls.left) * step;
    let dy = axis_from_pair(controls.up, controls.down) * step;

    if dx == 0.0 && dy == 0.0 {
        return Ok(());
    }

    camera.pan(dx, dy)
}

/// Wheel up zooms in, wheel down zooms out. Only the sign of `delta_y` counts.
#[must_use]
pub fn wheel_zoom_factor(delta_y: f64, zoom_step: f64) -> Option<f64> {
    if delta_y > 0.0 {
        Some(zoom_step.recip())
    } else if delta_y < 0.0 {
        Some(zoom_step)
    } else {
        None
    }
}

/// Applies one wheel tick. A tick that would carry the scale out of the
/// navigation limits stops at the bound it crosses; a scale already outside
/// the limits zooms by the plain factor.
pub fn apply_wheel(
    camera: &mut CameraState,
    delta_y: f64,
    limits: &NavigationLimits,
) -> Result<Option<NavigationWarning>, CameraError> {
    let Some(factor) = wheel_zoom_factor(delta_y, limits.zoom_step) else {
        return Ok(None);
    };

    let scale = camera.scale();
    let target = scale * factor;

    if factor < 1.0 && scale >= limits.min_scale && target < limits.min_scale {
        camera.set_scale(limits.min_scale)?;
        return Ok(Some(NavigationWarning::ScaleClampedToMin));
    }

    if factor > 1.0 && scale <= limits.max_scale && target > limits.max_scale {
        camera.set_scale(limits.max_scale)?;
        return Ok(Some(NavigationWarning::ScaleClampedToMax));
    }

    camera.zoom(factor)?;
    Ok(None)
}

/// Moves a scale that starts outside the navigation limits onto the nearest bound.
pub fn clamp_to_limits(
    camera: &mut CameraState,
    limits: &NavigationLimits,
) -> Result<Option<NavigationWarning>, CameraError> {
    let scale = camera.scale();

    if scale < limits.min_scale {
        camera.set_scale(limits.min_scale)?;
        Ok(Some(NavigationWarning::ScaleClampedToMin))
    } else if scale > limits.max_scale {
        camera.set_scale(limits.max_scale)?;
        Ok(Some(NavigationWarning::ScaleClampedToMax))
    } else {
        Ok(None)
    }
}

fn axis_from_pair(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
