use crate::core::navigation::controls::Direction;

/// Keys the session reacts to, after the windowing layer has mapped them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Pan(Direction),
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(NavKey),
    KeyUp(NavKey),
    /// Vertical wheel movement; only the sign is used.
    Wheel { delta_y: f64 },
    Resize { width: u32, height: u32 },
    SetIterations(u32),
    Quit,
}
