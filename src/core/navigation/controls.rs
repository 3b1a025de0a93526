#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which pan directions are currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanControls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl PanControls {
    /// Records a press or release. Repeated presses are idempotent.
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, PanControls};

    #[test]
    fn default_controls_hold_nothing() {
        let controls = PanControls::default();

        assert!(!controls.up);
        assert!(!controls.down);
        assert!(!controls.left);
        assert!(!controls.right);
    }

    #[test]
    fn repeated_press_does_not_stack() {
        let mut controls = PanControls::default();

        controls.set(Direction::Left, true);
        controls.set(Direction::Left, true);
        controls.set(Direction::Left, false);

        assert_eq!(controls, PanControls::default());
    }
}
