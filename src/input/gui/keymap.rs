use crate::controllers::interactive::input_event::{InputEvent, NavKey};
use crate::core::navigation::controls::Direction;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

#[must_use]
pub fn nav_key(code: KeyCode) -> Option<NavKey> {
    let key = match code {
        KeyCode::KeyW | KeyCode::ArrowUp => NavKey::Pan(Direction::Up),
        KeyCode::KeyS | KeyCode::ArrowDown => NavKey::Pan(Direction::Down),
        KeyCode::KeyA | KeyCode::ArrowLeft => NavKey::Pan(Direction::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => NavKey::Pan(Direction::Right),
        KeyCode::F11 => NavKey::ToggleFullscreen,
        _ => return None,
    };

    Some(key)
}

#[must_use]
pub fn key_event(code: KeyCode, state: ElementState) -> Option<InputEvent> {
    let key = nav_key(code)?;

    Some(match state {
        ElementState::Pressed => InputEvent::KeyDown(key),
        ElementState::Released => InputEvent::KeyUp(key),
    })
}

/// Releases every pan direction, for when the window loses focus mid-press.
#[must_use]
pub fn release_all() -> [InputEvent; 4] {
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        .map(|direction| InputEvent::KeyUp(NavKey::Pan(direction)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_share_directions() {
        assert_eq!(nav_key(KeyCode::KeyW), nav_key(KeyCode::ArrowUp));
        assert_eq!(nav_key(KeyCode::KeyS), nav_key(KeyCode::ArrowDown));
        assert_eq!(nav_key(KeyCode::KeyA), nav_key(KeyCode::ArrowLeft));
        assert_eq!(nav_key(KeyCode::KeyD), Some(NavKey::Pan(Direction::Right)));
    }

    #[test]
    fn f11_toggles_fullscreen() {
        assert_eq!(nav_key(KeyCode::F11), Some(NavKey::ToggleFullscreen));
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert_eq!(nav_key(KeyCode::KeyQ), None);
        assert_eq!(key_event(KeyCode::Space, ElementState::Pressed), None);
    }

    #[test]
    fn element_state_selects_down_or_up() {
        assert_eq!(
            key_event(KeyCode::KeyW, ElementState::Pressed),
            Some(InputEvent::KeyDown(NavKey::Pan(Direction::Up)))
        );
        assert_eq!(
            key_event(KeyCode::F11, ElementState::Released),
            Some(InputEvent::KeyUp(NavKey::ToggleFullscreen))
        );
    }

    #[test]
    fn release_all_covers_every_direction() {
        let events = release_all();

        assert!(events.contains(&InputEvent::KeyUp(NavKey::Pan(Direction::Left))));
        assert!(events.iter().all(|event| matches!(event, InputEvent::KeyUp(NavKey::Pan(_)))));
    }
}
