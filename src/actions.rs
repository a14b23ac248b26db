use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    ToggleFootprints,
    ClearFootprints,
}

/// Held state for movement, "just pressed" for the one-shot footprint actions.
#[derive(Default, Resource)]
pub struct ActionState {
    pressed: HashMap<PlayerAction, bool>,
}

impl ActionState {
    pub fn set(&mut self, action: PlayerAction, is_pressed: bool) {
        self.pressed.insert(action, is_pressed);
    }

    pub fn pressed(&self, action: PlayerAction) -> bool {
        *self.pressed.get(&action).unwrap_or(&false)
    }

    /// Unit XZ direction in camera space (x = right, y = forward), or zero.
    pub fn move_axis(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.pressed(PlayerAction::MoveForward) { dir.y += 1.0; }
        if self.pressed(PlayerAction::MoveBackward) { dir.y -= 1.0; }
        if self.pressed(PlayerAction::MoveRight) { dir.x += 1.0; }
        if self.pressed(PlayerAction::MoveLeft) { dir.x -= 1.0; }
        dir.normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut state = ActionState::default();
        state.set(PlayerAction::MoveForward, true);
        state.set(PlayerAction::MoveBackward, true);
        assert_eq!(state.move_axis(), Vec2::ZERO);
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut state = ActionState::default();
        state.set(PlayerAction::MoveForward, true);
        state.set(PlayerAction::MoveRight, true);
        assert!((state.move_axis().length() - 1.0).abs() < 1e-6);
        assert!(!state.pressed(PlayerAction::ClearFootprints));
    }
}
