//! Abstract player commands
//!
//! The host's input source latches key state into a [`CommandSet`]; each step
//! reads its own copy, so changes mid-step only affect the next step.

use serde::{Deserialize, Serialize};

/// A single abstract action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    /// Fly forward (faster scroll)
    Up,
    /// Hold back (slower scroll)
    Down,
    Fire,
}

impl Action {
    /// Map a key or command name; unknown names are `None`
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "left" | "ArrowLeft" | "a" | "A" => Some(Action::Left),
            "right" | "ArrowRight" | "d" | "D" => Some(Action::Right),
            "up" | "ArrowUp" | "w" | "W" => Some(Action::Up),
            "down" | "ArrowDown" | "s" | "S" => Some(Action::Down),
            "fire" | " " | "Space" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Commands held (or, for `fire`, pressed) this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandSet {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// One-shot: consumed by the step that reads it
    pub fire: bool,
}

impl CommandSet {
    /// Build from a list of held key names, ignoring unknown keys
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut commands = Self::default();
        for action in keys.into_iter().filter_map(Action::parse) {
            commands.set(action, true);
        }
        commands
    }

    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Up => self.up = held,
            Action::Down => self.down = held,
            Action::Fire => self.fire = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Fire => self.fire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys_ignores_unknown() {
        let commands = CommandSet::from_keys(["ArrowLeft", "q", "fire", "", "Escape"]);
        assert!(commands.left);
        assert!(commands.fire);
        assert!(!commands.right && !commands.up && !commands.down);
    }

    #[test]
    fn test_set_and_query() {
        let mut commands = CommandSet::default();
        commands.set(Action::Up, true);
        assert!(commands.is_held(Action::Up));
        commands.set(Action::Up, false);
        assert_eq!(commands, CommandSet::default());
    }
}
