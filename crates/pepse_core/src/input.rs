//! Avatar key state.
//!
//! The driver sets the held keys once per tick, from a live source or a
//! scripted walk. Queries are level-triggered: a key counts for every tick it
//! stays down.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held set wholesale.
    pub fn set_held(&mut self, keys: &[Key]) {
        self.held.clear();
        self.held.extend(keys.iter().copied());
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Horizontal intent: -1, 0 or 1. Opposing keys cancel out.
    pub fn axis_x(&self) -> f32 {
        match (self.is_held(Key::Left), self.is_held(Key::Right)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_stay_held_across_ticks() {
        let mut input = InputState::new();
        input.set_held(&[Key::Jump]);
        input.set_held(&[Key::Jump]);
        assert!(input.is_held(Key::Jump), "holding is level-triggered");
        assert!(input.any_held());
    }

    #[test]
    fn set_held_releases_missing_keys() {
        let mut input = InputState::new();
        input.set_held(&[Key::Left, Key::Jump]);
        input.set_held(&[Key::Left]);
        assert!(!input.is_held(Key::Jump));
        assert!(input.is_held(Key::Left));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.set_held(&[Key::Left, Key::Right]);
        assert_eq!(input.axis_x(), 0.0);
        input.set_held(&[Key::Right]);
        assert_eq!(input.axis_x(), 1.0);
        input.set_held(&[]);
        assert!(!input.any_held());
    }
}
