//! Keyboard state with level-triggered and edge-triggered queries.
//!
//! - **Held:** `is_held(key)` is true every frame the key is physically down.
//!   Movement and jumping read this, so holding a key keeps re-applying its
//!   effect each tick.
//!
//! - **Just pressed / just released:** true only during the frame the
//!   transition happened, cleared by `end_frame()`. Used for one-shot actions
//!   such as toggling the debug overlay or closing the window.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    Escape,
    F3,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Drops every held key, e.g. when the window loses focus and release
    /// events would otherwise never arrive.
    pub fn release_all(&mut self) {
        for key in self.held.drain() {
            self.just_released.insert(key);
        }
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        assert!(input.is_held(Key::Right));
        assert!(input.is_just_pressed(Key::Right));
    }

    #[test]
    fn test_key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_just_released(Key::Left));
    }

    #[test]
    fn test_os_key_repeat_is_ignored() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.end_frame();
        // Auto-repeat delivers another press while the key is still held.
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::Up);
        assert!(!input.is_just_released(Key::Up));
        assert!(!input.is_held(Key::Up));
    }

    #[test]
    fn test_end_frame_clears_transient_state_but_keeps_held() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::Space);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Right));
        assert!(!input.is_just_pressed(Key::Space));
        assert!(input.is_held(Key::Right));
        assert!(input.is_held(Key::Space));
    }

    #[test]
    fn test_release_all_clears_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::Up);
        input.release_all();
        assert!(!input.is_held(Key::Right));
        assert!(!input.is_held(Key::Up));
        assert!(input.is_just_released(Key::Right));
        assert!(input.is_just_released(Key::Up));
    }

    #[test]
    fn test_multiple_keys_independent() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Space);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_held(Key::Space));
        assert!(!input.is_just_released(Key::Space));
    }
}
