use std::collections::{HashMap, HashSet};

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Tracks keyboard state across frames.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame pressed/released flags.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Handle a keyboard input event from winit.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match event.state {
                ElementState::Pressed => self.press(keycode),
                ElementState::Released => self.release(keycode),
            }
        }
    }

    /// Record a key going down. OS auto-repeat does not re-trigger the edge.
    pub fn press(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    /// Record a key going up.
    pub fn release(&mut self, key: KeyCode) {
        if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    /// Returns true if the key is currently held down.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true only on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }
}

/// A logical input action (e.g. "move_left", "interact").
///
/// Game code binds one or more keys to each action and then queries the
/// action state instead of referencing key codes directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(name: impl Into<String>) -> Self {
        ActionId(name.into())
    }
}

/// Mapping from named actions to physical keys.
#[derive(Clone, Debug, Default)]
pub struct InputMap {
    actions: HashMap<ActionId, Vec<KeyCode>>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action. An action may have several keys.
    pub fn bind_key(&mut self, action: ActionId, key: KeyCode) {
        let keys = self.actions.entry(action).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    /// Builder-style variant of [`InputMap::bind_key`].
    #[must_use]
    pub fn with_binding(mut self, action: &str, keys: &[KeyCode]) -> Self {
        for &key in keys {
            self.bind_key(ActionId::new(action), key);
        }
        self
    }

    /// Keys currently bound to an action.
    pub fn keys(&self, action: &ActionId) -> &[KeyCode] {
        self.actions.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if any key bound to the action is held down.
    pub fn action_down(&self, input: &InputState, action: &ActionId) -> bool {
        self.keys(action).iter().any(|&k| input.is_key_down(k))
    }

    /// Check if any key bound to the action went down this frame.
    pub fn action_pressed(&self, input: &InputState, action: &ActionId) -> bool {
        self.keys(action).iter().any(|&k| input.is_key_pressed(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_edge_triggered() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyE);
        assert!(input.is_key_pressed(KeyCode::KeyE));
        assert!(input.is_key_down(KeyCode::KeyE));

        input.begin_frame();
        input.press(KeyCode::KeyE); // auto-repeat
        assert!(!input.is_key_pressed(KeyCode::KeyE));
        assert!(input.is_key_down(KeyCode::KeyE));

        input.release(KeyCode::KeyE);
        assert!(input.is_key_released(KeyCode::KeyE));
        assert!(!input.is_key_down(KeyCode::KeyE));
    }

    #[test]
    fn action_uses_any_bound_key() {
        let map = InputMap::new().with_binding("left", &[KeyCode::ArrowLeft, KeyCode::KeyA]);
        let left = ActionId::new("left");
        let mut input = InputState::new();

        assert!(!map.action_down(&input, &left));
        input.press(KeyCode::KeyA);
        assert!(map.action_down(&input, &left));
        assert!(map.action_pressed(&input, &left));
    }

    #[test]
    fn unbound_action_is_never_active() {
        let map = InputMap::new();
        let mut input = InputState::new();
        input.press(KeyCode::Space);
        assert!(!map.action_down(&input, &ActionId::new("jump")));
        assert!(map.keys(&ActionId::new("jump")).is_empty());
    }
}
