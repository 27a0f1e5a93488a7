use crate::events::KeyCode;
use std::collections::HashMap;

/// Which keys are currently held
#[derive(Debug, Default)]
pub struct KeyState {
    down: HashMap<KeyCode, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.get(&key).copied().unwrap_or(false)
    }

    /// Records a transition; returns false when the key was already in that state
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let previous = self.down.insert(key, pressed).unwrap_or(false);
        previous != pressed
    }

    pub fn ctrl(&self) -> bool {
        self.any_down(KeyCode::is_ctrl)
    }

    pub fn alt(&self) -> bool {
        self.any_down(KeyCode::is_alt)
    }

    pub fn shift(&self) -> bool {
        self.any_down(KeyCode::is_shift)
    }

    fn any_down(&self, predicate: fn(&KeyCode) -> bool) -> bool {
        self.down.iter().any(|(key, &down)| down && predicate(key))
    }
}
