use crate::mappings::VirtualKeyToKeyName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Direction of a key transition as reported by the keyboard hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyTransition {
    Down,
    Up,
}

/// Windows virtual-key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SHIFT: KeyCode = KeyCode(0x10);
    pub const CONTROL: KeyCode = KeyCode(0x11);
    pub const MENU: KeyCode = KeyCode(0x12);
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);
    pub const LSHIFT: KeyCode = KeyCode(0xA0);
    pub const RSHIFT: KeyCode = KeyCode(0xA1);
    pub const LCONTROL: KeyCode = KeyCode(0xA2);
    pub const RCONTROL: KeyCode = KeyCode(0xA3);
    pub const LMENU: KeyCode = KeyCode(0xA4);
    pub const RMENU: KeyCode = KeyCode(0xA5);

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_ctrl(&self) -> bool {
        matches!(*self, Self::CONTROL | Self::LCONTROL | Self::RCONTROL)
    }

    pub fn is_alt(&self) -> bool {
        matches!(*self, Self::MENU | Self::LMENU | Self::RMENU)
    }

    pub fn is_shift(&self) -> bool {
        matches!(*self, Self::SHIFT | Self::LSHIFT | Self::RSHIFT)
    }

    pub fn is_modifier(&self) -> bool {
        self.is_ctrl() || self.is_alt() || self.is_shift()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match VirtualKeyToKeyName::translate(*self) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "VK_0x{:02X}", self.0),
        }
    }
}

/// Raw keyboard event delivered by the hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub transition: KeyTransition,
    pub timestamp: Instant,
}

impl KeyEvent {
    pub fn new(key: KeyCode, transition: KeyTransition, timestamp: Instant) -> Self {
        Self {
            key,
            transition,
            timestamp,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.key, self.transition)
    }
}
