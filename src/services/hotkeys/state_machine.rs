use super::binding::KeyBinding;
use super::key_state::KeyState;
use crate::command::Command;
use crate::debug_if_enabled;
use crate::events::{KeyCode, KeyEvent, KeyTransition};
use std::time::{Duration, Instant};
use tracing::info;

/// Minimum spacing between two accepted chords
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(50);

/// Turns raw key transitions into placement commands.
///
/// Only fresh key-down transitions can fire; OS auto-repeat re-delivers
/// "down" for a key that is already held and is ignored.
pub struct HotkeyStateMachine {
    bindings: Vec<(Command, KeyBinding)>,
    keys: KeyState,
    last_trigger: Option<Instant>,
}

impl HotkeyStateMachine {
    /// `bindings` are evaluated in the given order; the first match wins
    pub fn new(bindings: Vec<(Command, KeyBinding)>) -> Self {
        info!("HotkeyStateMachine: {} bindings", bindings.len());
        Self {
            bindings,
            keys: KeyState::new(),
            last_trigger: None,
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys.is_down(key)
    }

    pub fn handle_event(&mut self, event: &KeyEvent) -> Option<Command> {
        match event.transition {
            KeyTransition::Down => {
                if !self.keys.update_key(event.key, true) {
                    return None;
                }
                self.on_key_down(event)
            }
            KeyTransition::Up => {
                self.keys.update_key(event.key, false);
                None
            }
        }
    }

    fn on_key_down(&mut self, event: &KeyEvent) -> Option<Command> {
        if let Some(last) = self.last_trigger {
            let elapsed = event.timestamp.saturating_duration_since(last);
            if elapsed < DEBOUNCE_INTERVAL {
                debug_if_enabled!("{} debounced ({} ms after last chord)", event, elapsed.as_millis());
                return None;
            }
        }

        let (command, binding) = self
            .bindings
            .iter()
            .find(|(_, binding)| binding.matches(&self.keys))?;

        info!("Hotkey {} pressed: {}", binding, command);
        self.last_trigger = Some(event.timestamp);
        Some(*command)
    }
}
