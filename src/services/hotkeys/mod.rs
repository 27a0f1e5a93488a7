//! Chord recognition over the raw key-event stream

mod binding;
mod key_state;
mod state_machine;

pub use binding::KeyBinding;
pub use key_state::KeyState;
pub use state_machine::{HotkeyStateMachine, DEBOUNCE_INTERVAL};
