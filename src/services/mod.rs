pub mod dispatcher;
pub mod hotkeys;
pub mod keyboard_hook;
pub mod placement;
pub mod window_system;

pub use dispatcher::HotkeyDispatcher;
pub use hotkeys::HotkeyStateMachine;
pub use keyboard_hook::{create_keyboard_hook, KeyboardHookTrait};
pub use placement::{PlacementEngine, PlacementSettings, SplitOutcome};
pub use window_system::{create_window_system, WindowSystem};
