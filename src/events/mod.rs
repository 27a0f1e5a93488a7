pub mod keyboard;
pub mod window;

pub use keyboard::{KeyCode, KeyEvent, KeyTransition};
pub use window::{PositionFlags, ShowState, WindowHandle};
