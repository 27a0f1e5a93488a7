mod dry_keyboard_hook;
mod r#trait;
#[cfg(windows)]
mod win32_hook;

pub use self::dry_keyboard_hook::DryRunKeyboardHook;
pub use self::r#trait::{create_keyboard_hook, KeyboardHookTrait};
#[cfg(windows)]
pub use self::win32_hook::Win32KeyboardHook;
