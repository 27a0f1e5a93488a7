//! Window system adapter: the only place that touches OS window and display APIs.
//!
//! Placement logic is written against [`WindowSystem`] and never sees raw
//! handles or OS structures.

mod dry_run;
mod r#trait;
#[cfg(windows)]
mod win32;

pub use self::dry_run::{DryRunWindowSystem, DRY_RUN_WINDOW};
pub use self::r#trait::{create_window_system, WindowSystem};
#[cfg(windows)]
pub use self::win32::Win32WindowSystem;
