//! Keyboard-driven window placement across monitors.
//!
//! Moves the foreground window to the monitor in a given direction and
//! splits it into half-screen layouts. Placement geometry lives in
//! [`layout`], the OS surface behind [`services::WindowSystem`].

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod mappings;
pub mod services;
pub mod utils;

pub use command::Command;
pub use config::Config;
pub use error::{Result, TelewindowError};
