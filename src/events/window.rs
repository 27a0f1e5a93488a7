use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque top-level window handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hwnd#{:x}", self.0)
    }
}

/// Show state derived from the window placement query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShowState {
    Normal,
    Maximized,
    Minimized,
}

impl fmt::Display for ShowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowState::Normal => write!(f, "normal"),
            ShowState::Maximized => write!(f, "maximized"),
            ShowState::Minimized => write!(f, "minimized"),
        }
    }
}

/// Side effects to suppress or request when repositioning a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionFlags {
    /// Keep the current z-order
    pub no_zorder: bool,
    /// Do not activate the window
    pub no_activate: bool,
    /// Show the window if hidden
    pub show_window: bool,
}

impl PositionFlags {
    pub const SHOW_WINDOW: PositionFlags = PositionFlags {
        no_zorder: false,
        no_activate: false,
        show_window: true,
    };
}
