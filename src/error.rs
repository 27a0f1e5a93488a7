use crate::layout::Direction;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelewindowError {
    #[error("Monitor enumeration failed: {0}")]
    Enumeration(String),

    #[error("No foreground window")]
    NoForegroundWindow,

    #[error("Window does not intersect any monitor")]
    NoIntersectingMonitor,

    #[error("No monitor to the {0} of the current one")]
    NoMonitorInDirection(Direction),

    #[error("Only {0} monitor(s) detected")]
    SingleMonitorOnly(usize),

    #[error("{call} failed: {reason}")]
    PlatformCallFailed { call: &'static str, reason: String },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Keyboard hook error: {0}")]
    KeyboardHook(String),

    #[error("Insufficient privileges: {0}")]
    Permission(String),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TelewindowError {
    /// Outcomes that follow from the desktop layout rather than from a failure,
    /// e.g. asking for a monitor to the left of the leftmost one
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            TelewindowError::NoMonitorInDirection(_)
                | TelewindowError::SingleMonitorOnly(_)
                | TelewindowError::NoIntersectingMonitor
                | TelewindowError::NoForegroundWindow
        )
    }
}

pub type Result<T> = std::result::Result<T, TelewindowError>;

/// Builds a `PlatformCallFailed` error for the named OS call
#[macro_export]
macro_rules! platform_error {
    ($call:expr, $($arg:tt)*) => {
        $crate::error::TelewindowError::PlatformCallFailed {
            call: $call,
            reason: format!($($arg)*),
        }
    };
}
