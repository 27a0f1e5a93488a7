use crate::error::Result;
use crate::events::{PositionFlags, ShowState, WindowHandle};
use crate::layout::{Monitor, WindowRect};

/// The window and display calls placement needs from the operating system.
///
/// Every call is synchronous and may block until the target application
/// answers; callers run it off the async executor.
pub trait WindowSystem: Send + Sync {
    fn foreground_window(&self) -> Result<WindowHandle>;

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect>;

    /// Moves and resizes with repaint
    fn move_window(&self, handle: WindowHandle, rect: WindowRect) -> Result<()>;

    fn set_window_pos(&self, handle: WindowHandle, rect: WindowRect, flags: PositionFlags) -> Result<()>;

    fn show_state(&self, handle: WindowHandle) -> Result<ShowState>;

    fn set_show_state(&self, handle: WindowHandle, state: ShowState) -> Result<()>;

    /// Snapshot of every attached monitor, in enumeration order
    fn enumerate_monitors(&self) -> Result<Vec<Monitor>>;

    /// Turns the open/close/maximize animations of `handle` off or back on
    fn set_window_transitions_disabled(&self, handle: WindowHandle, disabled: bool) -> Result<()>;
}

impl<W: WindowSystem + ?Sized> WindowSystem for Box<W> {
    fn foreground_window(&self) -> Result<WindowHandle> {
        (**self).foreground_window()
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect> {
        (**self).window_rect(handle)
    }

    fn move_window(&self, handle: WindowHandle, rect: WindowRect) -> Result<()> {
        (**self).move_window(handle, rect)
    }

    fn set_window_pos(&self, handle: WindowHandle, rect: WindowRect, flags: PositionFlags) -> Result<()> {
        (**self).set_window_pos(handle, rect, flags)
    }

    fn show_state(&self, handle: WindowHandle) -> Result<ShowState> {
        (**self).show_state(handle)
    }

    fn set_show_state(&self, handle: WindowHandle, state: ShowState) -> Result<()> {
        (**self).set_show_state(handle, state)
    }

    fn enumerate_monitors(&self) -> Result<Vec<Monitor>> {
        (**self).enumerate_monitors()
    }

    fn set_window_transitions_disabled(&self, handle: WindowHandle, disabled: bool) -> Result<()> {
        (**self).set_window_transitions_disabled(handle, disabled)
    }
}

/// Factory function to create the window system for this host
pub fn create_window_system(dry_run: bool) -> Result<Box<dyn WindowSystem>> {
    if dry_run {
        return Ok(Box::new(super::dry_run::DryRunWindowSystem::new()));
    }

    #[cfg(windows)]
    {
        Ok(Box::new(super::win32::Win32WindowSystem::new()))
    }

    #[cfg(not(windows))]
    {
        tracing::warn!("No native window system on this platform, falling back to dry-run");
        Ok(Box::new(super::dry_run::DryRunWindowSystem::new()))
    }
}
