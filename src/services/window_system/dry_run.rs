use super::r#trait::WindowSystem;
use crate::error::{Result, TelewindowError};
use crate::events::{PositionFlags, ShowState, WindowHandle};
use crate::layout::{current_monitor, Monitor, MonitorHandle, WindowRect};
use crate::platform_error;
use parking_lot::Mutex;
use tracing::info;

/// The only window on the simulated desktop
pub const DRY_RUN_WINDOW: WindowHandle = WindowHandle(0x1);

/// Invisible resize border a maximized window reports around the work area
const MAXIMIZED_BORDER: i32 = 8;

/// Where a minimized window is parked
const MINIMIZED_RECT: WindowRect = WindowRect {
    left: -32000,
    top: -32000,
    right: -31840,
    bottom: -31972,
};

struct Desktop {
    monitors: Vec<Monitor>,
    rect: WindowRect,
    /// Rectangle to come back to when leaving maximized or minimized
    normal_rect: WindowRect,
    show_state: ShowState,
    transitions_disabled: bool,
}

/// In-memory desktop that behaves like the real one closely enough to
/// watch every placement command without touching the OS.
pub struct DryRunWindowSystem {
    desktop: Mutex<Desktop>,
}

impl DryRunWindowSystem {
    /// A 1920x1080 primary monitor with a 2560x1440 one to its right, and a
    /// 1280x720 window on the primary
    pub fn new() -> Self {
        let primary = WindowRect::from_origin_size(0, 0, 1920, 1080);
        let secondary = WindowRect::from_origin_size(1920, 0, 2560, 1440);
        let monitors = vec![
            Monitor::new(
                MonitorHandle(0x10001),
                primary,
                WindowRect::new(primary.left, primary.top, primary.right, primary.bottom - 40),
            ),
            Monitor::new(
                MonitorHandle(0x10002),
                secondary,
                WindowRect::new(secondary.left, secondary.top, secondary.right, secondary.bottom - 40),
            ),
        ];
        Self::with_desktop(monitors, WindowRect::from_origin_size(320, 180, 1280, 720))
    }

    pub fn with_desktop(monitors: Vec<Monitor>, window: WindowRect) -> Self {
        Self {
            desktop: Mutex::new(Desktop {
                monitors,
                rect: window,
                normal_rect: window,
                show_state: ShowState::Normal,
                transitions_disabled: false,
            }),
        }
    }

    pub fn transitions_disabled(&self) -> bool {
        self.desktop.lock().transitions_disabled
    }

    fn check_handle(call: &'static str, handle: WindowHandle) -> Result<()> {
        if handle == DRY_RUN_WINDOW {
            Ok(())
        } else {
            Err(platform_error!(call, "invalid window handle {}", handle))
        }
    }

    fn place(&self, call: &'static str, handle: WindowHandle, rect: WindowRect) -> Result<()> {
        Self::check_handle(call, handle)?;
        let mut desktop = self.desktop.lock();
        desktop.rect = rect;
        desktop.normal_rect = rect;
        desktop.show_state = ShowState::Normal;
        Ok(())
    }
}

impl Default for DryRunWindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSystem for DryRunWindowSystem {
    fn foreground_window(&self) -> Result<WindowHandle> {
        Ok(DRY_RUN_WINDOW)
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect> {
        Self::check_handle("GetWindowRect", handle)?;
        Ok(self.desktop.lock().rect)
    }

    fn move_window(&self, handle: WindowHandle, rect: WindowRect) -> Result<()> {
        info!("[DRY RUN] MoveWindow {} -> {}", handle, rect);
        self.place("MoveWindow", handle, rect)
    }

    fn set_window_pos(&self, handle: WindowHandle, rect: WindowRect, flags: PositionFlags) -> Result<()> {
        info!("[DRY RUN] SetWindowPos {} -> {} {:?}", handle, rect, flags);
        self.place("SetWindowPos", handle, rect)
    }

    fn show_state(&self, handle: WindowHandle) -> Result<ShowState> {
        Self::check_handle("GetWindowPlacement", handle)?;
        Ok(self.desktop.lock().show_state)
    }

    fn set_show_state(&self, handle: WindowHandle, state: ShowState) -> Result<()> {
        Self::check_handle("ShowWindow", handle)?;
        info!("[DRY RUN] ShowWindow {} -> {}", handle, state);

        let mut desktop = self.desktop.lock();
        if desktop.show_state == ShowState::Normal {
            desktop.normal_rect = desktop.rect;
        }

        match state {
            ShowState::Normal => {
                desktop.rect = desktop.normal_rect;
            }
            ShowState::Maximized => {
                let work_area = current_monitor(&desktop.normal_rect, &desktop.monitors)
                    .map(|monitor| monitor.work_area)
                    .ok_or(TelewindowError::NoIntersectingMonitor)?;
                desktop.rect = WindowRect::new(
                    work_area.left - MAXIMIZED_BORDER,
                    work_area.top - MAXIMIZED_BORDER,
                    work_area.right + MAXIMIZED_BORDER,
                    work_area.bottom + MAXIMIZED_BORDER,
                );
            }
            ShowState::Minimized => {
                desktop.rect = MINIMIZED_RECT;
            }
        }
        desktop.show_state = state;
        Ok(())
    }

    fn enumerate_monitors(&self) -> Result<Vec<Monitor>> {
        Ok(self.desktop.lock().monitors.clone())
    }

    fn set_window_transitions_disabled(&self, handle: WindowHandle, disabled: bool) -> Result<()> {
        Self::check_handle("DwmSetWindowAttribute", handle)?;
        info!("[DRY RUN] Window transitions {} for {}", if disabled { "disabled" } else { "enabled" }, handle);
        self.desktop.lock().transitions_disabled = disabled;
        Ok(())
    }
}
