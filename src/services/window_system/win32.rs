use super::r#trait::WindowSystem;
use crate::error::{Result, TelewindowError};
use crate::events::{PositionFlags, ShowState, WindowHandle};
use crate::layout::{Monitor, MonitorHandle, WindowRect};
use crate::{debug_if_enabled, platform_error};
use std::ffi::c_void;
use tracing::debug;
use windows::Win32::Foundation::{BOOL, FALSE, HWND, LPARAM, RECT, TRUE};
use windows::Win32::Graphics::Dwm::{
    DwmIsCompositionEnabled, DwmSetWindowAttribute, DWMWA_TRANSITIONS_FORCEDISABLED,
};
use windows::Win32::Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowPlacement, GetWindowRect, IsWindow, MoveWindow, SetWindowPos,
    ShowWindow, SET_WINDOW_POS_FLAGS, SHOW_WINDOW_CMD, SWP_NOACTIVATE, SWP_NOZORDER, SWP_SHOWWINDOW,
    SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SW_SHOWMAXIMIZED, SW_SHOWMINIMIZED, WINDOWPLACEMENT,
};

/// Window system backed by user32 and dwmapi
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }

    fn hwnd(call: &'static str, handle: WindowHandle) -> Result<HWND> {
        let hwnd = HWND(handle.0);
        if unsafe { IsWindow(hwnd) }.as_bool() {
            Ok(hwnd)
        } else {
            Err(platform_error!(call, "invalid window handle {}", handle))
        }
    }

    fn composition_enabled() -> bool {
        match unsafe { DwmIsCompositionEnabled() } {
            Ok(enabled) => enabled.as_bool(),
            Err(e) => {
                debug!("DwmIsCompositionEnabled failed: {}", e);
                false
            }
        }
    }
}

impl Default for Win32WindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn to_window_rect(rect: &RECT) -> WindowRect {
    WindowRect::new(rect.left, rect.top, rect.right, rect.bottom)
}

fn position_flags(flags: PositionFlags) -> SET_WINDOW_POS_FLAGS {
    let mut native = SET_WINDOW_POS_FLAGS(0);
    if flags.no_zorder {
        native |= SWP_NOZORDER;
    }
    if flags.no_activate {
        native |= SWP_NOACTIVATE;
    }
    if flags.show_window {
        native |= SWP_SHOWWINDOW;
    }
    native
}

/// Collects one `Monitor` per callback; a monitor whose info cannot be read
/// is skipped and enumeration continues
unsafe extern "system" fn collect_monitor(hmonitor: HMONITOR, _hdc: HDC, _clip: *mut RECT, data: LPARAM) -> BOOL {
    let monitors = &mut *(data.0 as *mut Vec<Monitor>);

    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if GetMonitorInfoW(hmonitor, &mut info) == FALSE {
        debug!("GetMonitorInfoW failed for monitor#{:x}, skipping", hmonitor.0);
        return TRUE;
    }

    monitors.push(Monitor::new(
        MonitorHandle(hmonitor.0),
        to_window_rect(&info.rcMonitor),
        to_window_rect(&info.rcWork),
    ));
    TRUE
}

impl WindowSystem for Win32WindowSystem {
    fn foreground_window(&self) -> Result<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0 == 0 {
            return Err(TelewindowError::NoForegroundWindow);
        }
        Ok(WindowHandle(hwnd.0))
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<WindowRect> {
        let hwnd = Self::hwnd("GetWindowRect", handle)?;
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd, &mut rect) }.map_err(|e| platform_error!("GetWindowRect", "{}", e))?;
        Ok(to_window_rect(&rect))
    }

    fn move_window(&self, handle: WindowHandle, rect: WindowRect) -> Result<()> {
        let hwnd = Self::hwnd("MoveWindow", handle)?;
        debug_if_enabled!("MoveWindow {} -> {}", handle, rect);
        unsafe { MoveWindow(hwnd, rect.left, rect.top, rect.width(), rect.height(), TRUE) }
            .map_err(|e| platform_error!("MoveWindow", "{}", e))
    }

    fn set_window_pos(&self, handle: WindowHandle, rect: WindowRect, flags: PositionFlags) -> Result<()> {
        let hwnd = Self::hwnd("SetWindowPos", handle)?;
        debug_if_enabled!("SetWindowPos {} -> {} {:?}", handle, rect, flags);
        unsafe {
            SetWindowPos(
                hwnd,
                HWND(0),
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                position_flags(flags),
            )
        }
        .map_err(|e| platform_error!("SetWindowPos", "{}", e))
    }

    fn show_state(&self, handle: WindowHandle) -> Result<ShowState> {
        let hwnd = Self::hwnd("GetWindowPlacement", handle)?;
        let mut placement = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };
        unsafe { GetWindowPlacement(hwnd, &mut placement) }
            .map_err(|e| platform_error!("GetWindowPlacement", "{}", e))?;

        let state = if placement.showCmd == SW_SHOWMAXIMIZED.0 as u32 {
            ShowState::Maximized
        } else if placement.showCmd == SW_SHOWMINIMIZED.0 as u32 {
            ShowState::Minimized
        } else {
            ShowState::Normal
        };
        Ok(state)
    }

    fn set_show_state(&self, handle: WindowHandle, state: ShowState) -> Result<()> {
        let hwnd = Self::hwnd("ShowWindow", handle)?;
        let command: SHOW_WINDOW_CMD = match state {
            ShowState::Normal => SW_RESTORE,
            ShowState::Maximized => SW_MAXIMIZE,
            ShowState::Minimized => SW_MINIMIZE,
        };
        // The return value is the previous visibility, not a success flag
        let _ = unsafe { ShowWindow(hwnd, command) };
        Ok(())
    }

    fn enumerate_monitors(&self) -> Result<Vec<Monitor>> {
        let mut monitors: Vec<Monitor> = Vec::new();
        let ok = unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(collect_monitor),
                LPARAM(&mut monitors as *mut Vec<Monitor> as isize),
            )
        };
        if ok == FALSE {
            return Err(TelewindowError::Enumeration("EnumDisplayMonitors returned FALSE".to_string()));
        }
        debug!("Enumerated {} monitor(s)", monitors.len());
        Ok(monitors)
    }

    fn set_window_transitions_disabled(&self, handle: WindowHandle, disabled: bool) -> Result<()> {
        let hwnd = Self::hwnd("DwmSetWindowAttribute", handle)?;
        if !Self::composition_enabled() {
            return Ok(());
        }

        let value: BOOL = disabled.into();
        unsafe {
            DwmSetWindowAttribute(
                hwnd,
                DWMWA_TRANSITIONS_FORCEDISABLED,
                &value as *const BOOL as *const c_void,
                std::mem::size_of::<BOOL>() as u32,
            )
        }
        .map_err(|e| platform_error!("DwmSetWindowAttribute", "{}", e))
    }
}
