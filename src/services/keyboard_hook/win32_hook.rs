//! Low-level keyboard hook
//!
//! The hook procedure runs on the thread that installed it, inside that
//! thread's message loop. It only copies the transition into a bounded
//! channel with `try_send` and always passes the event on to the next hook.

use super::r#trait::{forward_event, KeyboardHookTrait};
use crate::error::{Result, TelewindowError};
use crate::events::{KeyCode, KeyEvent, KeyTransition};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW, SetWindowsHookExW,
    UnhookWindowsHookEx, KBDLLHOOKSTRUCT, MSG, PM_NOREMOVE, WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP,
    WM_QUIT, WM_SYSKEYDOWN, WM_SYSKEYUP, WM_USER,
};

/// Where the hook procedure delivers events; set while a hook is running
static HOOK_SENDER: Lazy<Mutex<Option<mpsc::Sender<KeyEvent>>>> = Lazy::new(|| Mutex::new(None));

pub struct Win32KeyboardHook;

impl Win32KeyboardHook {
    pub fn new() -> Self {
        Self
    }

    async fn run_impl(self, events: mpsc::Sender<KeyEvent>) -> Result<()> {
        *HOOK_SENDER.lock() = Some(events.clone());

        let (ready_tx, ready_rx) = oneshot::channel();
        let thread = std::thread::Builder::new()
            .name("keyboard-hook".to_string())
            .spawn(move || hook_thread(ready_tx))?;

        let thread_id = match ready_rx.await {
            Ok(Ok(thread_id)) => thread_id,
            Ok(Err(reason)) => {
                *HOOK_SENDER.lock() = None;
                return Err(TelewindowError::KeyboardHook(reason));
            }
            Err(_) => {
                *HOOK_SENDER.lock() = None;
                return Err(TelewindowError::KeyboardHook("hook thread exited early".to_string()));
            }
        };
        info!("Keyboard hook installed on thread {}", thread_id);

        events.closed().await;
        *HOOK_SENDER.lock() = None;

        info!("Event receiver closed, removing keyboard hook");
        if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
            warn!("Could not stop the keyboard hook thread: {}", e);
            return Ok(());
        }

        tokio::task::spawn_blocking(move || thread.join())
            .await
            .map_err(|e| TelewindowError::KeyboardHook(e.to_string()))?
            .map_err(|_| TelewindowError::KeyboardHook("hook thread panicked".to_string()))?;
        Ok(())
    }
}

impl Default for Win32KeyboardHook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl KeyboardHookTrait for Win32KeyboardHook {
    async fn run(self: Box<Self>, events: mpsc::Sender<KeyEvent>) -> Result<()> {
        (*self).run_impl(events).await
    }
}

/// Installs the hook, reports the thread id and pumps messages until WM_QUIT
fn hook_thread(ready: oneshot::Sender<std::result::Result<u32, String>>) {
    unsafe {
        let module = match GetModuleHandleW(PCWSTR::null()) {
            Ok(module) => module,
            Err(e) => {
                let _ = ready.send(Err(format!("GetModuleHandleW failed: {}", e)));
                return;
            }
        };

        let hook = match SetWindowsHookExW(WH_KEYBOARD_LL, Some(hook_proc), module, 0) {
            Ok(hook) => hook,
            Err(e) => {
                let _ = ready.send(Err(format!("SetWindowsHookExW failed: {}", e)));
                return;
            }
        };

        // Make sure the thread has a message queue before anyone posts to it
        let mut msg = MSG::default();
        let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
        let _ = ready.send(Ok(GetCurrentThreadId()));

        // 0 is WM_QUIT, -1 is an error
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            DispatchMessageW(&msg);
        }

        if let Err(e) = UnhookWindowsHookEx(hook) {
            warn!("UnhookWindowsHookEx failed: {}", e);
        }
    }
}

unsafe extern "system" fn hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        let transition = match wparam.0 as u32 {
            WM_KEYDOWN | WM_SYSKEYDOWN => Some(KeyTransition::Down),
            WM_KEYUP | WM_SYSKEYUP => Some(KeyTransition::Up),
            _ => None,
        };

        if let Some(transition) = transition {
            let data = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
            forward(KeyEvent::new(KeyCode(data.vkCode), transition, Instant::now()));
        }
    }

    CallNextHookEx(None, code, wparam, lparam)
}

fn forward(event: KeyEvent) {
    if let Some(sender) = HOOK_SENDER.lock().as_ref() {
        forward_event(sender, event); // ✅ KeyEvent is Copy, nothing allocated on the hook thread
    }
}
