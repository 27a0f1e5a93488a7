use crate::config::Config;
use crate::error::Result;
use crate::events::{KeyEvent, KeyTransition};
use crate::trace_if_enabled;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

/// Source of raw key transitions, observed without being swallowed
#[async_trait::async_trait]
pub trait KeyboardHookTrait {
    /// Forward key events into `events` until the receiving side closes
    async fn run(self: Box<Self>, events: mpsc::Sender<KeyEvent>) -> Result<()>;
}

/// Hands `event` to the dispatcher without blocking the hook thread.
///
/// A dropped key-down only loses that chord. A dropped key-up leaves the key
/// held in the hotkey state until its next release, so that case is reported.
pub(crate) fn forward_event(events: &mpsc::Sender<KeyEvent>, event: KeyEvent) -> bool {
    match events.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) if event.transition == KeyTransition::Up => {
            warn!("Event queue full, dropped {}: the key stays held until released again", event);
            false
        }
        Err(e) => {
            trace_if_enabled!("Dropped {}: {}", event, e);
            false
        }
    }
}

/// Factory function to create an appropriate keyboard hook based on the dry_run flag
pub fn create_keyboard_hook(config: Arc<Config>, dry_run: bool) -> Result<Box<dyn KeyboardHookTrait + Send>> {
    if dry_run {
        return Ok(Box::new(super::dry_keyboard_hook::DryRunKeyboardHook::new(
            config.bindings()?,
        )));
    }

    #[cfg(windows)]
    {
        Ok(Box::new(super::win32_hook::Win32KeyboardHook::new()))
    }

    #[cfg(not(windows))]
    {
        warn!("Low-level keyboard hooks need Windows, replaying bindings instead");
        Ok(Box::new(super::dry_keyboard_hook::DryRunKeyboardHook::new(
            config.bindings()?,
        )))
    }
}
