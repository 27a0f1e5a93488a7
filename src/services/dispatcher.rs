use super::hotkeys::HotkeyStateMachine;
use super::placement::PlacementEngine;
use super::window_system::WindowSystem;
use crate::command::Command;
use crate::error::Result;
use crate::events::KeyEvent;
use parking_lot::Mutex;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Single worker between the keyboard hook and the placement engine.
///
/// The state machine lock is held for the whole mutation-and-dispatch cycle
/// of one event, so a placement never runs against a half-updated key set.
pub struct HotkeyDispatcher<W: WindowSystem> {
    hotkeys: Mutex<HotkeyStateMachine>,
    engine: PlacementEngine<W>,
}

impl<W: WindowSystem> HotkeyDispatcher<W> {
    pub fn new(hotkeys: HotkeyStateMachine, engine: PlacementEngine<W>) -> Self {
        Self {
            hotkeys: Mutex::new(hotkeys),
            engine,
        }
    }

    pub fn engine(&self) -> &PlacementEngine<W> {
        &self.engine
    }

    /// Feeds one event through the state machine and runs whatever it fires
    pub fn handle_event(&self, event: &KeyEvent) -> Option<Command> {
        let mut hotkeys = self.hotkeys.lock();
        let command = hotkeys.handle_event(event)?;
        self.dispatch(command);
        Some(command)
    }

    fn dispatch(&self, command: Command) {
        match self.engine.execute(command) {
            Ok(()) => debug!("{} done", command),
            Err(e) if e.is_expected() => info!("{} skipped: {}", command, e),
            Err(e) => warn!("{} failed: {}", command, e),
        }
    }

    /// Processes events until `shutdown` resolves or every sender is gone.
    /// Must run on a multi-thread runtime: placements block the worker.
    pub async fn run<F>(&self, mut events: mpsc::Receiver<KeyEvent>, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("HotkeyDispatcher started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, dispatcher stopping");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => {
                        tokio::task::block_in_place(|| self.handle_event(&event));
                    }
                    None => {
                        info!("Keyboard event channel closed, dispatcher stopping");
                        break;
                    }
                },
            }
        }

        Ok(())
    }
}
