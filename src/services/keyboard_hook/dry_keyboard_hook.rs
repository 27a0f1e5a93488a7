use super::r#trait::KeyboardHookTrait;
use crate::command::Command;
use crate::error::Result;
use crate::events::{KeyCode, KeyEvent, KeyTransition};
use crate::services::hotkeys::KeyBinding;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

/// Replays every configured chord in turn, so the dispatcher and placement
/// engine can be watched end to end without an OS hook.
pub struct DryRunKeyboardHook {
    bindings: Vec<(Command, KeyBinding)>,
    period: Duration,
}

impl DryRunKeyboardHook {
    pub fn new(bindings: Vec<(Command, KeyBinding)>) -> Self {
        info!("DryRunKeyboardHook: {} bindings to replay", bindings.len());
        Self {
            bindings,
            period: Duration::from_secs(5),
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Modifiers down, trigger down and up, modifiers up
    pub fn chord_events(binding: &KeyBinding) -> Vec<KeyEvent> {
        let modifiers: Vec<KeyCode> = [
            (binding.ctrl, KeyCode::LCONTROL),
            (binding.alt, KeyCode::LMENU),
            (binding.shift, KeyCode::LSHIFT),
        ]
        .into_iter()
        .filter_map(|(held, key)| held.then_some(key))
        .collect();

        let now = Instant::now();
        let mut events: Vec<KeyEvent> = modifiers
            .iter()
            .map(|&key| KeyEvent::new(key, KeyTransition::Down, now))
            .collect();
        events.push(KeyEvent::new(binding.key, KeyTransition::Down, now));
        events.push(KeyEvent::new(binding.key, KeyTransition::Up, now));
        events.extend(
            modifiers
                .iter()
                .rev()
                .map(|&key| KeyEvent::new(key, KeyTransition::Up, now)),
        );
        events
    }

    async fn run_impl(self, events: mpsc::Sender<KeyEvent>) -> Result<()> {
        info!("Dry-run mode: replaying configured chords every {:?}", self.period);

        if self.bindings.is_empty() {
            events.closed().await;
            return Ok(());
        }

        let mut ticker = interval(self.period);
        for (command, binding) in self.bindings.iter().cycle() {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = events.closed() => break,
            }

            info!("Dry-run: pressing {} ({})", binding, command);
            for event in Self::chord_events(binding) {
                if events.send(event).await.is_err() {
                    debug!("Event receiver closed, stopping replay");
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyboardHookTrait for DryRunKeyboardHook {
    async fn run(self: Box<Self>, events: mpsc::Sender<KeyEvent>) -> Result<()> {
        (*self).run_impl(events).await
    }
}
