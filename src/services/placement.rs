//! Placement engine: the move, split and show-state operations.
//!
//! Every operation takes an explicit window handle. The `*_foreground`
//! helpers and [`PlacementEngine::execute`] resolve the foreground window
//! first. Monitors are re-enumerated on every call.

use super::window_system::WindowSystem;
use crate::command::Command;
use crate::config::PlacementConfig;
use crate::debug_if_enabled;
use crate::error::{Result, TelewindowError};
use crate::events::{PositionFlags, ShowState, WindowHandle};
use crate::layout::{
    current_monitor, plan_move, plan_split, target_monitor, Direction, Monitor, SizingMode, WindowRect,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on resize requests while waiting for a split to take
pub const SPLIT_CONVERGENCE_ATTEMPTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSettings {
    pub sizing_mode: SizingMode,
    /// Turn window animations off around restore/maximize pairs
    pub suppress_transitions: bool,
    /// Pause between issuing a split resize and checking the result
    pub split_poll_interval: Duration,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            sizing_mode: SizingMode::default(),
            suppress_transitions: true,
            split_poll_interval: Duration::from_millis(10),
        }
    }
}

impl From<&PlacementConfig> for PlacementSettings {
    fn from(config: &PlacementConfig) -> Self {
        Self {
            sizing_mode: config.effective_sizing_mode(),
            suppress_transitions: config.suppress_transitions,
            split_poll_interval: config.split_poll_interval(),
        }
    }
}

/// Result of the bounded resize loop of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    pub converged: bool,
    pub attempts: usize,
}

pub struct PlacementEngine<W: WindowSystem> {
    system: W,
    settings: PlacementSettings,
}

impl<W: WindowSystem> PlacementEngine<W> {
    pub fn new(system: W, settings: PlacementSettings) -> Self {
        info!(
            "PlacementEngine: sizing={}, suppress_transitions={}, split_poll={:?}",
            settings.sizing_mode, settings.suppress_transitions, settings.split_poll_interval
        );
        Self { system, settings }
    }

    pub fn system(&self) -> &W {
        &self.system
    }

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    /// Runs `command` against the foreground window
    pub fn execute(&self, command: Command) -> Result<()> {
        if command == Command::NoOp {
            debug!("NoOp: nothing to do");
            return Ok(());
        }
        let handle = self.system.foreground_window()?;
        self.execute_on(handle, command)
    }

    pub fn execute_on(&self, handle: WindowHandle, command: Command) -> Result<()> {
        let suppress = self.settings.suppress_transitions;
        match (command, command.direction()) {
            (Command::MoveRight | Command::MoveLeft | Command::MoveUp | Command::MoveDown, Some(direction)) => {
                self.move_window(handle, direction).map(|_| ())
            }
            (Command::SplitRight | Command::SplitLeft | Command::SplitUp | Command::SplitDown, Some(direction)) => {
                self.split_window(handle, direction).map(|_| ())
            }
            (Command::Maximize, _) => self.maximize(handle, suppress),
            (Command::Restore, _) => self.restore(handle, suppress),
            (Command::ToggleMaximize, _) => self.toggle_maximize(handle).map(|_| ()),
            (Command::NoOp, _) => Ok(()),
            (command, None) => Err(TelewindowError::InvalidGeometry(format!("{} has no direction", command))),
        }
    }

    pub fn move_foreground(&self, direction: Direction) -> Result<WindowRect> {
        let handle = self.system.foreground_window()?;
        self.move_window(handle, direction)
    }

    pub fn split_foreground(&self, direction: Direction) -> Result<SplitOutcome> {
        let handle = self.system.foreground_window()?;
        self.split_window(handle, direction)
    }

    /// Moves `handle` to the monitor in `direction`, keeping its size
    /// relative to the monitor (or in pixels, per the sizing mode).
    ///
    /// A maximized window is restored first, moved by its restored
    /// rectangle and maximized again on the target.
    pub fn move_window(&self, handle: WindowHandle, direction: Direction) -> Result<WindowRect> {
        info!("Move {} {}", handle, direction);

        let monitors = self.system.enumerate_monitors()?;
        if monitors.len() < 2 {
            return Err(TelewindowError::SingleMonitorOnly(monitors.len()));
        }

        let mut rect = self.system.window_rect(handle)?;
        let source = current_monitor(&rect, &monitors).ok_or(TelewindowError::NoIntersectingMonitor)?;
        let target = target_monitor(&monitors, source, direction)
            .ok_or(TelewindowError::NoMonitorInDirection(direction))?;
        debug!("Source {} -> target {}", source, target);

        let maximized = self.system.show_state(handle)? == ShowState::Maximized;
        if maximized {
            debug!("{} is maximized, restoring before the move", handle);
            self.restore(handle, self.settings.suppress_transitions)?;
            rect = self.system.window_rect(handle)?;
        }

        let planned = match self.place_moved(handle, &rect, source, target) {
            Ok(planned) => planned,
            Err(e) => {
                // Leave the window maximized where it was
                if maximized {
                    if let Err(remaximize_error) = self.maximize(handle, self.settings.suppress_transitions) {
                        warn!("Could not maximize {} again after a failed move: {}", handle, remaximize_error);
                    }
                }
                return Err(e);
            }
        };

        if maximized {
            self.maximize(handle, self.settings.suppress_transitions)?;
        }

        info!("Moved {} to {}", handle, target);
        Ok(planned)
    }

    fn place_moved(
        &self,
        handle: WindowHandle,
        rect: &WindowRect,
        source: &Monitor,
        target: &Monitor,
    ) -> Result<WindowRect> {
        let planned = plan_move(rect, source, target, self.settings.sizing_mode);
        if planned.is_degenerate() {
            return Err(TelewindowError::InvalidGeometry(format!("move planned {}", planned)));
        }
        debug_if_enabled!("Move plan {} -> {} ({})", rect, planned, self.settings.sizing_mode);

        self.system.move_window(handle, planned)?;
        Ok(planned)
    }

    /// Resizes `handle` to the `direction` half of its monitor.
    ///
    /// The window is maximized first so its invisible borders can be
    /// measured against the monitor edges.
    pub fn split_window(&self, handle: WindowHandle, direction: Direction) -> Result<SplitOutcome> {
        info!("Split {} {}", handle, direction);
        let suppress = self.settings.suppress_transitions;

        if self.system.show_state(handle)? == ShowState::Maximized {
            self.restore(handle, suppress)?;
        }
        self.maximize(handle, suppress)?;

        let monitors = self.system.enumerate_monitors()?;
        let measured = self.system.window_rect(handle)?;
        let monitor = current_monitor(&measured, &monitors).ok_or(TelewindowError::NoIntersectingMonitor)?;

        let target = plan_split(&measured, monitor, direction);
        if target.is_degenerate() {
            return Err(TelewindowError::InvalidGeometry(format!("split planned {}", target)));
        }
        debug_if_enabled!("Split plan {} on {} -> {}", measured, monitor, target);

        self.apply_split(handle, target)
    }

    /// Issues the resize until the window reports `target`, at most
    /// `SPLIT_CONVERGENCE_ATTEMPTS` times. Giving up is not an error.
    pub fn apply_split(&self, handle: WindowHandle, target: WindowRect) -> Result<SplitOutcome> {
        for attempt in 1..=SPLIT_CONVERGENCE_ATTEMPTS {
            self.system.set_window_pos(handle, target, PositionFlags::SHOW_WINDOW)?;
            if !self.settings.split_poll_interval.is_zero() {
                std::thread::sleep(self.settings.split_poll_interval);
            }

            let observed = self.system.window_rect(handle)?;
            if observed == target {
                debug!("Split of {} settled after {} attempt(s)", handle, attempt);
                return Ok(SplitOutcome {
                    converged: true,
                    attempts: attempt,
                });
            }
            debug_if_enabled!("Attempt {}: {} reports {}, want {}", attempt, handle, observed, target);
        }

        info!(
            "{} did not settle on {} after {} attempts, giving up",
            handle, target, SPLIT_CONVERGENCE_ATTEMPTS
        );
        Ok(SplitOutcome {
            converged: false,
            attempts: SPLIT_CONVERGENCE_ATTEMPTS,
        })
    }

    pub fn maximize(&self, handle: WindowHandle, suppress: bool) -> Result<()> {
        self.with_transitions_suppressed(handle, suppress, || {
            self.system.set_show_state(handle, ShowState::Maximized)
        })?;
        debug!("Maximized {}", handle);
        Ok(())
    }

    pub fn restore(&self, handle: WindowHandle, suppress: bool) -> Result<()> {
        self.with_transitions_suppressed(handle, suppress, || {
            self.system.set_show_state(handle, ShowState::Normal)
        })?;
        debug!("Restored {}", handle);
        Ok(())
    }

    /// Restores a maximized window and maximizes anything else.
    /// Returns the new show state.
    pub fn toggle_maximize(&self, handle: WindowHandle) -> Result<ShowState> {
        let suppress = self.settings.suppress_transitions;
        match self.system.show_state(handle)? {
            ShowState::Maximized => {
                self.restore(handle, suppress)?;
                Ok(ShowState::Normal)
            }
            ShowState::Normal | ShowState::Minimized => {
                self.maximize(handle, suppress)?;
                Ok(ShowState::Maximized)
            }
        }
    }

    fn with_transitions_suppressed<T>(
        &self,
        handle: WindowHandle,
        suppress: bool,
        operation: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        if suppress {
            if let Err(e) = self.system.set_window_transitions_disabled(handle, true) {
                warn!("Could not disable transitions for {}: {}", handle, e);
            }
        }

        let result = operation();

        if suppress {
            if let Err(e) = self.system.set_window_transitions_disabled(handle, false) {
                warn!("Could not re-enable transitions for {}: {}", handle, e);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonitorHandle;
    use crate::platform_error;
    use crate::services::window_system::DryRunWindowSystem;
    use parking_lot::Mutex;

    const WINDOW: WindowHandle = WindowHandle(0x42);

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Move(WindowRect),
        SetPos(WindowRect),
        Show(ShowState),
        Transitions(bool),
    }

    struct FakeState {
        rect: WindowRect,
        show_state: ShowState,
        calls: Vec<Call>,
    }

    /// Records every mutating call; reads are free
    struct FakeWindowSystem {
        monitors: Vec<Monitor>,
        maximized_rect: WindowRect,
        restored_rect: WindowRect,
        ignore_resize: bool,
        fail_move: bool,
        fail_transitions: bool,
        state: Mutex<FakeState>,
    }

    impl FakeWindowSystem {
        fn new(monitors: Vec<Monitor>, rect: WindowRect) -> Self {
            Self {
                monitors,
                maximized_rect: rect,
                restored_rect: rect,
                ignore_resize: false,
                fail_move: false,
                fail_transitions: false,
                state: Mutex::new(FakeState {
                    rect,
                    show_state: ShowState::Normal,
                    calls: Vec::new(),
                }),
            }
        }

        fn maximized(mut self, maximized_rect: WindowRect) -> Self {
            self.maximized_rect = maximized_rect;
            self
        }

        fn already_maximized(self) -> Self {
            {
                let mut state = self.state.lock();
                state.show_state = ShowState::Maximized;
                state.rect = self.maximized_rect;
            }
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.state.lock().calls.clone()
        }

        fn count(&self, matcher: fn(&Call) -> bool) -> usize {
            self.state.lock().calls.iter().filter(|call| matcher(call)).count()
        }
    }

    impl WindowSystem for FakeWindowSystem {
        fn foreground_window(&self) -> Result<WindowHandle> {
            Ok(WINDOW)
        }

        fn window_rect(&self, _handle: WindowHandle) -> Result<WindowRect> {
            Ok(self.state.lock().rect)
        }

        fn move_window(&self, _handle: WindowHandle, rect: WindowRect) -> Result<()> {
            let mut state = self.state.lock();
            state.calls.push(Call::Move(rect));
            if self.fail_move {
                return Err(platform_error!("MoveWindow", "access denied"));
            }
            if !self.ignore_resize {
                state.rect = rect;
            }
            Ok(())
        }

        fn set_window_pos(&self, _handle: WindowHandle, rect: WindowRect, _flags: PositionFlags) -> Result<()> {
            let mut state = self.state.lock();
            state.calls.push(Call::SetPos(rect));
            if !self.ignore_resize {
                state.rect = rect;
            }
            Ok(())
        }

        fn show_state(&self, _handle: WindowHandle) -> Result<ShowState> {
            Ok(self.state.lock().show_state)
        }

        fn set_show_state(&self, _handle: WindowHandle, show_state: ShowState) -> Result<()> {
            let mut state = self.state.lock();
            state.calls.push(Call::Show(show_state));
            state.show_state = show_state;
            state.rect = match show_state {
                ShowState::Maximized => self.maximized_rect,
                _ => self.restored_rect,
            };
            Ok(())
        }

        fn enumerate_monitors(&self) -> Result<Vec<Monitor>> {
            Ok(self.monitors.clone())
        }

        fn set_window_transitions_disabled(&self, _handle: WindowHandle, disabled: bool) -> Result<()> {
            self.state.lock().calls.push(Call::Transitions(disabled));
            if self.fail_transitions {
                return Err(platform_error!("DwmSetWindowAttribute", "composition disabled"));
            }
            Ok(())
        }
    }

    fn monitor(id: isize, left: i32, top: i32, width: i32, height: i32) -> Monitor {
        let bounds = WindowRect::from_origin_size(left, top, width, height);
        let work_area = WindowRect::new(bounds.left, bounds.top, bounds.right, bounds.bottom - 40);
        Monitor::new(MonitorHandle(id), bounds, work_area)
    }

    fn hd_and_uhd() -> Vec<Monitor> {
        vec![monitor(1, 0, 0, 1920, 1080), monitor(2, 1920, 0, 3840, 2160)]
    }

    fn settings() -> PlacementSettings {
        PlacementSettings {
            split_poll_interval: Duration::ZERO,
            ..PlacementSettings::default()
        }
    }

    #[test]
    fn test_single_monitor_move_issues_no_mutation() {
        let fake = FakeWindowSystem::new(vec![monitor(1, 0, 0, 1920, 1080)], WindowRect::new(0, 0, 960, 540));
        let engine = PlacementEngine::new(fake, settings());

        let error = engine.move_window(WINDOW, Direction::Right).unwrap_err();
        assert!(matches!(error, TelewindowError::SingleMonitorOnly(1)));
        assert!(error.is_expected());
        assert!(engine.system().calls().is_empty());
    }

    #[test]
    fn test_no_monitor_in_direction() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(0, 0, 960, 540));
        let engine = PlacementEngine::new(fake, settings());

        let error = engine.move_window(WINDOW, Direction::Left).unwrap_err();
        assert!(matches!(error, TelewindowError::NoMonitorInDirection(Direction::Left)));
        assert!(engine.system().calls().is_empty());
    }

    #[test]
    fn test_off_screen_window() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(-5000, -5000, -4000, -4000));
        let engine = PlacementEngine::new(fake, settings());

        let error = engine.move_window(WINDOW, Direction::Right).unwrap_err();
        assert!(matches!(error, TelewindowError::NoIntersectingMonitor));
    }

    #[test]
    fn test_percentage_move_to_larger_monitor() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(0, 0, 960, 540));
        let engine = PlacementEngine::new(fake, settings());

        let planned = engine.move_window(WINDOW, Direction::Right).unwrap();
        assert_eq!(planned, WindowRect::new(1920, 0, 3840, 1080));
        assert_eq!(engine.system().calls(), vec![Call::Move(planned)]);
    }

    #[test]
    fn test_pixel_move_keeps_size() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 50, 900, 650));
        let engine = PlacementEngine::new(
            fake,
            PlacementSettings {
                sizing_mode: SizingMode::PixelBased,
                ..settings()
            },
        );

        let planned = engine.move_window(WINDOW, Direction::Right).unwrap();
        assert_eq!(planned, WindowRect::new(2020, 50, 2820, 650));
    }

    #[test]
    fn test_maximized_move_restores_moves_and_remaximizes() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 100, 1060, 640))
            .maximized(WindowRect::new(-8, -8, 1928, 1048))
            .already_maximized();
        let engine = PlacementEngine::new(fake, settings());

        let planned = engine.move_window(WINDOW, Direction::Right).unwrap();
        assert_eq!(planned, WindowRect::new(2120, 200, 4040, 1280));
        assert_eq!(
            engine.system().calls(),
            vec![
                Call::Transitions(true),
                Call::Show(ShowState::Normal),
                Call::Transitions(false),
                Call::Move(planned),
                Call::Transitions(true),
                Call::Show(ShowState::Maximized),
                Call::Transitions(false),
            ]
        );
    }

    #[test]
    fn test_failed_move_leaves_window_maximized() {
        let mut fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 100, 1060, 640))
            .maximized(WindowRect::new(-8, -8, 1928, 1048))
            .already_maximized();
        fake.fail_move = true;
        let engine = PlacementEngine::new(fake, settings());

        let error = engine.move_window(WINDOW, Direction::Right).unwrap_err();
        assert!(matches!(error, TelewindowError::PlatformCallFailed { call: "MoveWindow", .. }));
        assert!(!error.is_expected());

        assert_eq!(engine.system().show_state(WINDOW).unwrap(), ShowState::Maximized);
        assert_eq!(engine.system().window_rect(WINDOW).unwrap(), WindowRect::new(-8, -8, 1928, 1048));
        assert_eq!(engine.system().calls().last(), Some(&Call::Transitions(false)));
        assert_eq!(engine.system().count(|call| matches!(call, Call::Show(ShowState::Maximized))), 1);
    }

    #[test]
    fn test_split_left_converges() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 100, 900, 700))
            .maximized(WindowRect::new(-8, -8, 1928, 1048));
        let engine = PlacementEngine::new(fake, settings());

        let outcome = engine.split_window(WINDOW, Direction::Left).unwrap();
        assert_eq!(outcome, SplitOutcome { converged: true, attempts: 1 });

        let calls = engine.system().calls();
        assert_eq!(calls.first(), Some(&Call::Transitions(true)));
        assert_eq!(calls[1], Call::Show(ShowState::Maximized));
        assert_eq!(calls.last(), Some(&Call::SetPos(WindowRect::new(-8, -8, 968, 1048))));
    }

    #[test]
    fn test_split_of_maximized_window_restores_first() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 100, 900, 700))
            .maximized(WindowRect::new(-8, -8, 1928, 1048))
            .already_maximized();
        let engine = PlacementEngine::new(
            fake,
            PlacementSettings {
                suppress_transitions: false,
                ..settings()
            },
        );

        engine.split_window(WINDOW, Direction::Right).unwrap();
        assert_eq!(
            engine.system().calls(),
            vec![
                Call::Show(ShowState::Normal),
                Call::Show(ShowState::Maximized),
                Call::SetPos(WindowRect::new(952, -8, 1928, 1048)),
            ]
        );
    }

    #[test]
    fn test_split_gives_up_after_bounded_attempts() {
        let mut fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 100, 900, 700))
            .maximized(WindowRect::new(-8, -8, 1928, 1048));
        fake.ignore_resize = true;
        let engine = PlacementEngine::new(fake, settings());

        let outcome = engine.split_window(WINDOW, Direction::Up).unwrap();
        assert_eq!(
            outcome,
            SplitOutcome {
                converged: false,
                attempts: SPLIT_CONVERGENCE_ATTEMPTS
            }
        );
        assert_eq!(
            engine.system().count(|call| matches!(call, Call::SetPos(_))),
            SPLIT_CONVERGENCE_ATTEMPTS
        );
    }

    #[test]
    fn test_toggle_maximize() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 100, 900, 700));
        let engine = PlacementEngine::new(fake, settings());

        assert_eq!(engine.toggle_maximize(WINDOW).unwrap(), ShowState::Maximized);
        assert_eq!(engine.toggle_maximize(WINDOW).unwrap(), ShowState::Normal);
        assert_eq!(engine.system().count(|call| matches!(call, Call::Show(_))), 2);
    }

    #[test]
    fn test_transition_failures_are_not_fatal() {
        let mut fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(100, 100, 900, 700));
        fake.fail_transitions = true;
        let engine = PlacementEngine::new(fake, settings());

        engine.maximize(WINDOW, true).unwrap();
        assert_eq!(engine.system().show_state(WINDOW).unwrap(), ShowState::Maximized);
    }

    #[test]
    fn test_execute_dispatches_commands() {
        let fake = FakeWindowSystem::new(hd_and_uhd(), WindowRect::new(0, 0, 960, 540));
        let engine = PlacementEngine::new(fake, settings());

        engine.execute(Command::NoOp).unwrap();
        assert!(engine.system().calls().is_empty());

        engine.execute(Command::MoveRight).unwrap();
        assert_eq!(engine.system().window_rect(WINDOW).unwrap(), WindowRect::new(1920, 0, 3840, 1080));

        engine.execute(Command::Maximize).unwrap();
        assert_eq!(engine.system().show_state(WINDOW).unwrap(), ShowState::Maximized);
        engine.execute(Command::Restore).unwrap();
        assert_eq!(engine.system().show_state(WINDOW).unwrap(), ShowState::Normal);
    }

    #[test]
    fn test_split_on_dry_run_desktop() {
        let engine = PlacementEngine::new(DryRunWindowSystem::new(), settings());

        let outcome = engine.split_foreground(Direction::Left).unwrap();
        assert!(outcome.converged);

        let handle = engine.system().foreground_window().unwrap();
        assert_eq!(engine.system().window_rect(handle).unwrap(), WindowRect::new(-8, -8, 968, 1048));
        assert!(!engine.system().transitions_disabled());
    }

    #[test]
    fn test_move_on_dry_run_desktop() {
        let engine = PlacementEngine::new(DryRunWindowSystem::new(), settings());

        let planned = engine.move_foreground(Direction::Right).unwrap();
        // 320x180+1280x720 on 1920x1080 keeps its proportions on 2560x1440
        assert_eq!(planned, WindowRect::new(2346, 240, 4052, 1200));
    }
}
