//! The discrete placement commands shared by hotkeys and the command line.

use crate::layout::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveRight,
    MoveLeft,
    MoveUp,
    MoveDown,
    Maximize,
    Restore,
    SplitRight,
    SplitLeft,
    SplitUp,
    SplitDown,
    ToggleMaximize,
    /// Consumes a chord without doing anything, to bind over another shortcut
    NoOp,
}

impl Command {
    /// Every command, in the order hotkey bindings are evaluated
    pub const ALL: [Command; 12] = [
        Command::MoveRight,
        Command::MoveLeft,
        Command::MoveUp,
        Command::MoveDown,
        Command::ToggleMaximize,
        Command::SplitRight,
        Command::SplitLeft,
        Command::SplitUp,
        Command::SplitDown,
        Command::Maximize,
        Command::Restore,
        Command::NoOp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveRight => "MoveRight",
            Command::MoveLeft => "MoveLeft",
            Command::MoveUp => "MoveUp",
            Command::MoveDown => "MoveDown",
            Command::Maximize => "Maximize",
            Command::Restore => "Restore",
            Command::SplitRight => "SplitRight",
            Command::SplitLeft => "SplitLeft",
            Command::SplitUp => "SplitUp",
            Command::SplitDown => "SplitDown",
            Command::ToggleMaximize => "ToggleMaximize",
            Command::NoOp => "NoOp",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Command::MoveRight => "Move window to the monitor on the right",
            Command::MoveLeft => "Move window to the monitor on the left",
            Command::MoveUp => "Move window to the monitor above",
            Command::MoveDown => "Move window to the monitor below",
            Command::Maximize => "Maximize active window",
            Command::Restore => "Restore active window",
            Command::SplitRight => "Resize window to the right half of its monitor",
            Command::SplitLeft => "Resize window to the left half of its monitor",
            Command::SplitUp => "Resize window to the top half of its monitor",
            Command::SplitDown => "Resize window to the bottom half of its monitor",
            Command::ToggleMaximize => "Toggle maximize/restore",
            Command::NoOp => "No operation (used to bind over existing shortcuts)",
        }
    }

    /// Direction for moves and splits
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::MoveRight | Command::SplitRight => Some(Direction::Right),
            Command::MoveLeft | Command::SplitLeft => Some(Direction::Left),
            Command::MoveUp | Command::SplitUp => Some(Direction::Up),
            Command::MoveDown | Command::SplitDown => Some(Direction::Down),
            _ => None,
        }
    }

    /// Help text listing every command
    pub fn usage(program: &str) -> String {
        let mut text = format!("Usage: {} [OPTIONS] [COMMAND]\n\nCommands:\n", program);
        for command in Command::ALL {
            text.push_str(&format!("  {:<16}{}\n", command.name(), command.summary()));
        }
        text
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Command {
    type Err = String;

    /// Accepts `SplitLeft`, `splitleft` and the dash-prefixed `-SplitLeft`.
    /// Bare directions (`-Right`) are moves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('-');
        if let Some(command) = Command::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
        {
            return Ok(command);
        }

        match name.to_ascii_lowercase().as_str() {
            "right" => Ok(Command::MoveRight),
            "left" => Ok(Command::MoveLeft),
            "up" => Ok(Command::MoveUp),
            "down" => Ok(Command::MoveDown),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}
