use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};

use telewindow::command::Command;
use telewindow::config::Config;
use telewindow::services::{create_window_system, PlacementEngine, PlacementSettings};
use telewindow::utils::init_tracing;

const PROGRAM: &str = "telewindow-cli";

#[derive(Parser, Debug)]
#[command(name = "telewindow-cli")]
#[command(about = "Run a single placement command against the active window")]
struct Args {
    /// Path to the configuration file (TOML, or JSON by extension)
    #[arg(short, long, default_value = "telewindow.toml")]
    config: String,

    /// Simulate the desktop instead of touching real windows
    #[arg(long)]
    dry_run: bool,

    /// Log level, overrides the configuration file
    #[arg(long)]
    log_level: Option<String>,

    /// Command to run, e.g. SplitLeft or -SplitLeft
    #[arg(allow_hyphen_values = true)]
    command: Option<String>,
}

fn main() -> Result<ExitCode> {
    run(Args::parse())
}

fn run(args: Args) -> Result<ExitCode> {
    // Usage needs no configuration, so a broken config file cannot hide it
    let Some(raw_command) = args.command else {
        print!("{}", Command::usage(PROGRAM));
        return Ok(ExitCode::SUCCESS);
    };

    let config = Config::load(&args.config)?;
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Received command: {}", raw_command);
    let command = match raw_command.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            error!("{}", e);
            eprint!("{}", Command::usage(PROGRAM));
            return Ok(ExitCode::FAILURE);
        }
    };

    if command == Command::NoOp {
        info!("No operation performed");
        return Ok(ExitCode::SUCCESS);
    }

    if args.dry_run {
        warn!("Dry-run mode: no window will actually be moved");
    }

    let window_system = create_window_system(args.dry_run)?;
    let engine = PlacementEngine::new(window_system, PlacementSettings::from(&config.placement));

    match engine.execute(command) {
        Ok(()) => {
            info!("{} done", command);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_expected() => {
            info!("{} skipped: {}", command, e);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{} failed: {}", command, e);
            Ok(ExitCode::FAILURE)
        }
    }
}
