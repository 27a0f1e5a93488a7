use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};

use telewindow::config::Config;
use telewindow::services::{
    create_keyboard_hook, create_window_system, HotkeyDispatcher, HotkeyStateMachine, PlacementEngine,
    PlacementSettings,
};
use telewindow::utils::{init_tracing, permissions};

/// Room for key events queued behind a slow placement
const EVENT_BUFFER: usize = 256;

#[derive(Parser, Debug)]
#[command(name = "telewindow")]
#[command(about = "Move and split the active window across monitors with keyboard chords")]
struct Args {
    /// Path to the configuration file (TOML, or JSON by extension)
    #[arg(short, long, default_value = "telewindow.toml")]
    config: String,

    /// Simulate the desktop and replay the bindings instead of hooking the keyboard
    #[arg(long)]
    dry_run: bool,

    /// Log level, overrides the configuration file
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Arc::new(Config::load(&args.config)?);
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Starting telewindow v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", args.config);

    if args.dry_run {
        warn!("Dry-run mode: no window will actually be moved");
    }

    permissions::check_privileges(config.privileges.allow_non_admin)?;

    let bindings = config.bindings()?;
    for (command, binding) in &bindings {
        info!("  {:<16} {}", binding.to_string(), command);
    }

    let window_system = create_window_system(args.dry_run)?;
    let engine = PlacementEngine::new(window_system, PlacementSettings::from(&config.placement));
    let dispatcher = Arc::new(HotkeyDispatcher::new(HotkeyStateMachine::new(bindings), engine));
    let keyboard_hook = create_keyboard_hook(config.clone(), args.dry_run)?;

    info!("All components initialized");

    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let mut hook_handle = tokio::spawn(async move {
        if let Err(e) = keyboard_hook.run(event_tx).await {
            error!("Keyboard hook error: {}", e);
        }
    });
    let mut dispatcher_handle = tokio::spawn(async move {
        let shutdown = async {
            let _ = shutdown_rx.await;
        };
        if let Err(e) = dispatcher.run(event_rx, shutdown).await {
            error!("Dispatcher error: {}", e);
        }
    });

    info!("Listening for hotkeys");

    tokio::select! {
        _ = wait_for_shutdown_signal() => {}
        _ = &mut dispatcher_handle => {
            warn!("Dispatcher stopped on its own");
        }
    }

    info!("Shutting down...");
    let _ = shutdown_tx.send(());

    // The dispatcher drops the event receiver on exit, which tells the hook to unregister
    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        if !dispatcher_handle.is_finished() {
            let _ = (&mut dispatcher_handle).await;
        }
        let _ = (&mut hook_handle).await;
    })
    .await;

    match shutdown_result {
        Ok(_) => info!("All services stopped cleanly"),
        Err(_) => {
            warn!("Timed out waiting for services to stop");
            dispatcher_handle.abort();
            hook_handle.abort();
        }
    }

    info!("telewindow stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    result = signal::ctrl_c() => log_ctrl_c(result),
                    _ = terminate.recv() => info!("Received SIGTERM"),
                }
                return;
            }
            Err(e) => warn!("Cannot listen for SIGTERM: {}", e),
        }
    }

    log_ctrl_c(signal::ctrl_c().await);
}

fn log_ctrl_c(result: std::io::Result<()>) {
    match result {
        Ok(()) => info!("Received shutdown signal (Ctrl+C)"),
        Err(err) => error!("Error waiting for shutdown signal: {}", err),
    }
}
