mod daemon;
mod error;
mod logging;
mod recover;
mod setup;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use crosshair_core::{Config, ConfigError, config, monitor};
use crosshair_overlay::CloseHandle;

use error::AppError;

/// Set once the overlay exists; until then a signal exits the process
static CLOSE: OnceLock<CloseHandle> = OnceLock::new();

#[derive(Parser)]
#[command(
    version,
    about = "Lightweight click-through crosshair overlay for X11/XWayland",
    after_help = "Configuration file location:\n  Default: ~/.config/crosshair/config.toml\n  Override with --config or XDG_CONFIG_HOME"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List available monitors and exit
    #[arg(long)]
    list_monitors: bool,

    /// Stop the running instance
    #[arg(long)]
    stop: bool,

    /// Run the interactive setup wizard
    #[arg(long)]
    setup: bool,

    /// Stay attached to the terminal instead of running in the background
    #[arg(long)]
    foreground: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::AlreadyRunning(pid)) => {
            println!("Crosshair is already running (PID {pid}).");
            println!("To stop: crosshair --stop");
            ExitCode::FAILURE
        }
        Err(e) => {
            let message = report(&e);
            tracing::error!(error = %message, "Exiting");
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Error message with its source chain
fn report(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        message.push_str(": ");
        message.push_str(&e.to_string());
        source = e.source();
    }
    message
}

fn run(cli: Cli) -> Result<(), AppError> {
    let pid_path = daemon::pid_file_path();

    if cli.stop {
        let pid = daemon::stop_instance(&pid_path)?;
        println!("Sent stop signal to crosshair (PID {pid})");
        return Ok(());
    }

    if cli.list_monitors {
        let monitors = crosshair_overlay::list_monitors()?;
        print!("{}", monitor::format_monitor_list(&monitors));
        return Ok(());
    }

    let config_path = cli.config.unwrap_or_else(config::config_path);

    // The wizard already ran in the parent; the child has no terminal
    if cli.setup && !daemon::is_daemon_child() && !run_setup(&config_path)? {
        return Ok(());
    }

    if let Some(pid) = daemon::running_instance(&pid_path) {
        return Err(AppError::AlreadyRunning(pid));
    }

    // Settle the config while a terminal is still attached
    let config = load_config(&config_path)?;

    if !cli.foreground
        && let Some(child) = daemon::daemonize()?
    {
        println!("✓ Crosshair started (PID {child})");
        println!("  To stop: crosshair --stop");
        return Ok(());
    }

    let _pid_file = daemon::PidFile::create(&pid_path)
        .inspect_err(|e| tracing::warn!(error = %report(e), "Running without PID file"))
        .ok();

    ctrlc::set_handler(|| match CLOSE.get() {
        Some(handle) => {
            tracing::info!("Received termination signal, shutting down");
            handle.close();
        }
        None => std::process::exit(0),
    })?;

    run_overlay(&config)
}

fn run_setup(path: &Path) -> Result<bool, AppError> {
    let monitors = crosshair_overlay::list_monitors().unwrap_or_else(|e| {
        tracing::warn!(error = %report(&e), "Could not detect monitors");
        Vec::new()
    });
    setup::run(path, &monitors)
}

fn load_config(path: &Path) -> Result<Config, AppError> {
    let problems = match config::load_or_create(path) {
        Ok((config, true)) => return Ok(config),
        Ok((config, false)) => match config::validate(&config) {
            Ok(()) => return Ok(config),
            Err(e) => e.to_string(),
        },
        Err(e @ ConfigError::Load { .. }) => report(&e),
        Err(e) => return Err(e.into()),
    };

    tracing::warn!(path = %path.display(), "Configuration is invalid");
    recover::handle_invalid(path, &problems)
}

fn run_overlay(config: &Config) -> Result<(), AppError> {
    let spec = config::crosshair_spec(config).map_err(ConfigError::from)?;
    let mut overlay = crosshair_overlay::connect(spec, config.position)?;

    let handle = overlay.close_handle();
    if CLOSE.set(handle).is_err() {
        tracing::warn!("Close handle already installed");
    }

    overlay.run()?;
    tracing::info!("Crosshair overlay stopped");
    Ok(())
}
