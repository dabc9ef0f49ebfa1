use std::io;
use std::path::PathBuf;

use crosshair_core::ConfigError;
use crosshair_overlay::PlatformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("overlay error")]
    Platform(#[from] PlatformError),

    #[error("failed to access PID file {path}")]
    PidFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("crosshair is already running (PID {0})")]
    AlreadyRunning(i32),

    #[error("no running instance found ({0})")]
    NotRunning(&'static str),

    #[error("failed to send SIGTERM to process {pid}")]
    Signal {
        pid: i32,
        #[source]
        source: io::Error,
    },

    #[error("failed to start background process")]
    Spawn(#[source] io::Error),

    #[error("failed to install signal handler")]
    SignalHandler(#[from] ctrlc::Error),

    #[error("terminal I/O failed")]
    Terminal(#[source] io::Error),

    #[error("configuration error: user chose to quit")]
    Quit,
}
