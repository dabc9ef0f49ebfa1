//! Error types for configuration operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to save configuration to {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to write default configuration to {path}")]
    WriteDefault {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create config directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration")]
    Invalid(#[from] ValidationError),
}

/// Every problem found in a config, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .problems.join("\n  - "))]
pub struct ValidationError {
    pub problems: Vec<String>,
}
