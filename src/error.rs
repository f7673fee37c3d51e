//! Error type shared by every stage of the launch pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end an invocation before (or instead of) process replacement.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Malformed or missing top-level arguments.
    #[error("{0}")]
    Usage(String),

    /// The mount specification parsed without a required field.
    #[error("mount specification '{spec}' has no {missing}")]
    ParseIncomplete { spec: String, missing: &'static str },

    /// A bounded option value would not fit its buffer.
    #[error("option value needs {needed} bytes but only {capacity} are available")]
    BufferTooSmall { capacity: usize, needed: usize },

    /// The assembled argument vector exceeds the exec capacity.
    #[error("too many arguments: {count} (maximum {max})")]
    TooManyArguments { count: usize, max: usize },

    /// Process replacement failed to start the target program.
    #[error("failed to execute '{}': {source}", path.display())]
    Exec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The launcher could not locate its own installation directory.
    #[error("failed to locate installation directory: {0}")]
    InstallDir(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LaunchError {
    /// Process exit status for this error.
    ///
    /// Usage problems exit with 2, matching the usage-text path; every other
    /// failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::TooManyArguments { .. } => 2,
            _ => 1,
        }
    }
}
