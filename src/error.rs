//! Top-level error types for the `grp-build` binary.
//!
//! Pipeline stages report [`crate::bundler::Error`]; this module wraps those
//! together with CLI and descriptor loading failures.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Main error type for the build tool
#[derive(Error, Debug)]
pub enum BuildError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Pipeline errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Descriptor file could not be found or read
    #[error("Cannot read descriptor {path}: {reason}")]
    DescriptorUnreadable {
        /// Descriptor path
        path: String,
        /// Reason for the error
        reason: String,
    },
}

impl BuildError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BuildError::Cli(CliError::DescriptorUnreadable { .. }) => vec![
                "Run grp-build from the project root or pass --descriptor <PATH>".to_string(),
            ],
            BuildError::Toml(_) => {
                vec!["Check the descriptor syntax against the documented TOML layout".to_string()]
            }
            BuildError::Bundler(crate::bundler::Error::Descriptor(_)) => vec![
                "Fix the listed descriptor value; paths are relative to the project directory"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
