//! Error types for the build pipeline.
//!
//! [`Error`] covers everything that can go wrong inside the pipeline stages.
//! [`ErrorExt`] attaches an operation and a path to filesystem errors, and
//! [`Context`] turns `Option`/foreign `Result` values into [`Error`]s.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by pipeline stages.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form error message.
    #[error("{0}")]
    GenericError(String),

    /// IO error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Filesystem error with the operation and the path involved.
    #[error("{context} ({path}): {error}", path = .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying error
        #[source]
        error: std::io::Error,
    },

    /// External command could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that was attempted
        command: String,
        /// Spawn error
        #[source]
        error: std::io::Error,
    },

    /// Descriptor is missing a value or holds an invalid one.
    #[error("invalid build descriptor: {0}")]
    Descriptor(String),

    /// Required inputs are absent; nothing was touched.
    #[error("missing required inputs: {}", .0.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    MissingInputs(Vec<PathBuf>),

    /// Clean pattern could not be compiled.
    #[error("invalid clean pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path was not below the expected root.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Spec template failed to render.
    #[error("failed to render packager spec: {0}")]
    Template(#[from] handlebars::RenderError),
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps the error in [`Error::Fs`] with the given operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts missing values and foreign errors into [`Error::GenericError`].
pub trait Context<T> {
    /// Adds a message describing what was expected.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: std::error::Error> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Returns early with a formatted [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path_and_operation() {
        let err: Result<()> = Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied))
            .fs_context("removing directory", "/tmp/build");
        let message = err.unwrap_err().to_string();
        assert!(message.starts_with("removing directory (/tmp/build)"), "{message}");
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let value: Option<u8> = None;
        let err = value.context("entry is required").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "entry is required"));
    }
}
