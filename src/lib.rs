//! Build pipeline library for frozen Python executables
//!
//! This library provides the three-stage build used to ship the ROM patch
//! tool as a standalone executable:
//! - cleaning the transient `build/` and `dist/` workspaces
//! - rendering a PyInstaller spec and running the packager
//! - verifying the produced executable
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BuildError, CliError, Result};
