//! PyInstaller packager invocation.
//!
//! Turns the validated descriptor into a `.spec` file and runs the packager on
//! it, blocking until it exits.
//!
//! # Module Organization
//!
//! - `template` - spec template constant
//! - `toolset` - packager executable location
//! - `script` - spec generation from the template
//! - `build` - packager command line and execution

mod build;
mod script;
mod template;
mod toolset;

pub use build::{display_command, packager_args, run_packager};
pub use script::{generate_spec, render_spec};
pub use toolset::locate_packager;

use crate::{
    bundler::{error::Result, settings::Settings},
    cli::OutputManager,
};
use std::{path::Path, process::ExitStatus};

/// Result of one packager run.
#[derive(Debug)]
pub struct PackagerRun {
    /// Command line that was executed.
    pub command: String,
    /// Exit status of the packager process.
    pub status: ExitStatus,
}

/// Generate the spec and run the packager on it.
///
/// # Process
///
/// 1. Render `<name>.spec` into the build directory
/// 2. Run `program` with dist/work paths pointing at the workspaces
///
/// `program` is the executable resolved by preflight.
///
/// # Errors
///
/// Fails when the packager cannot be started or the spec cannot be written. A packager that runs and exits non-zero is reported through
/// [`PackagerRun::status`].
pub async fn package(
    settings: &Settings,
    program: &Path,
    output: &OutputManager,
) -> Result<PackagerRun> {
    log::info!("Packaging {}", settings.name());

    let spec_path = generate_spec(settings).await?;
    output.indent(&format!("Spec: {}", spec_path.display()))?;

    let args = packager_args(settings, &spec_path);
    let command = display_command(program, &args);
    output.indent(&format!("Command: {command}"))?;
    output.blank()?;

    let status = run_packager(program, &args, settings.project_dir()).await?;
    log::debug!("Packager exited with {:?}", status.code());

    Ok(PackagerRun { command, status })
}
