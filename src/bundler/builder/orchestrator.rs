//! Main pipeline orchestration.
//!
//! This module provides the [`Pipeline`] that drives a build through
//! preflight, clean, package, staging and verification, tracking the
//! [`PipelineState`] as it goes.

use super::preflight::preflight;
use crate::{
    bundler::{
        BuildReport, PipelineState, Result,
        error::Error,
        packager,
        settings::{BundleMode, Settings},
        stages::{self, Verification},
        utils,
    },
    cli::OutputManager,
};
use std::path::PathBuf;

/// Build pipeline orchestrator.
///
/// Stages run strictly one after another. The first fatal failure stops the
/// run; nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use grp_build::bundler::{Pipeline, Settings};
/// use grp_build::cli::OutputManager;
///
/// # async fn example(settings: Settings) -> grp_build::bundler::Result<()> {
/// let pipeline = Pipeline::new(settings, OutputManager::new(false, false));
/// let report = pipeline.run().await?;
/// std::process::exit(report.exit_code());
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline {
    settings: Settings,
    output: OutputManager,
}

impl Pipeline {
    /// Creates a pipeline for the given settings.
    pub fn new(settings: Settings, output: OutputManager) -> Self {
        Self { settings, output }
    }

    fn transition(&self, state: &mut PipelineState, next: PipelineState) {
        log::debug!("pipeline: {} -> {}", state, next);
        *state = next;
    }

    fn report(
        &self,
        state: PipelineState,
        packager_exit_code: Option<i32>,
        missing_optional: &[PathBuf],
    ) -> BuildReport {
        debug_assert!(state.is_terminal(), "report built in non-terminal state {state}");
        BuildReport {
            state,
            packager_exit_code,
            artifact_path: self.settings.artifact_path(),
            artifact: None,
            warnings: Vec::new(),
            missing_optional: missing_optional.to_vec(),
        }
    }

    /// Runs the whole pipeline.
    ///
    /// # Returns
    ///
    /// A [`BuildReport`] whose state is one of `ABORTED` (packaging or
    /// staging failed), `VERIFIED_OK` or `VERIFIED_MISSING`.
    ///
    /// # Errors
    ///
    /// Preflight, cleanup and spec-generation failures are returned as errors
    /// before the packager runs.
    pub async fn run(&self) -> Result<BuildReport> {
        let settings = &self.settings;
        let output = &self.output;
        let mut state = PipelineState::Start;

        output.section(&format!("grp-build: {}", settings.name()))?;
        output.progress("Checking requirements")?;
        let checked = preflight(settings, output).await?;
        let missing = checked.missing_optional.as_slice();

        output.blank()?;
        output.progress("Cleaning previous build output")?;
        let cleaned = stages::clean(settings).await?;
        if cleaned.removed.is_empty() {
            output.indent("Nothing to clean")?;
        }
        for path in &cleaned.removed {
            let shown = path.strip_prefix(settings.project_dir()).unwrap_or(path);
            output.success(&format!("Removed {}", shown.display()))?;
        }
        self.transition(&mut state, PipelineState::Cleaned);

        output.blank()?;
        output.progress("Running packager")?;
        let run = match packager::package(settings, &checked.packager, output).await {
            Ok(run) => run,
            Err(Error::CommandFailed { command, error }) => {
                output.error(&format!("Build failed: could not run `{command}`: {error}"))?;
                self.transition(&mut state, PipelineState::PackagedFailed);
                self.transition(&mut state, PipelineState::Aborted);
                return Ok(self.report(state, None, missing));
            }
            Err(e) => return Err(e),
        };

        let exit_code = run.status.code();
        if !run.status.success() {
            match exit_code {
                Some(code) => output.error(&format!(
                    "Build failed: packager exited with code {code}"
                ))?,
                None => output.error("Build failed: packager was terminated by a signal")?,
            }
            output.indent(&format!("Command: {}", run.command))?;
            self.transition(&mut state, PipelineState::PackagedFailed);
            self.transition(&mut state, PipelineState::Aborted);
            return Ok(self.report(state, exit_code, missing));
        }
        output.blank()?;
        output.success("Build succeeded")?;
        self.transition(&mut state, PipelineState::Packaged);

        let mut warnings = Vec::new();
        if settings.mode() == BundleMode::OneDir {
            output.section("Staging output folder")?;
            match stages::stage::stage(settings).await {
                Ok(staged) => {
                    for path in &staged.copied {
                        output.success(&format!("Copied {}", path.display()))?;
                    }
                    for warning in &staged.warnings {
                        output.warn(warning)?;
                    }
                    warnings = staged.warnings;
                    output.success(&format!("Output folder: {}", staged.release_dir.display()))?;
                }
                Err(e) => {
                    output.error(&format!("Staging failed: {e}"))?;
                    self.transition(&mut state, PipelineState::Aborted);
                    return Ok(self.report(state, exit_code, missing));
                }
            }
        }

        output.section("Build result")?;
        let artifact_path = settings.artifact_path();

        let artifact = match stages::verify_artifact(&artifact_path).await? {
            Verification::Present(artifact) => {
                output.success(&format!(
                    "{} ({:.2} MB, {} bytes)",
                    artifact.path.display(),
                    artifact.size_mb(),
                    artifact.size
                ))?;
                output.indent(&format!("SHA-256: {}", artifact.checksum))?;
                if settings.mode() == BundleMode::OneDir {
                    let release_dir = settings.release_dir();
                    let total = utils::fs::dir_size(&release_dir).await?;
                    output.indent(&format!(
                        "Folder: {} ({:.2} MB total)",
                        release_dir.display(),
                        total as f64 / (1024.0 * 1024.0)
                    ))?;
                }
                self.transition(&mut state, PipelineState::VerifiedOk);
                Some(artifact)
            }
            Verification::Missing => {
                output.error(&format!("Artifact not found: {}", artifact_path.display()))?;
                self.transition(&mut state, PipelineState::VerifiedMissing);
                None
            }
        };

        let mut report = self.report(state, exit_code, missing);
        report.artifact = artifact;
        report.warnings = warnings;
        Ok(report)
    }
}
