//! Clean, package and verify pipeline for frozen Python executables.
//!
//! The pipeline is strictly sequential:
//!
//! ```text
//! START → CLEANED → PACKAGED → { VERIFIED_OK | VERIFIED_MISSING }
//!                  ↘ PACKAGED_FAILED → ABORTED
//! ```
//!
//! - [`settings`] - validated build descriptor
//! - [`builder`] - [`Pipeline`] orchestrator, preflight, checksums
//! - [`packager`] - spec rendering and packager invocation
//! - [`stages`] - cleaner, onedir staging and verifier
//! - [`utils`] - filesystem helpers

pub mod builder;
pub mod error;
pub mod packager;
pub mod settings;
pub mod stages;
pub mod utils;

use std::{fmt, path::PathBuf};

pub use builder::Pipeline;
pub use error::{Error, Result};
pub use settings::{
    BundleMode, CleanSettings, DataMapping, PackageSettings, PackagerOptions, PackagerSettings,
    Settings, SettingsBuilder, StagingSettings, Target,
};

/// Position of a build in the pipeline state machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PipelineState {
    /// Nothing has run yet.
    Start,
    /// Build and dist workspaces are gone.
    Cleaned,
    /// The packager exited zero.
    Packaged,
    /// The packager exited non-zero or could not be started.
    PackagedFailed,
    /// A fatal failure stopped the pipeline before verification.
    Aborted,
    /// The artifact exists.
    VerifiedOk,
    /// The packager succeeded but the artifact is absent.
    VerifiedMissing,
}

impl PipelineState {
    /// Returns true for states the pipeline stops in.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PipelineState::Aborted | PipelineState::VerifiedOk | PipelineState::VerifiedMissing
        )
    }

    /// Process exit code for a terminal state.
    ///
    /// - `VerifiedOk` → 0
    /// - `VerifiedMissing` → 2
    /// - anything else → 1
    pub fn exit_code(self) -> i32 {
        match self {
            PipelineState::VerifiedOk => 0,
            PipelineState::VerifiedMissing => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Start => "START",
            PipelineState::Cleaned => "CLEANED",
            PipelineState::Packaged => "PACKAGED",
            PipelineState::PackagedFailed => "PACKAGED_FAILED",
            PipelineState::Aborted => "ABORTED",
            PipelineState::VerifiedOk => "VERIFIED_OK",
            PipelineState::VerifiedMissing => "VERIFIED_MISSING",
        };
        f.write_str(name)
    }
}

/// Artifact found by the verifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifiedArtifact {
    /// Location of the executable.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the file.
    pub checksum: String,
}

impl VerifiedArtifact {
    /// Size in mebibytes, as shown to the user.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// Outcome of one pipeline run.
#[derive(Clone, Debug)]
pub struct BuildReport {
    /// Terminal state.
    pub state: PipelineState,
    /// Packager exit code, when it ran and exited normally.
    pub packager_exit_code: Option<i32>,
    /// Expected artifact location.
    pub artifact_path: PathBuf,
    /// Artifact metadata when verification succeeded.
    pub artifact: Option<VerifiedArtifact>,
    /// Non-fatal staging problems.
    pub warnings: Vec<String>,
    /// Optional inputs (icon, onedir extras) that were absent at preflight.
    pub missing_optional: Vec<PathBuf>,
}

impl BuildReport {
    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }
}
