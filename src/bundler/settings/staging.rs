//! Post-build staging of onedir output.

use std::path::PathBuf;

/// Files copied next to the executable and the final folder name.
///
/// Only used in [`BundleMode::OneDir`](super::BundleMode::OneDir); onefile
/// builds carry their data inside the executable.
#[derive(Clone, Debug, Default)]
pub struct StagingSettings {
    /// Final folder name under the dist directory.
    ///
    /// Default: None (keep the packager's `<name>` folder)
    pub release_dir: Option<String>,

    /// Files copied into the output folder.
    ///
    /// Default: Empty
    pub extra_files: Vec<PathBuf>,

    /// Directories copied into the output folder.
    ///
    /// Default: Empty
    pub extra_dirs: Vec<PathBuf>,
}
