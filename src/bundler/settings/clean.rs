//! Transient workspace configuration.

use std::path::PathBuf;

/// Directories and files removed before each build.
///
/// ```toml
/// [clean]
/// build_dir = "build"
/// dist_dir = "dist"
/// patterns = ["GRP_*.spec"]
/// preserve = ["GRP_v1.0.0.spec"]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanSettings {
    /// Packager work directory, also holds the generated spec.
    ///
    /// Default: `build`
    pub build_dir: PathBuf,

    /// Packager output directory.
    ///
    /// Default: `dist`
    pub dist_dir: PathBuf,

    /// Glob patterns (relative to the project) of stale files to delete.
    ///
    /// Default: Empty
    pub patterns: Vec<String>,

    /// File names that survive even when a pattern matches them.
    ///
    /// Default: Empty
    pub preserve: Vec<String>,
}

impl Default for CleanSettings {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            dist_dir: PathBuf::from("dist"),
            patterns: Vec::new(),
            preserve: Vec::new(),
        }
    }
}
