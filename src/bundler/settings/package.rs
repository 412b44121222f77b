//! Package identity and analysis inputs.

use std::path::{Path, PathBuf};

/// One bundled data mapping.
///
/// Copies `source` (file or directory, relative to the project) into the
/// frozen application at `destination`.
///
/// ```toml
/// [[data]]
/// source = "Tools"
/// destination = "Tools"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataMapping {
    /// Path on disk.
    pub source: PathBuf,

    /// Directory inside the bundle. `"."` means the bundle root.
    pub destination: String,
}

impl DataMapping {
    /// Creates a mapping.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Returns the source path.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the destination inside the bundle.
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

/// Package metadata and analysis inputs.
///
/// Everything the packager needs to find and freeze the application.
///
/// # Examples
///
/// ```no_run
/// use grp_build::bundler::{DataMapping, PackageSettings};
///
/// let package = PackageSettings {
///     name: "GRP_v1.0.0".into(),
///     version: Some("1.0.0".into()),
///     entry: "main.py".into(),
///     icon: Some("assets/icon.ico".into()),
///     data: vec![DataMapping::new("Tools", "Tools")],
///     hidden_imports: vec!["structlog".into()],
///     excludes: vec!["tkinter".into()],
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Output executable name, without extension.
    pub name: String,

    /// Version string, a leading `v` is allowed.
    ///
    /// Default: None
    pub version: Option<String>,

    /// Entry script passed to the packager's analysis.
    pub entry: PathBuf,

    /// Icon resource for the executable.
    ///
    /// Default: None
    pub icon: Option<PathBuf>,

    /// Data files and directories bundled with the application.
    ///
    /// Default: Empty
    pub data: Vec<DataMapping>,

    /// Module names the packager must include even if analysis misses them.
    ///
    /// Default: Empty
    pub hidden_imports: Vec<String>,

    /// Module names the packager must leave out.
    ///
    /// Default: Empty
    pub excludes: Vec<String>,
}
