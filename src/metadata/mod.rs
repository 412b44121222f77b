//! Build descriptor loading from a single TOML file

use crate::bundler::{
    BundleMode, CleanSettings, DataMapping, PackageSettings, PackagerOptions, PackagerSettings,
    Settings, SettingsBuilder, StagingSettings, Target,
};
use crate::error::{BuildError, CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Descriptor file name looked up in the project directory.
pub const DEFAULT_DESCRIPTOR: &str = "grp-build.toml";

/// Build descriptor as written in `grp-build.toml`.
///
/// Paths are relative to the project directory. Unknown keys are rejected so
/// typos do not silently fall back to defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildDescriptor {
    /// Output executable name, without extension
    pub name: String,

    /// Version string, a leading `v` is allowed
    #[serde(default)]
    pub version: Option<String>,

    /// Entry script
    pub entry: PathBuf,

    /// Icon resource
    #[serde(default)]
    pub icon: Option<PathBuf>,

    /// Packager layout
    #[serde(default)]
    pub mode: BundleMode,

    /// Artifact naming target
    #[serde(default)]
    pub target: Target,

    /// Final onedir folder name
    #[serde(default)]
    pub release_dir: Option<String>,

    #[serde(default)]
    pub hidden_imports: Vec<String>,

    #[serde(default)]
    pub excludes: Vec<String>,

    #[serde(default)]
    pub required_files: Vec<PathBuf>,

    #[serde(default)]
    pub required_dirs: Vec<PathBuf>,

    #[serde(default)]
    pub extra_files: Vec<PathBuf>,

    #[serde(default)]
    pub extra_dirs: Vec<PathBuf>,

    /// `[[data]]` mappings
    #[serde(default)]
    pub data: Vec<DataMapping>,

    /// `[options]` table
    #[serde(default)]
    pub options: PackagerOptions,

    /// `[packager]` table
    #[serde(default)]
    pub packager: PackagerSettings,

    /// `[clean]` table
    #[serde(default)]
    pub clean: CleanSettings,
}

impl BuildDescriptor {
    /// Parse descriptor text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate and resolve into [`Settings`] against `project_dir`.
    pub fn into_settings(self, project_dir: &Path) -> Result<Settings> {
        let settings = SettingsBuilder::new()
            .project_dir(project_dir)
            .package_settings(PackageSettings {
                name: self.name,
                version: self.version,
                entry: self.entry,
                icon: self.icon,
                data: self.data,
                hidden_imports: self.hidden_imports,
                excludes: self.excludes,
            })
            .mode(self.mode)
            .target(self.target)
            .options(self.options)
            .packager(self.packager)
            .clean(self.clean)
            .staging(StagingSettings {
                release_dir: self.release_dir,
                extra_files: self.extra_files,
                extra_dirs: self.extra_dirs,
            })
            .required_files(self.required_files)
            .required_dirs(self.required_dirs)
            .build()?;
        Ok(settings)
    }
}

/// Read and parse a descriptor file.
pub fn load_descriptor(path: &Path) -> Result<BuildDescriptor> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        BuildError::Cli(CliError::DescriptorUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;

    let descriptor = BuildDescriptor::parse(&text)?;
    log::debug!(
        "Loaded descriptor {} ({} hidden imports, {} data mappings)",
        path.display(),
        descriptor.hidden_imports.len(),
        descriptor.data.len()
    );
    Ok(descriptor)
}

/// Load a descriptor and resolve it into [`Settings`].
///
/// Relative paths resolve against `project_dir` when given, otherwise
/// against the directory holding the descriptor.
pub fn load_settings(descriptor_path: &Path, project_dir: Option<&Path>) -> Result<Settings> {
    let descriptor = load_descriptor(descriptor_path)?;
    let root = match project_dir {
        Some(dir) => dir.to_path_buf(),
        None => descriptor_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    descriptor.into_settings(&root)
}
