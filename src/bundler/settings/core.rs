//! Core Settings struct and implementations.

use super::{
    BundleMode, CleanSettings, DataMapping, PackageSettings, PackagerOptions, PackagerSettings,
    StagingSettings, Target,
};
use std::path::{Path, PathBuf};

/// Validated build configuration.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Every path held
/// here is absolute and resolved against the project directory, so stages can
/// run regardless of the process working directory.
///
/// # Examples
///
/// ```no_run
/// use grp_build::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> grp_build::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir(".")
///     .package_settings(PackageSettings {
///         name: "GRP_v1.0.0".into(),
///         entry: "main.py".into(),
///         ..Default::default()
///     })
///     .build()?;
/// println!("artifact: {}", settings.artifact_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package metadata, entry and icon already resolved.
    package: PackageSettings,

    /// Project root all relative descriptor paths were resolved against.
    project_dir: PathBuf,

    /// Packager layout.
    mode: BundleMode,

    /// Operating system the artifact is named for.
    target: Target,

    /// Toggles written into the spec.
    options: PackagerOptions,

    /// Packager executable.
    packager: PackagerSettings,

    /// Build/dist directories (absolute) and stale file patterns.
    clean: CleanSettings,

    /// Onedir staging, sources resolved.
    staging: StagingSettings,

    /// Files that must exist before anything is deleted.
    required_files: Vec<PathBuf>,

    /// Directories that must exist before anything is deleted.
    required_dirs: Vec<PathBuf>,
}

impl Settings {
    /// Returns the executable name, without extension.
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Returns the version string if one was configured.
    pub fn version(&self) -> Option<&str> {
        self.package.version.as_deref()
    }

    /// Returns the project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the entry script.
    pub fn entry(&self) -> &Path {
        &self.package.entry
    }

    /// Returns the icon resource.
    pub fn icon(&self) -> Option<&Path> {
        self.package.icon.as_deref()
    }

    /// Returns the bundled data mappings.
    pub fn data(&self) -> &[DataMapping] {
        &self.package.data
    }

    /// Returns the forced module includes.
    pub fn hidden_imports(&self) -> &[String] {
        &self.package.hidden_imports
    }

    /// Returns the module exclusions.
    pub fn excludes(&self) -> &[String] {
        &self.package.excludes
    }

    /// Returns the packager layout.
    pub fn mode(&self) -> BundleMode {
        self.mode
    }

    /// Returns the artifact naming target.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the packager toggles.
    pub fn options(&self) -> &PackagerOptions {
        &self.options
    }

    /// Returns the packager executable settings.
    pub fn packager(&self) -> &PackagerSettings {
        &self.packager
    }

    /// Returns the clean configuration.
    pub fn clean(&self) -> &CleanSettings {
        &self.clean
    }

    /// Returns the staging configuration.
    pub fn staging(&self) -> &StagingSettings {
        &self.staging
    }

    /// Returns the files required before building.
    pub fn required_files(&self) -> &[PathBuf] {
        &self.required_files
    }

    /// Returns the directories required before building.
    pub fn required_dirs(&self) -> &[PathBuf] {
        &self.required_dirs
    }

    /// Returns the packager work directory.
    pub fn build_dir(&self) -> &Path {
        &self.clean.build_dir
    }

    /// Returns the packager output directory.
    pub fn dist_dir(&self) -> &Path {
        &self.clean.dist_dir
    }

    /// Returns where the generated spec file is written.
    pub fn spec_path(&self) -> PathBuf {
        self.build_dir().join(format!("{}.spec", self.name()))
    }

    /// Returns the artifact file name.
    ///
    /// Appends `.exe` when the target is Windows.
    pub fn artifact_file_name(&self) -> String {
        if self.target.is_windows() {
            format!("{}.exe", self.name())
        } else {
            self.name().to_string()
        }
    }

    /// Returns the folder the packager writes in onedir mode.
    pub fn bundle_dir(&self) -> PathBuf {
        self.dist_dir().join(self.name())
    }

    /// Returns the folder holding the artifact after staging.
    ///
    /// Equal to [`Settings::bundle_dir`] unless a release folder name is set.
    pub fn release_dir(&self) -> PathBuf {
        match &self.staging.release_dir {
            Some(release) => self.dist_dir().join(release),
            None => self.bundle_dir(),
        }
    }

    /// Returns the expected output artifact path.
    ///
    /// - onefile: `dist/<name>[.exe]`
    /// - onedir: `dist/<release_dir or name>/<name>[.exe]`
    pub fn artifact_path(&self) -> PathBuf {
        match self.mode {
            BundleMode::OneFile => self.dist_dir().join(self.artifact_file_name()),
            BundleMode::OneDir => self.release_dir().join(self.artifact_file_name()),
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        project_dir: PathBuf,
        mode: BundleMode,
        target: Target,
        options: PackagerOptions,
        packager: PackagerSettings,
        clean: CleanSettings,
        staging: StagingSettings,
        required_files: Vec<PathBuf>,
        required_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            package,
            project_dir,
            mode,
            target,
            options,
            packager,
            clean,
            staging,
            required_files,
            required_dirs,
        }
    }
}
