//! Builder for constructing Settings.

use super::{
    BundleMode, CleanSettings, PackageSettings, PackagerOptions, PackagerSettings, Settings,
    StagingSettings, Target,
};
use crate::bundler::error::{Context, Error, Result};
use path_absolutize::Absolutize;
use std::path::{Component, Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Resolves every relative path against the project directory and rejects
/// values that would make a stage act outside of it.
///
/// # Examples
///
/// ```no_run
/// use grp_build::bundler::{BundleMode, PackageSettings, SettingsBuilder, StagingSettings};
///
/// # fn example() -> grp_build::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("/work/rom-patcher")
///     .package_settings(PackageSettings {
///         name: "GRP_v1.0.0".into(),
///         entry: "main.py".into(),
///         ..Default::default()
///     })
///     .mode(BundleMode::OneDir)
///     .staging(StagingSettings {
///         release_dir: Some("Global_ROM_Patcher".into()),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    mode: BundleMode,
    target: Target,
    options: PackagerOptions,
    packager: PackagerSettings,
    clean: CleanSettings,
    staging: StagingSettings,
    required_files: Vec<PathBuf>,
    required_dirs: Vec<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata and analysis inputs.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the packager layout.
    ///
    /// Default: [`BundleMode::OneFile`]
    pub fn mode(mut self, mode: BundleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the artifact naming target.
    ///
    /// Default: [`Target::Auto`]
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Sets packager toggles.
    pub fn options(mut self, options: PackagerOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the packager executable.
    pub fn packager(mut self, packager: PackagerSettings) -> Self {
        self.packager = packager;
        self
    }

    /// Sets the clean configuration.
    pub fn clean(mut self, clean: CleanSettings) -> Self {
        self.clean = clean;
        self
    }

    /// Sets the onedir staging configuration.
    pub fn staging(mut self, staging: StagingSettings) -> Self {
        self.staging = staging;
        self
    }

    /// Sets files that must exist before the build starts.
    pub fn required_files(mut self, files: Vec<PathBuf>) -> Self {
        self.required_files = files;
        self
    }

    /// Sets directories that must exist before the build starts.
    pub fn required_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.required_dirs = dirs;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_dir` or `package_settings` is missing, or
    /// [`Error::Descriptor`] when a value is invalid:
    /// - empty or path-like `name` / `release_dir`
    /// - `version` that is not semantic (a leading `v` is allowed)
    /// - `optimize` above 2
    /// - build or dist directory outside the project, equal to it, or equal
    ///   to each other
    /// - clean patterns that are absolute or contain `..`
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let project_dir = self
            .project_dir
            .context("project_dir is required")?
            .absolutize()
            .map_err(|e| Error::Descriptor(format!("cannot resolve project directory: {e}")))?
            .into_owned();
        let mut package = self
            .package_settings
            .context("package_settings is required")?;

        validate_plain_name("name", &package.name)?;
        if let Some(version) = &package.version {
            validate_version(version)?;
        }
        if package.entry.as_os_str().is_empty() {
            return Err(Error::Descriptor("entry must not be empty".into()));
        }
        if self.options.optimize > 2 {
            return Err(Error::Descriptor(format!(
                "optimize must be 0, 1 or 2 (got {})",
                self.options.optimize
            )));
        }
        if self.packager.program.trim().is_empty() {
            return Err(Error::Descriptor("packager.program must not be empty".into()));
        }

        package.entry = resolve(&project_dir, &package.entry)?;
        package.icon = package
            .icon
            .map(|icon| resolve(&project_dir, &icon))
            .transpose()?;
        for mapping in &mut package.data {
            mapping.source = resolve(&project_dir, &mapping.source)?;
            if mapping.destination.trim().is_empty() {
                mapping.destination = ".".to_string();
            }
        }

        let mut clean = self.clean;
        clean.build_dir = resolve_workspace(&project_dir, "build_dir", &clean.build_dir)?;
        clean.dist_dir = resolve_workspace(&project_dir, "dist_dir", &clean.dist_dir)?;
        if clean.build_dir == clean.dist_dir {
            return Err(Error::Descriptor(
                "clean.build_dir and clean.dist_dir must differ".into(),
            ));
        }
        for pattern in &clean.patterns {
            validate_clean_pattern(pattern)?;
        }

        let mut staging = self.staging;
        if let Some(release) = &staging.release_dir {
            validate_plain_name("release_dir", release)?;
        }
        staging.extra_files = resolve_all(&project_dir, &staging.extra_files)?;
        staging.extra_dirs = resolve_all(&project_dir, &staging.extra_dirs)?;

        let required_files = resolve_all(&project_dir, &self.required_files)?;
        let required_dirs = resolve_all(&project_dir, &self.required_dirs)?;

        Ok(Settings::new(
            package,
            project_dir,
            self.mode,
            self.target,
            self.options,
            self.packager,
            clean,
            staging,
            required_files,
            required_dirs,
        ))
    }
}

fn resolve(root: &Path, path: &Path) -> Result<PathBuf> {
    path.absolutize_from(root)
        .map(|p| p.into_owned())
        .map_err(|e| Error::Descriptor(format!("cannot resolve {}: {e}", path.display())))
}

fn resolve_all(root: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    paths.iter().map(|p| resolve(root, p)).collect()
}

/// Workspaces are deleted recursively, so they must sit strictly below the project.
fn resolve_workspace(root: &Path, field: &str, path: &Path) -> Result<PathBuf> {
    let resolved = resolve(root, path)?;
    if resolved == root || !resolved.starts_with(root) {
        return Err(Error::Descriptor(format!(
            "clean.{field} must be a directory inside {} (got {})",
            root.display(),
            resolved.display()
        )));
    }
    Ok(resolved)
}

/// Clean patterns are joined onto the project directory and may not climb out of it.
fn validate_clean_pattern(pattern: &str) -> Result<()> {
    let path = Path::new(pattern);
    let escapes = path.has_root()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
    if pattern.trim().is_empty() || escapes {
        return Err(Error::Descriptor(format!(
            "clean.patterns entries must be relative to the project and must not contain `..` (got {pattern:?})"
        )));
    }
    Ok(())
}

fn validate_plain_name(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Descriptor(format!("{field} must not be empty")));
    }
    if trimmed != value
        || value == "."
        || value == ".."
        || value.contains(['/', '\\'])
    {
        return Err(Error::Descriptor(format!(
            "{field} must be a plain file name (got {value:?})"
        )));
    }
    Ok(())
}

fn validate_version(version: &str) -> Result<()> {
    let bare = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version);
    semver::Version::parse(bare)
        .map(|_| ())
        .map_err(|e| Error::Descriptor(format!("version {version:?} is not semantic: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::DataMapping;

    fn package(name: &str) -> PackageSettings {
        PackageSettings {
            name: name.into(),
            entry: "main.py".into(),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_paths_against_project_dir() {
        let root = tempfile::tempdir().unwrap();
        let mut pkg = package("GRP");
        pkg.icon = Some("assets/icon.ico".into());
        pkg.data = vec![DataMapping::new("Tools", "")];

        let settings = SettingsBuilder::new()
            .project_dir(root.path())
            .package_settings(pkg)
            .build()
            .unwrap();

        let root = root.path().absolutize().unwrap().into_owned();
        assert_eq!(settings.entry(), root.join("main.py"));
        assert_eq!(settings.icon(), Some(root.join("assets/icon.ico").as_path()));
        assert_eq!(settings.data()[0].source(), root.join("Tools"));
        assert_eq!(settings.data()[0].destination(), ".");
        assert_eq!(settings.build_dir(), root.join("build"));
        assert_eq!(settings.dist_dir(), root.join("dist"));
        assert_eq!(settings.spec_path(), root.join("build").join("GRP.spec"));
    }

    #[test]
    fn artifact_path_follows_mode_and_target() {
        let root = tempfile::tempdir().unwrap();
        let onefile = SettingsBuilder::new()
            .project_dir(root.path())
            .package_settings(package("A"))
            .target(Target::Windows)
            .build()
            .unwrap();
        assert!(onefile.artifact_path().ends_with("dist/A.exe"));

        let onedir = SettingsBuilder::new()
            .project_dir(root.path())
            .package_settings(package("A"))
            .target(Target::Unix)
            .mode(BundleMode::OneDir)
            .staging(StagingSettings {
                release_dir: Some("Release".into()),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(onedir.bundle_dir().ends_with("dist/A"));
        assert!(onedir.artifact_path().ends_with("dist/Release/A"));
    }

    #[test]
    fn rejects_workspace_outside_project() {
        let root = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new()
            .project_dir(root.path())
            .package_settings(package("A"))
            .clean(CleanSettings {
                dist_dir: "../elsewhere".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Descriptor(ref m) if m.contains("dist_dir")), "{err}");
    }

    #[test]
    fn rejects_project_root_as_workspace() {
        let root = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new()
            .project_dir(root.path())
            .package_settings(package("A"))
            .clean(CleanSettings {
                build_dir: ".".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Descriptor(_)));
    }

    #[test]
    fn rejects_clean_patterns_leaving_project() {
        let root = tempfile::tempdir().unwrap();
        for pattern in ["../*.spec", "sub/../../*.spec", "/tmp/*.spec", ""] {
            let err = SettingsBuilder::new()
                .project_dir(root.path())
                .package_settings(package("A"))
                .clean(CleanSettings {
                    patterns: vec![pattern.into()],
                    ..Default::default()
                })
                .build()
                .unwrap_err();
            assert!(
                matches!(err, Error::Descriptor(ref m) if m.contains("clean.patterns")),
                "pattern {pattern:?}: {err}"
            );
        }

        let ok = SettingsBuilder::new()
            .project_dir(root.path())
            .package_settings(package("A"))
            .clean(CleanSettings {
                patterns: vec!["GRP_*.spec".into(), "specs/*.spec".into()],
                ..Default::default()
            })
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn rejects_path_like_names() {
        let root = tempfile::tempdir().unwrap();
        for name in ["", "a/b", "..", " padded"] {
            let result = SettingsBuilder::new()
                .project_dir(root.path())
                .package_settings(package(name))
                .build();
            assert!(result.is_err(), "name {name:?} should be rejected");
        }
    }

    #[test]
    fn version_accepts_leading_v() {
        assert!(validate_version("v1.0.0").is_ok());
        assert!(validate_version("1.2.3-beta.1").is_ok());
        assert!(validate_version("v1.0").is_err());
    }

    #[test]
    fn optimize_above_two_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let err = SettingsBuilder::new()
            .project_dir(root.path())
            .package_settings(package("A"))
            .options(PackagerOptions {
                optimize: 3,
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("optimize"));
    }
}
