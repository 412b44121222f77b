//! Requirement checks run before anything is deleted.

use super::tool_detection::packager_version;
use crate::{
    bundler::{
        error::{Error, Result},
        packager::locate_packager,
        settings::{BundleMode, Settings},
    },
    cli::OutputManager,
};
use std::path::{Path, PathBuf};

/// What preflight found.
#[derive(Debug)]
pub struct PreflightReport {
    /// Resolved packager executable.
    pub packager: PathBuf,
    /// Version reported by the packager, if it answered.
    pub packager_version: Option<String>,
    /// Optional inputs that are absent.
    pub missing_optional: Vec<PathBuf>,
}

fn display_relative<'a>(settings: &Settings, path: &'a Path) -> std::path::Display<'a> {
    path.strip_prefix(settings.project_dir())
        .unwrap_or(path)
        .display()
}

/// Check the packager and every required input.
///
/// All missing required inputs are collected and reported together as
/// [`Error::MissingInputs`].
pub async fn preflight(settings: &Settings, output: &OutputManager) -> Result<PreflightReport> {
    let program = &settings.packager().program;
    let packager = locate_packager(program, settings.project_dir())?;
    let version = packager_version(&packager).await;
    match &version {
        Some(v) => output.success(&format!("{program} {v}"))?,
        None => output.warn(&format!("{program} found but did not report a version"))?,
    }

    let mut missing = Vec::new();
    let mut check = |path: &Path, is_dir: bool| -> std::io::Result<()> {
        let present = if is_dir { path.is_dir() } else { path.is_file() };
        let suffix = if is_dir { "/" } else { "" };
        if present {
            output.success(&format!("{}{suffix}", display_relative(settings, path)))
        } else {
            missing.push(path.to_path_buf());
            output.error(&format!("{}{suffix} not found", display_relative(settings, path)))
        }
    };

    check(settings.entry(), false)?;
    for file in settings.required_files() {
        check(file, false)?;
    }
    for dir in settings.required_dirs() {
        check(dir, true)?;
    }
    for mapping in settings.data() {
        let source = mapping.source();
        check(source, source.is_dir())?;
    }

    if !missing.is_empty() {
        return Err(Error::MissingInputs(missing));
    }

    let mut missing_optional = Vec::new();
    let mut optional: Vec<(&Path, bool)> = Vec::new();
    if let Some(icon) = settings.icon() {
        optional.push((icon, false));
    }
    if settings.mode() == BundleMode::OneDir {
        let staging = settings.staging();
        optional.extend(staging.extra_files.iter().map(|f| (f.as_path(), false)));
        optional.extend(staging.extra_dirs.iter().map(|d| (d.as_path(), true)));
    }
    for (path, is_dir) in optional {
        let present = if is_dir { path.is_dir() } else { path.is_file() };
        if present {
            output.success(&format!("{} found", display_relative(settings, path)))?;
        } else {
            output.warn(&format!(
                "{} not found, continuing without it",
                display_relative(settings, path)
            ))?;
            missing_optional.push(path.to_path_buf());
        }
    }

    Ok(PreflightReport {
        packager,
        packager_version: version,
        missing_optional,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bundler::{PackageSettings, PackagerSettings, SettingsBuilder};
    use std::os::unix::fs::PermissionsExt;

    fn fake_packager(root: &Path) -> PathBuf {
        let path = root.join("fake-packager");
        std::fs::write(&path, "#!/bin/sh\necho 6.11.0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn settings(root: &Path) -> Settings {
        SettingsBuilder::new()
            .project_dir(root)
            .package_settings(PackageSettings {
                name: "A".into(),
                entry: "main.py".into(),
                icon: Some("icon.ico".into()),
                ..Default::default()
            })
            .packager(PackagerSettings {
                program: "./fake-packager".into(),
                args: vec![],
            })
            .required_dirs(vec!["Tools".into()])
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn collects_all_missing_inputs() {
        let root = tempfile::tempdir().unwrap();
        fake_packager(root.path());

        let err = preflight(&settings(root.path()), &OutputManager::silent())
            .await
            .unwrap_err();

        match err {
            Error::MissingInputs(paths) => {
                assert_eq!(paths.len(), 2);
                assert!(paths[0].ends_with("main.py"));
                assert!(paths[1].ends_with("Tools"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_icon_is_only_a_warning() {
        let root = tempfile::tempdir().unwrap();
        fake_packager(root.path());
        std::fs::write(root.path().join("main.py"), "print('hi')").unwrap();
        std::fs::create_dir(root.path().join("Tools")).unwrap();

        let report = preflight(&settings(root.path()), &OutputManager::silent())
            .await
            .unwrap();

        assert_eq!(report.packager_version.as_deref(), Some("6.11.0"));
        assert_eq!(report.missing_optional.len(), 1);
        assert!(report.missing_optional[0].ends_with("icon.ico"));
    }
}
