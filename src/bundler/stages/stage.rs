//! Onedir output staging.
//!
//! After a onedir build the packager leaves `dist/<name>/`. This stage copies
//! the extra files the application reads at runtime next to the executable,
//! then renames the folder to its release name.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Name of the packager's support folder inside onedir output.
const SUPPORT_DIR: &str = "_internal";

/// Result of staging a onedir build.
#[derive(Debug, Default)]
pub struct StagingReport {
    /// Destination paths that were copied.
    pub copied: Vec<PathBuf>,
    /// Problems that did not stop the build.
    pub warnings: Vec<String>,
    /// Final folder holding the executable.
    pub release_dir: PathBuf,
}

/// Copy extra files and directories into `bundle_dir`.
///
/// A missing source or a failed copy is recorded as a warning. Existing
/// destination directories are replaced.
pub async fn copy_extras(
    bundle_dir: &Path,
    files: &[PathBuf],
    dirs: &[PathBuf],
) -> (Vec<PathBuf>, Vec<String>) {
    let mut copied = Vec::new();
    let mut warnings = Vec::new();

    for file in files {
        let Some(name) = file.file_name() else {
            warnings.push(format!("{} has no file name", file.display()));
            continue;
        };
        if !file.is_file() {
            warnings.push(format!("{} not found, not copied", file.display()));
            continue;
        }
        let dest = bundle_dir.join(name);
        match fs::copy_file(file, &dest).await {
            Ok(()) => copied.push(dest),
            Err(e) => warnings.push(format!("copying {} failed: {e}", file.display())),
        }
    }

    for dir in dirs {
        let Some(name) = dir.file_name() else {
            warnings.push(format!("{} has no directory name", dir.display()));
            continue;
        };
        if !dir.is_dir() {
            warnings.push(format!("{}/ not found, not copied", dir.display()));
            continue;
        }
        let dest = bundle_dir.join(name);
        let result = match fs::remove_dir_all(&dest).await {
            Ok(_) => fs::copy_dir(dir, &dest).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => copied.push(dest),
            Err(e) => warnings.push(format!("copying {}/ failed: {e}", dir.display())),
        }
    }

    (copied, warnings)
}

/// Rename `from` to `to`, replacing an existing `to`.
///
/// Returns `to`. Renaming a folder onto itself is a no-op.
pub async fn rename_release(from: &Path, to: &Path) -> Result<PathBuf> {
    if from == to {
        return Ok(to.to_path_buf());
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "output folder not found: {}",
            from.display()
        )));
    }
    fs::remove_dir_all(to).await?;
    tokio::fs::rename(from, to)
        .await
        .fs_context("renaming output folder", from)?;
    log::info!("Renamed {} to {}", from.display(), to.display());
    Ok(to.to_path_buf())
}

/// Mark the packager's support folder hidden so users see the executable first.
#[cfg(windows)]
async fn hide_support_dir(bundle_dir: &Path) -> Option<String> {
    let support = bundle_dir.join(SUPPORT_DIR);
    if !support.is_dir() {
        return None;
    }
    match tokio::process::Command::new("attrib")
        .arg("+h")
        .arg(&support)
        .output()
        .await
    {
        Ok(output) if output.status.success() => None,
        Ok(output) => Some(format!(
            "hiding {SUPPORT_DIR} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )),
        Err(e) => Some(format!("hiding {SUPPORT_DIR} failed: {e}")),
    }
}

#[cfg(not(windows))]
async fn hide_support_dir(bundle_dir: &Path) -> Option<String> {
    log::debug!(
        "Leaving {} visible; hidden attributes only apply on Windows",
        bundle_dir.join(SUPPORT_DIR).display()
    );
    None
}

/// Run the staging stage for a onedir build.
///
/// # Errors
///
/// Only a failed rename is fatal. Copy problems end up in
/// [`StagingReport::warnings`].
pub async fn stage(settings: &Settings) -> Result<StagingReport> {
    let bundle_dir = settings.bundle_dir();
    if !bundle_dir.is_dir() {
        return Err(Error::GenericError(format!(
            "output folder not found: {}",
            bundle_dir.display()
        )));
    }

    let staging = settings.staging();
    let (copied, mut warnings) =
        copy_extras(&bundle_dir, &staging.extra_files, &staging.extra_dirs).await;

    if let Some(warning) = hide_support_dir(&bundle_dir).await {
        warnings.push(warning);
    }

    let release_dir = rename_release(&bundle_dir, &settings.release_dir()).await?;

    Ok(StagingReport {
        copied,
        warnings,
        release_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copies_present_extras_and_warns_on_missing() {
        let root = tempfile::tempdir().unwrap();
        let bundle = root.path().join("dist/GRP");
        std::fs::create_dir_all(&bundle).unwrap();
        std::fs::write(root.path().join("agreement.txt"), b"terms").unwrap();
        std::fs::create_dir_all(root.path().join("Tools/Loader_File")).unwrap();
        std::fs::write(root.path().join("Tools/Loader_File/a.melf"), b"melf").unwrap();

        let (copied, warnings) = copy_extras(
            &bundle,
            &[root.path().join("agreement.txt"), root.path().join("missing.txt")],
            &[root.path().join("Tools")],
        )
        .await;

        assert_eq!(copied.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("missing.txt"));
        assert!(bundle.join("agreement.txt").is_file());
        assert!(bundle.join("Tools/Loader_File/a.melf").is_file());
    }

    #[tokio::test]
    async fn recopy_replaces_existing_directory() {
        let root = tempfile::tempdir().unwrap();
        let bundle = root.path().join("dist/GRP");
        std::fs::create_dir_all(bundle.join("Tools")).unwrap();
        std::fs::write(bundle.join("Tools/stale.bin"), b"old").unwrap();
        std::fs::create_dir_all(root.path().join("Tools")).unwrap();
        std::fs::write(root.path().join("Tools/fresh.bin"), b"new").unwrap();

        copy_extras(&bundle, &[], &[root.path().join("Tools")]).await;

        assert!(bundle.join("Tools/fresh.bin").exists());
        assert!(!bundle.join("Tools/stale.bin").exists());
    }

    #[tokio::test]
    async fn rename_replaces_previous_release() {
        let root = tempfile::tempdir().unwrap();
        let from = root.path().join("dist/GRP_v1.0.0");
        let to = root.path().join("dist/Global_ROM_Patcher");
        std::fs::create_dir_all(&from).unwrap();
        std::fs::write(from.join("GRP_v1.0.0.exe"), b"MZ").unwrap();
        std::fs::create_dir_all(&to).unwrap();
        std::fs::write(to.join("old.exe"), b"MZ").unwrap();

        let result = rename_release(&from, &to).await.unwrap();

        assert_eq!(result, to);
        assert!(!from.exists());
        assert!(to.join("GRP_v1.0.0.exe").exists());
        assert!(!to.join("old.exe").exists());
    }

    #[tokio::test]
    async fn rename_without_source_fails() {
        let root = tempfile::tempdir().unwrap();
        let err = rename_release(&root.path().join("a"), &root.path().join("b")).await;
        assert!(err.is_err());
    }
}
