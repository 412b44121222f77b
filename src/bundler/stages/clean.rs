//! Removal of prior build output.
//!
//! Both workspaces are deleted recursively when present. Stale files matching
//! the configured glob patterns are deleted too, unless their file name is on
//! the preserve list. Absence is never an error.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Paths removed by a clean run.
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Directories and files that existed and were deleted.
    pub removed: Vec<PathBuf>,
}

/// Delete the build and dist workspaces if present.
///
/// Returns the directories that were actually removed.
pub async fn clean_workspaces(build_dir: &Path, dist_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in [build_dir, dist_dir] {
        if fs::remove_dir_all(dir).await? {
            log::debug!("Removed {}", dir.display());
            removed.push(dir.to_path_buf());
        }
    }
    Ok(removed)
}

/// Delete files under `root` matching any of `patterns`, keeping `preserve`d names.
///
/// Matches that resolve outside `root` are skipped, never deleted.
pub async fn clean_patterns(
    root: &Path,
    patterns: &[String],
    preserve: &[String],
) -> Result<Vec<PathBuf>> {
    let root = root
        .absolutize()
        .fs_context("resolving project directory", root)?
        .into_owned();
    let root_pattern = glob::Pattern::escape(&root.to_string_lossy());
    let mut removed = Vec::new();

    for pattern in patterns {
        let full = format!("{}/{}", root_pattern.trim_end_matches('/'), pattern);
        for entry in glob::glob(&full)? {
            let path = entry.map_err(|e| Error::Fs {
                context: "matching clean pattern",
                path: e.path().to_path_buf(),
                error: e.into(),
            })?;
            if !path.is_file() {
                continue;
            }
            let resolved = path
                .absolutize()
                .fs_context("resolving clean match", &path)?
                .into_owned();
            if !resolved.starts_with(&root) {
                log::warn!("Skipping {}: outside {}", resolved.display(), root.display());
                continue;
            }
            let keep = path
                .file_name()
                .map(|name| preserve.iter().any(|p| name == p.as_str()))
                .unwrap_or(false);
            if keep {
                log::debug!("Preserving {}", path.display());
                continue;
            }
            if fs::remove_file(&resolved).await? {
                removed.push(resolved);
            }
        }
    }
    Ok(removed)
}

/// Run the full clean stage for a build.
pub async fn clean(settings: &Settings) -> Result<CleanReport> {
    let mut removed = clean_workspaces(settings.build_dir(), settings.dist_dir()).await?;
    let clean = settings.clean();
    removed.extend(clean_patterns(settings.project_dir(), &clean.patterns, &clean.preserve).await?);
    Ok(CleanReport { removed })
}
