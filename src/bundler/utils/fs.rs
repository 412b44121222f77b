//! File system utilities for the build pipeline.
//!
//! Provides idempotent removal, file and tree copies with automatic parent
//! creation, and directory size totals.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Removes the directory and its contents if it exists.
///
/// Returns whether something was removed. A missing directory is not an error.
pub async fn remove_dir_all(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes a single file if it exists.
///
/// Returns whether something was removed.
pub async fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Symlinks are copied as the files they point to.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a Directory")));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating destination directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from).follow_links(true) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)
                    .fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Total size in bytes of all regular files below `path`.
pub async fn dir_size(path: &Path) -> Result<u64> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<u64> {
        let mut total = 0u64;
        for entry in walkdir::WalkDir::new(&path) {
            let entry = entry?;
            if entry.file_type().is_file() {
                total += entry.metadata()?.len();
            }
        }
        Ok(total)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory size task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("build");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested/file.txt"), b"x").unwrap();

        assert!(remove_dir_all(&dir).await.unwrap());
        assert!(!dir.exists());
        assert!(!remove_dir_all(&dir).await.unwrap());
    }

    #[tokio::test]
    async fn copy_dir_replicates_tree() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("Tools");
        std::fs::create_dir_all(src.join("platform-tools")).unwrap();
        std::fs::write(src.join("platform-tools/adb"), b"adb").unwrap();
        std::fs::write(src.join("avbtool.py"), b"print()").unwrap();

        let dst = root.path().join("dist/app/Tools");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read(dst.join("platform-tools/adb")).unwrap(), b"adb");
        assert_eq!(dir_size(&dst).await.unwrap(), 3 + 7);
    }

    #[tokio::test]
    async fn copy_file_rejects_directories() {
        let root = tempfile::tempdir().unwrap();
        let err = copy_file(root.path(), &root.path().join("copy")).await;
        assert!(err.is_err());
    }
}
