//! Output artifact verification.
//!
//! Purely observational: checks that the expected executable exists and reads
//! its size and checksum. Never retries.

use crate::bundler::{
    VerifiedArtifact, builder::calculate_sha256, error::ErrorExt, error::Result,
};
use std::{io, path::Path};

/// Outcome of checking the expected artifact path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// A regular file exists at the path.
    Present(VerifiedArtifact),
    /// Nothing, or something other than a regular file, is at the path.
    Missing,
}

/// Check that the artifact exists and collect its metadata.
///
/// # Errors
///
/// Only IO failures other than "not found" are errors; a missing artifact is
/// [`Verification::Missing`].
pub async fn verify_artifact(path: &Path) -> Result<Verification> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("Artifact missing: {}", path.display());
            return Ok(Verification::Missing);
        }
        Err(e) => return Err(e).fs_context("reading artifact metadata", path),
    };

    if !metadata.is_file() {
        log::debug!("Artifact path is not a regular file: {}", path.display());
        return Ok(Verification::Missing);
    }

    let checksum = calculate_sha256(path).await?;
    Ok(Verification::Present(VerifiedArtifact {
        path: path.to_path_buf(),
        size: metadata.len(),
        checksum,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_artifact_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = verify_artifact(&dir.path().join("dist/A.exe")).await.unwrap();
        assert_eq!(result, Verification::Missing);
    }

    #[tokio::test]
    async fn directory_in_place_of_artifact_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.exe");
        std::fs::create_dir(&path).unwrap();
        assert_eq!(verify_artifact(&path).await.unwrap(), Verification::Missing);
    }

    #[tokio::test]
    async fn present_artifact_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.exe");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        match verify_artifact(&path).await.unwrap() {
            Verification::Present(artifact) => {
                assert_eq!(artifact.size, 2048);
                assert_eq!(artifact.path, path);
                assert_eq!(artifact.checksum.len(), 64);
            }
            Verification::Missing => panic!("artifact should be present"),
        }
    }
}
