//! Packager executable location.
//!
//! Bare program names are looked up on `PATH`; anything with a directory
//! component is taken relative to the project.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Locate the packager executable.
///
/// Returns the full path of the program to run.
pub fn locate_packager(program: &str, project_dir: &Path) -> Result<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        let path = project_dir.join(candidate);
        if !path.is_file() {
            crate::bail!("packager not found at {}", path.display());
        }
        return Ok(path);
    }

    which::which(program).map_err(|e| {
        Error::GenericError(format!(
            "{program} not found in PATH ({e}). Install it with: pip install pyinstaller"
        ))
    })
}
