//! External tool detection and availability checking.

use std::path::Path;

/// Query the packager's version with `<program> --version`.
///
/// Returns `None` when the program cannot run or reports failure; the
/// pipeline still proceeds, the version is informational.
pub async fn packager_version(program: &Path) -> Option<String> {
    match tokio::process::Command::new(program)
        .arg("--version")
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            log::info!("✓ packager available: {} {}", program.display(), version);
            Some(version)
        }
        Ok(output) => {
            log::warn!(
                "{} --version failed (exit code: {:?}). Stderr: {}",
                program.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
            None
        }
        Err(e) => {
            log::warn!(
                "{} found but failed to execute: {}. Check file permissions.",
                program.display(),
                e
            );
            None
        }
    }
}
