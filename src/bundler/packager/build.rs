//! Packager execution.
//!
//! Runs the packager on a generated spec and waits for it to exit. Output is
//! inherited so the packager's own progress shows up in the terminal.

use crate::bundler::{
    error::{Error, Result},
    settings::Settings,
};
use std::{
    ffi::OsString,
    path::Path,
    process::{ExitStatus, Stdio},
};

/// Build the packager argument list.
///
/// `--noconfirm [--clean] --distpath <dist> --workpath <build> [extra args] <spec>`
pub fn packager_args(settings: &Settings, spec_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--noconfirm".into()];
    if settings.options().clean_cache {
        args.push("--clean".into());
    }
    args.push("--distpath".into());
    args.push(settings.dist_dir().into());
    args.push("--workpath".into());
    args.push(settings.build_dir().into());
    args.extend(settings.packager().args.iter().map(OsString::from));
    args.push(spec_path.into());
    args
}

/// Render a command line for display.
pub fn display_command(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| {
            let part = part.to_string_lossy();
            if part.contains(' ') {
                format!("\"{part}\"")
            } else {
                part.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the packager and wait for it to exit.
///
/// # Errors
/// [`Error::CommandFailed`] when the process cannot be started. A non-zero
/// exit is not an error here; the caller decides from the returned status.
pub async fn run_packager(program: &Path, args: &[OsString], cwd: &Path) -> Result<ExitStatus> {
    log::info!("Running packager: {}", display_command(program, args));

    tokio::process::Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: display_command(program, args),
            error: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PackageSettings, PackagerOptions, PackagerSettings, SettingsBuilder};

    fn settings(root: &Path, clean_cache: bool) -> Settings {
        SettingsBuilder::new()
            .project_dir(root)
            .package_settings(PackageSettings {
                name: "A".into(),
                entry: "main.py".into(),
                ..Default::default()
            })
            .options(PackagerOptions {
                clean_cache,
                ..Default::default()
            })
            .packager(PackagerSettings {
                program: "pyinstaller".into(),
                args: vec!["--log-level".into(), "WARN".into()],
            })
            .build()
            .unwrap()
    }

    #[test]
    fn args_end_with_spec_path() {
        let root = tempfile::tempdir().unwrap();
        let settings = settings(root.path(), true);
        let spec = settings.spec_path();

        let args = packager_args(&settings, &spec);

        assert_eq!(args[0], "--noconfirm");
        assert_eq!(args[1], "--clean");
        assert_eq!(args[2], "--distpath");
        assert_eq!(args[3], settings.dist_dir().as_os_str());
        assert_eq!(args[5], settings.build_dir().as_os_str());
        assert_eq!(args[6], "--log-level");
        assert_eq!(args.last().unwrap(), spec.as_os_str());
    }

    #[test]
    fn clean_flag_follows_option() {
        let root = tempfile::tempdir().unwrap();
        let settings = settings(root.path(), false);
        let args = packager_args(&settings, &settings.spec_path());
        assert!(!args.iter().any(|a| a == "--clean"));
    }

    #[test]
    fn display_command_quotes_spaces() {
        let line = display_command(
            Path::new("pyinstaller"),
            &["--distpath".into(), "my dist".into()],
        );
        assert_eq!(line, "pyinstaller --distpath \"my dist\"");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_returned_not_raised() {
        let root = tempfile::tempdir().unwrap();
        let status = run_packager(Path::new("false"), &[], root.path()).await.unwrap();
        assert!(!status.success());
    }

    #[tokio::test]
    async fn missing_program_is_command_failed() {
        let root = tempfile::tempdir().unwrap();
        let err = run_packager(Path::new("/nonexistent/packager-3f9a"), &[], root.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
