//! Command line argument parsing and validation.

use crate::metadata::DEFAULT_DESCRIPTOR;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Clean, package and verify the ROM patch tool executable
#[derive(Parser, Debug)]
#[command(
    name = "grp-build",
    version,
    about = "Clean, package and verify the ROM patch tool executable",
    long_about = "Deletes the previous build/ and dist/ workspaces, renders a PyInstaller spec
from grp-build.toml, runs the packager and checks that the executable exists.

Usage:
  grp-build
  grp-build --descriptor ./packaging/grp-build.toml
  grp-build --project-dir ../rom-patcher --quiet

Exit code 0 = artifact exists at the expected path.
Exit code 1 = build failed or configuration error.
Exit code 2 = packager succeeded but no artifact was produced."
)]
pub struct Args {
    /// Build descriptor file
    #[arg(
        short = 'd',
        long,
        value_name = "PATH",
        env = "GRP_BUILD_DESCRIPTOR",
        default_value = DEFAULT_DESCRIPTOR
    )]
    pub descriptor: PathBuf,

    /// Project directory that relative descriptor paths resolve against
    ///
    /// Defaults to the directory containing the descriptor.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print packager details and extra diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose {
            return Err("--quiet and --verbose cannot be used together".to_string());
        }

        if self.descriptor.as_os_str().is_empty() {
            return Err("Descriptor path cannot be empty".to_string());
        }

        if let Some(dir) = &self.project_dir
            && !dir.is_dir()
        {
            return Err(format!(
                "Project directory does not exist: {}",
                dir.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    descriptor: PathBuf,
    project_dir: Option<PathBuf>,
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output =
            super::OutputManager::new(args.verbose, args.quiet).with_color(!args.no_color);

        Self {
            descriptor: args.descriptor.clone(),
            project_dir: args.project_dir.clone(),
            output,
        }
    }
}

impl RuntimeConfig {
    /// Descriptor file to load
    pub fn descriptor(&self) -> &Path {
        &self.descriptor
    }

    /// Explicit project directory, if one was given
    pub fn project_dir(&self) -> Option<&Path> {
        self.project_dir.as_deref()
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_no_flags() {
        let args = Args::try_parse_from(["grp-build"]).unwrap();

        assert_eq!(args.descriptor, PathBuf::from(DEFAULT_DESCRIPTOR));
        assert!(args.project_dir.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let args = Args::try_parse_from(["grp-build", "-q", "-v"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn runtime_config_carries_output_mode() {
        let args = Args::try_parse_from(["grp-build", "--quiet", "--no-color"]).unwrap();
        let config = RuntimeConfig::from(&args);

        assert!(config.output().is_quiet());
        assert!(!config.output().is_verbose());
        assert_eq!(config.descriptor(), Path::new(DEFAULT_DESCRIPTOR));
    }

    #[test]
    fn missing_project_dir_is_rejected() {
        let args =
            Args::try_parse_from(["grp-build", "-C", "/definitely/not/a/real/dir"]).unwrap();
        assert!(args.validate().is_err());
    }
}
