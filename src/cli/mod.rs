//! Command line interface for grp-build.
//!
//! Parses arguments, loads the build descriptor and runs the pipeline. The
//! returned code is the process exit status.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::Pipeline,
    error::{CliError, Result},
    metadata,
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    validate_args(&args).map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = create_runtime_config(&args);
    execute(&config).await
}

/// Load the descriptor named by `config` and run the build.
pub async fn execute(config: &RuntimeConfig) -> Result<i32> {
    let settings = metadata::load_settings(config.descriptor(), config.project_dir())?;
    config.verbose_println(&format!(
        "Descriptor: {} (project {})",
        config.descriptor().display(),
        settings.project_dir().display()
    ))?;

    let pipeline = Pipeline::new(settings, config.output().clone());
    let report = pipeline.run().await?;
    log::debug!("pipeline finished in state {}", report.state);
    for path in &report.missing_optional {
        config.verbose_println(&format!("Built without optional input {}", path.display()))?;
    }

    Ok(report.exit_code())
}

/// Validate arguments without executing (for testing)
pub fn validate_args(args: &Args) -> std::result::Result<(), String> {
    args.validate()
}

/// Create runtime configuration from arguments
pub fn create_runtime_config(args: &Args) -> RuntimeConfig {
    RuntimeConfig::from(args)
}
