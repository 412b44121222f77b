//! grp-build - clean, package and verify the ROM patch tool executable.
//!
//! Exit code 0 means the artifact exists at the expected path, 1 means the
//! build failed or was misconfigured, 2 means the packager succeeded but no
//! artifact was produced.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match grp_build::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
