//! Pipeline orchestration and coordination.
//!
//! This module provides the main [`Pipeline`] orchestrator that runs a build
//! from a clean workspace to a verified executable.
//!
//! # Overview
//!
//! The pipeline:
//! 1. Checks the packager and required inputs ([`preflight`])
//! 2. Removes prior build output
//! 3. Renders the spec and runs the packager
//! 4. Stages onedir output
//! 5. Verifies the artifact and calculates its checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Pipeline`] struct
//! - [`preflight`] - requirement checks
//! - [`tool_detection`] - packager version query

mod checksum;
mod orchestrator;
mod preflight;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::Pipeline;
pub use preflight::{PreflightReport, preflight};
pub use tool_detection::packager_version;
