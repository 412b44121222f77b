//! Configuration structures for the build pipeline.
//!
//! This module holds the validated form of the build descriptor: what the
//! packager analyzes, how it freezes, what gets cleaned, and how the output
//! folder is staged afterwards.

mod builder;
mod clean;
mod core;
mod options;
mod package;
mod staging;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use clean::CleanSettings;
pub use core::Settings;
pub use options::{BundleMode, PackagerOptions, PackagerSettings, Target};
pub use package::{DataMapping, PackageSettings};
pub use staging::StagingSettings;
