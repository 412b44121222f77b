//! Pipeline stages around the packager run.
//!
//! - [`clean`] - workspace and stale file removal
//! - [`stage`] - onedir extras and release folder rename
//! - [`verify`] - artifact existence, size and checksum

pub mod clean;
pub mod stage;
pub mod verify;

pub use clean::{CleanReport, clean, clean_patterns, clean_workspaces};
pub use stage::{StagingReport, copy_extras, rename_release};
pub use verify::{Verification, verify_artifact};
