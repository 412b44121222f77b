//! Packager toggles and executable location.

/// How the packager lays out its output.
///
/// # Configuration
///
/// ```toml
/// mode = "onedir"  # or "onefile"
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleMode {
    /// Single self-extracting executable at `dist/<name>`.
    #[default]
    OneFile,

    /// Folder `dist/<name>/` holding the executable and its support files.
    OneDir,
}

/// Operating system the frozen executable is built for.
///
/// Only affects the artifact file name (`.exe` suffix); the packager itself
/// always builds for the host it runs on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Artifact name ends in `.exe`.
    Windows,

    /// Artifact name has no extension.
    Unix,

    /// Follow the host running the pipeline.
    #[default]
    Auto,
}

impl Target {
    /// Returns true when the artifact carries an `.exe` suffix.
    pub fn is_windows(self) -> bool {
        match self {
            Target::Windows => true,
            Target::Unix => false,
            Target::Auto => cfg!(windows),
        }
    }
}

/// Miscellaneous packager toggles written into the generated spec.
///
/// # Configuration
///
/// ```toml
/// [options]
/// strip = true
/// upx = false
/// console = true
/// optimize = 2
/// ```
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerOptions {
    /// Strip debug symbols from bundled binaries.
    ///
    /// Default: false
    pub strip: bool,

    /// Compress bundled binaries with UPX when available.
    ///
    /// Default: true
    pub upx: bool,

    /// Build a console application instead of a windowed one.
    ///
    /// Default: true
    pub console: bool,

    /// Bytecode optimization level (0, 1 or 2).
    ///
    /// Default: 0
    pub optimize: u8,

    /// Ask the packager to drop its cache before building.
    ///
    /// Default: true
    pub clean_cache: bool,
}

impl Default for PackagerOptions {
    fn default() -> Self {
        Self {
            strip: false,
            upx: true,
            console: true,
            optimize: 0,
            clean_cache: true,
        }
    }
}

/// External packager executable and extra arguments.
///
/// # Configuration
///
/// ```toml
/// [packager]
/// program = "pyinstaller"
/// args = ["--log-level", "WARN"]
/// ```
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerSettings {
    /// Program name looked up on `PATH`, or a path to it.
    ///
    /// Default: `pyinstaller`
    pub program: String,

    /// Arguments inserted before the spec file path.
    ///
    /// Default: Empty
    pub args: Vec<String>,
}

impl Default for PackagerSettings {
    fn default() -> Self {
        Self {
            program: "pyinstaller".to_string(),
            args: Vec::new(),
        }
    }
}
