//! Packager spec generation.
//!
//! Renders the build descriptor into a PyInstaller `.spec` file using
//! Handlebars. All paths in the output are absolute so the packager can run
//! from any working directory.

use super::template::SPEC_TEMPLATE;
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{BundleMode, Settings},
};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct DataEntry {
    source: String,
    destination: String,
}

#[derive(Serialize)]
struct SpecContext {
    name: String,
    name_comment: String,
    version: Option<String>,
    entry: String,
    pathex: String,
    datas: Vec<DataEntry>,
    hidden_imports: Vec<String>,
    excludes: Vec<String>,
    icon: Option<String>,
    strip: &'static str,
    upx: &'static str,
    console: &'static str,
    optimize: u8,
    onedir: bool,
}

/// Quote a string as a Python single-quoted literal.
pub(crate) fn py_str(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

fn py_path(path: &Path) -> String {
    py_str(&path.display().to_string())
}

fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Render the spec file contents for the given settings.
///
/// The icon is only referenced when the file exists; a missing icon would
/// make the packager fail late, after a full analysis.
pub fn render_spec(settings: &Settings) -> Result<String> {
    let options = settings.options();

    let icon = settings
        .icon()
        .filter(|icon| icon.is_file())
        .map(py_path);

    let context = SpecContext {
        name: py_str(settings.name()),
        name_comment: settings.name().replace(['\n', '\r'], " "),
        version: settings.version().map(|v| v.replace(['\n', '\r'], " ")),
        entry: py_path(settings.entry()),
        pathex: py_path(settings.project_dir()),
        datas: settings
            .data()
            .iter()
            .map(|mapping| DataEntry {
                source: py_path(mapping.source()),
                destination: py_str(mapping.destination()),
            })
            .collect(),
        hidden_imports: settings.hidden_imports().iter().map(|m| py_str(m)).collect(),
        excludes: settings.excludes().iter().map(|m| py_str(m)).collect(),
        icon,
        strip: py_bool(options.strip),
        upx: py_bool(options.upx),
        console: py_bool(options.console),
        optimize: options.optimize,
        onedir: settings.mode() == BundleMode::OneDir,
    };

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("packager.spec", SPEC_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register spec template: {}", e)))?;

    Ok(handlebars.render("packager.spec", &context)?)
}

/// Generate the spec file inside the build directory.
///
/// # Returns
/// Path to the written `<name>.spec`
pub async fn generate_spec(settings: &Settings) -> Result<PathBuf> {
    let content = render_spec(settings)?;

    let build_dir = settings.build_dir();
    tokio::fs::create_dir_all(build_dir)
        .await
        .fs_context("creating build directory", build_dir)?;

    let spec_path = settings.spec_path();
    tokio::fs::write(&spec_path, content)
        .await
        .fs_context("writing packager spec", &spec_path)?;

    log::debug!("Wrote packager spec: {}", spec_path.display());
    Ok(spec_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{DataMapping, PackageSettings, PackagerOptions, SettingsBuilder};

    fn settings(root: &Path, mode: BundleMode) -> Settings {
        SettingsBuilder::new()
            .project_dir(root)
            .package_settings(PackageSettings {
                name: "GRP_v1.0.0".into(),
                version: Some("v1.0.0".into()),
                entry: "main.py".into(),
                icon: Some("assets/icon.ico".into()),
                data: vec![
                    DataMapping::new("Tools", "Tools"),
                    DataMapping::new("assets/agreement.txt", "assets"),
                ],
                hidden_imports: vec!["structlog".into(), "ctypes".into()],
                excludes: vec!["tkinter".into()],
            })
            .mode(mode)
            .options(PackagerOptions {
                strip: true,
                upx: false,
                console: true,
                optimize: 2,
                clean_cache: true,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn py_str_escapes_quotes_and_backslashes() {
        assert_eq!(py_str(r"C:\Tools\it's"), r"'C:\\Tools\\it\'s'");
        assert_eq!(py_str("a\nb"), r"'a\nb'");
    }

    #[test]
    fn onefile_spec_lists_every_input() {
        let root = tempfile::tempdir().unwrap();
        let spec = render_spec(&settings(root.path(), BundleMode::OneFile)).unwrap();

        assert!(spec.contains("'structlog',"), "{spec}");
        assert!(spec.contains("'ctypes',"));
        assert!(spec.contains("'tkinter',"));
        assert!(spec.contains("'Tools'),"));
        assert!(spec.contains("'assets'),"));
        assert!(spec.contains("name='GRP_v1.0.0',"));
        assert!(spec.contains("strip=True,"));
        assert!(spec.contains("upx=False,"));
        assert!(spec.contains("console=True,"));
        assert!(spec.contains("optimize=2,"));
        assert!(spec.contains("a.datas,"));
        assert!(!spec.contains("COLLECT("));
    }

    #[test]
    fn onedir_spec_collects_into_folder() {
        let root = tempfile::tempdir().unwrap();
        let spec = render_spec(&settings(root.path(), BundleMode::OneDir)).unwrap();

        assert!(spec.contains("exclude_binaries=True,"));
        assert!(spec.contains("coll = COLLECT("));
    }

    #[test]
    fn icon_is_referenced_only_when_present() {
        let root = tempfile::tempdir().unwrap();
        let spec = render_spec(&settings(root.path(), BundleMode::OneFile)).unwrap();
        assert!(!spec.contains("icon=["));

        std::fs::create_dir_all(root.path().join("assets")).unwrap();
        std::fs::write(root.path().join("assets/icon.ico"), b"ico").unwrap();
        let spec = render_spec(&settings(root.path(), BundleMode::OneFile)).unwrap();
        assert!(spec.contains("icon=["));
        assert!(spec.contains("icon.ico'"));
    }

    #[tokio::test]
    async fn generate_spec_writes_into_build_dir() {
        let root = tempfile::tempdir().unwrap();
        let settings = settings(root.path(), BundleMode::OneFile);

        let path = generate_spec(&settings).await.unwrap();

        assert_eq!(path, settings.spec_path());
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("# -*- mode: python"));
    }
}
