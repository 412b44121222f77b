//! PyInstaller spec template.
//!
//! Every value substituted here is already a Python literal (see
//! `script::py_str`), so the template is rendered without escaping.

pub const SPEC_TEMPLATE: &str = r#"# -*- mode: python ; coding: utf-8 -*-
# Generated by grp-build for {{name_comment}}{{#if version}} {{version}}{{/if}}. Do not edit.

a = Analysis(
    [{{entry}}],
    pathex=[{{pathex}}],
    binaries=[],
    datas=[
{{#each datas}}        ({{this.source}}, {{this.destination}}),
{{/each}}    ],
    hiddenimports=[
{{#each hidden_imports}}        {{this}},
{{/each}}    ],
    hookspath=[],
    hooksconfig={},
    runtime_hooks=[],
    excludes=[
{{#each excludes}}        {{this}},
{{/each}}    ],
    noarchive=False,
    optimize={{optimize}},
)
pyz = PYZ(a.pure)
{{#if onedir}}
exe = EXE(
    pyz,
    a.scripts,
    [],
    exclude_binaries=True,
    name={{name}},
    debug=False,
    bootloader_ignore_signals=False,
    strip={{strip}},
    upx={{upx}},
    console={{console}},
    disable_windowed_traceback=False,
    argv_emulation=False,
    target_arch=None,
    codesign_identity=None,
    entitlements_file=None,
{{#if icon}}    icon=[{{icon}}],
{{/if}})
coll = COLLECT(
    exe,
    a.binaries,
    a.datas,
    strip={{strip}},
    upx={{upx}},
    upx_exclude=[],
    name={{name}},
)
{{else}}
exe = EXE(
    pyz,
    a.scripts,
    a.binaries,
    a.datas,
    [],
    name={{name}},
    debug=False,
    bootloader_ignore_signals=False,
    strip={{strip}},
    upx={{upx}},
    upx_exclude=[],
    runtime_tmpdir=None,
    console={{console}},
    disable_windowed_traceback=False,
    argv_emulation=False,
    target_arch=None,
    codesign_identity=None,
    entitlements_file=None,
{{#if icon}}    icon=[{{icon}}],
{{/if}})
{{/if}}"#;
