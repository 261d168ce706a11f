//! End-to-end completion over a temporary JavaScript project.

use require_lsp::engine::config::CompletionSettings;
use require_lsp::engine::convert;
use require_lsp::plugins::{CompletionKind, CompletionProvider, CompletionRequest};
use require_lsp::engine::LineIndex;
use require_lsp::{EngineConfig, PluginRegistry, RequirePlugin};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower_lsp::lsp_types::{CompletionItemKind, CompletionTextEdit, Position};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "package.json", r#"{"name": "demo"}"#);
    write(root, "src/server.js", "");
    write(root, "src/routes/users.js", "");
    write(root, "src/routes/posts.js", "");
    write(root, "lib/logger.js", "");
    write(
        root,
        "node_modules/express/package.json",
        r#"{"description": "Fast, unopinionated, minimalist web framework"}"#,
    );
    write(root, "node_modules/@types/node/package.json", "{}");
    write(root, "node_modules/express/lib/router.js", "");
    write(root, ".cache/stale.js", "");
    temp
}

fn complete(
    plugin: &RequirePlugin,
    fixture: &str,
    file: &Path,
    root: &Path,
    settings: &CompletionSettings,
) -> Vec<require_lsp::plugins::Completion> {
    let offset = fixture.find('|').unwrap();
    let source = fixture.replacen('|', "", 1);
    plugin.complete(&CompletionRequest {
        source: &source,
        offset,
        file,
        workspace_root: Some(root),
        settings,
    })
}

#[test]
fn test_bare_specifier_mixes_all_sources() {
    let temp = project();
    let root = temp.path();
    let file = root.join("src").join("routes").join("users.js");
    let plugin = RequirePlugin::new().unwrap();

    let items = complete(
        &plugin,
        "const x = require('ex|');",
        &file,
        root,
        &CompletionSettings::default(),
    );

    let builtins = items
        .iter()
        .filter(|i| i.kind == CompletionKind::Builtin)
        .count();
    assert_eq!(builtins, 33);

    let packages: Vec<_> = items
        .iter()
        .filter(|i| i.kind == CompletionKind::Package)
        .map(|i| i.label.as_str())
        .collect();
    assert_eq!(packages, vec!["express"]);

    // No local file contains "ex"
    assert!(items.iter().all(|i| i.kind != CompletionKind::File));
}

#[test]
fn test_relative_specifier_lists_workspace_files() {
    let temp = project();
    let root = temp.path();
    let file = root.join("src").join("routes").join("users.js");
    let plugin = RequirePlugin::new().unwrap();

    let items = complete(
        &plugin,
        "require('./|')",
        &file,
        root,
        &CompletionSettings::default(),
    );
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();

    // "../" contains "./", so parent paths match too
    assert_eq!(
        labels,
        vec![
            "../../lib/logger.js",
            "../../package.json",
            "./posts.js",
            "../server.js",
        ]
    );

    let items = complete(
        &plugin,
        "require('../|')",
        &file,
        root,
        &CompletionSettings::default(),
    );
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["../../lib/logger.js", "../../package.json", "../server.js"]
    );
}

#[test]
fn test_lsp_items_replace_typed_text() {
    let temp = project();
    let root = temp.path();
    let file = root.join("src").join("server.js");
    let plugin = RequirePlugin::new().unwrap();

    let fixture = "const log = require('../lib/lo|');";
    let items = complete(&plugin, fixture, &file, root, &CompletionSettings::default());
    assert_eq!(items.len(), 1);

    let source = fixture.replacen('|', "", 1);
    let index = LineIndex::new(&source);
    let lsp = convert::to_lsp_completion(&items[0], &index);

    assert_eq!(lsp.kind, Some(CompletionItemKind::FILE));
    assert_eq!(lsp.insert_text.as_deref(), Some("logger.js"));
    match lsp.text_edit {
        Some(CompletionTextEdit::Edit(edit)) => {
            assert_eq!(edit.new_text, "../lib/logger.js");
            assert_eq!(edit.range.start, Position { line: 0, character: 21 });
            assert_eq!(edit.range.end, Position { line: 0, character: 30 });
        }
        other => panic!("unexpected text edit: {:?}", other),
    }

    let resolved = plugin.resolve(&items[0].data).unwrap();
    assert_eq!(resolved.detail.as_deref(), Some("../lib/logger.js"));
}

#[test]
fn test_package_documentation_on_resolve() {
    let temp = project();
    let root = temp.path();
    let file = root.join("src").join("server.js");
    let plugin = RequirePlugin::new().unwrap();

    let items = complete(
        &plugin,
        "require('@ty|')",
        &file,
        root,
        &CompletionSettings::default(),
    );
    let scoped = items.iter().find(|i| i.label == "@types/node").unwrap();
    assert!(scoped.documentation.is_none());

    let items = complete(
        &plugin,
        "require('expr|')",
        &file,
        root,
        &CompletionSettings::default(),
    );
    let express = items.iter().find(|i| i.label == "express").unwrap();
    let resolved = plugin.resolve(&express.data).unwrap();
    assert_eq!(
        resolved.documentation.as_deref(),
        Some("Fast, unopinionated, minimalist web framework")
    );
}

#[test]
fn test_workspace_config_controls_sources() {
    let temp = project();
    let root = temp.path();
    write(
        root,
        ".require-lsp.yaml",
        "completion:\n  builtins: false\n  node_modules: false\n",
    );

    let config = EngineConfig::load_default(root);
    let plugin = RequirePlugin::new().unwrap();
    let items = complete(
        &plugin,
        "require('s|')",
        &root.join("lib").join("logger.js"),
        root,
        &config.completion,
    );

    assert!(items.iter().all(|i| i.kind == CompletionKind::File));
    let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "../package.json",
            "../src/routes/posts.js",
            "../src/routes/users.js",
            "../src/server.js",
        ]
    );
}

#[test]
fn test_registry_routes_javascript_only() {
    let mut registry = PluginRegistry::new();
    registry.register(RequirePlugin::new().unwrap());

    assert!(registry.plugin_for_uri("file:///p/a.js").is_some());
    assert!(registry.plugin_for_uri("file:///p/a.cjs").is_some());
    assert!(registry.plugin_for_uri("file:///p/a.ts").is_none());
}
