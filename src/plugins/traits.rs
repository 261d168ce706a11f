//! Plugin trait definitions
//!
//! These traits define the interface that language plugins implement to
//! provide completion.

use crate::engine::config::CompletionSettings;
use std::path::Path;

/// Completion item returned by plugins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: Option<String>,
    pub documentation: Option<String>,
    pub insert_text: String,
    pub sort_text: Option<String>,
    /// Key handed back by the client on `completionItem/resolve`
    pub data: String,
    /// Byte span of the source text the item replaces
    pub replace: Option<Span>,
}

/// Kind of completion item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// Runtime core module
    Builtin,
    /// Installed package
    Package,
    /// Workspace source file
    File,
}

/// Half-open byte range in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Everything a plugin needs to answer one completion request
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// Live buffer text
    pub source: &'a str,
    /// Byte offset of the cursor in `source`
    pub offset: usize,
    /// Path of the document on disk
    pub file: &'a Path,
    /// Workspace root, when the client opened a folder
    pub workspace_root: Option<&'a Path>,
    pub settings: &'a CompletionSettings,
}

/// Core plugin trait - provides metadata about the plugin
pub trait LanguagePlugin: Send + Sync {
    fn name(&self) -> &str;

    /// File extensions this plugin handles (e.g., [".js", ".mjs"])
    fn file_extensions(&self) -> &[&str];

    /// Characters that trigger completion
    fn trigger_characters(&self) -> &[char];
}

/// Provides code completion
pub trait CompletionProvider: Send + Sync {
    fn complete(&self, request: &CompletionRequest<'_>) -> Vec<Completion>;

    /// Look up the full item for a key previously returned in `data`
    fn resolve(&self, data: &str) -> Option<Completion>;
}
