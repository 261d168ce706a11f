//! Plugin system for require-lsp
//!
//! This module provides the plugin architecture that allows language
//! plugins to be registered with the LSP server.

pub mod registry;
pub mod require;
pub mod traits;

pub use registry::{FullPluginDyn, PluginRegistry};
pub use traits::{
    Completion, CompletionKind, CompletionProvider, CompletionRequest, LanguagePlugin, Span,
};
