//! Language server for `require()` path completion
//!
//! Suggests module names while typing the string argument of a
//! `require("...")` call in JavaScript files. Candidates come from three
//! places:
//!
//! - Node.js core modules (`fs`, `path`, ...)
//! - Packages installed in the nearest ancestor `node_modules`
//! - Source files elsewhere in the workspace, as relative paths
//!
//! # Architecture
//!
//! - **Engine**: Generic LSP server that delegates to plugins
//! - **Plugins**: Language-specific implementations (the `require` plugin)
//! - **Config**: YAML-based configuration
//!
//! # Usage
//!
//! Run the language server via stdio:
//!
//! ```bash
//! require-lsp
//! ```
//!
//! # Configuration
//!
//! Create a `.require-lsp.yaml` in your workspace root:
//!
//! ```yaml
//! engine:
//!   log_level: debug
//!
//! completion:
//!   extensions: [js, json, mjs]
//!   excluded_dir_prefixes: [node_modules, bower_components, dist]
//!   max_depth: 8
//! ```

pub mod engine;
pub mod plugins;

pub use engine::{DocumentManager, EngineConfig, LspServer};
pub use plugins::require::RequirePlugin;
pub use plugins::PluginRegistry;
