//! Configuration loading for the LSP engine
//!
//! Loads settings from YAML configuration files.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Main engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine settings
    pub engine: EngineSettings,
    /// Completion sources and traversal rules
    pub completion: CompletionSettings,
}

/// Core engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Server name
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Load configuration from the workspace root on initialize
    pub workspace_discovery: bool,
}

/// Settings that shape the candidate list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Offer Node.js core modules
    pub builtins: bool,
    /// Offer packages from the nearest `node_modules`
    pub node_modules: bool,
    /// Offer workspace files as relative paths
    pub local_modules: bool,
    /// File extensions (without the dot) offered as local modules
    pub extensions: Vec<String>,
    /// Directories whose name starts with one of these are not walked
    pub excluded_dir_prefixes: Vec<String>,
    /// Skip directories whose name starts with `.`
    pub skip_hidden: bool,
    /// Maximum depth of the workspace walk (unlimited when unset)
    pub max_depth: Option<usize>,
    /// Depth limit of the walk from a file's directory when no workspace is open
    pub unrooted_max_depth: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: "require-lsp".to_string(),
            log_level: "info".to_string(),
            workspace_discovery: true,
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            builtins: true,
            node_modules: true,
            local_modules: true,
            extensions: vec!["js".to_string(), "json".to_string()],
            excluded_dir_prefixes: vec![
                "node_modules".to_string(),
                "bower_components".to_string(),
            ],
            skip_hidden: true,
            max_depth: None,
            unrooted_max_depth: 3,
        }
    }
}

impl CompletionSettings {
    /// Depth limit for the local walk, tighter when no workspace is open
    pub fn walk_depth(&self, rooted: bool) -> Option<usize> {
        if rooted {
            return self.max_depth;
        }
        Some(
            self.max_depth
                .map_or(self.unrooted_max_depth, |depth| depth.min(self.unrooted_max_depth)),
        )
    }

    /// Whether a directory with this name should be descended into
    pub fn walks_dir(&self, name: &str) -> bool {
        if self.skip_hidden && name.starts_with('.') {
            return false;
        }
        !self
            .excluded_dir_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Whether a file with this name is offered as a local module
    pub fn accepts_file(&self, name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext.trim_start_matches('.'))))
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from default locations
    pub fn load_default(workspace_root: &Path) -> Self {
        let candidates = [
            workspace_root.join(".require-lsp.yaml"),
            workspace_root.join(".require-lsp.yml"),
            workspace_root.join("require-lsp.yaml"),
            workspace_root.join("require-lsp.yml"),
        ];

        for candidate in &candidates {
            if candidate.exists() {
                match Self::load(candidate) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("{}", e),
                }
            }
        }

        Self::default()
    }
}
