//! Plugin registry
//!
//! Manages plugin registration and routing requests to appropriate plugins
//! based on file extensions.

use super::traits::{CompletionProvider, LanguagePlugin};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Registry of language plugins
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn FullPluginDyn>>,
    /// Map from lowercase file extension to plugin index
    extension_map: HashMap<String, usize>,
}

/// A plugin that provides both language metadata and completions
pub trait FullPluginDyn: Send + Sync {
    fn as_language(&self) -> &dyn LanguagePlugin;
    fn as_completion(&self) -> &dyn CompletionProvider;
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            extension_map: HashMap::new(),
        }
    }

    pub fn register<P: FullPluginDyn + 'static>(&mut self, plugin: P) {
        let idx = self.plugins.len();
        let plugin = Arc::new(plugin);

        for ext in plugin.as_language().file_extensions() {
            let ext = ext.trim_start_matches('.');
            self.extension_map.insert(ext.to_lowercase(), idx);
        }

        tracing::debug!("Registered plugin {}", plugin.as_language().name());
        self.plugins.push(plugin);
    }

    /// Get plugin for a file path
    pub fn plugin_for_path(&self, path: &Path) -> Option<&Arc<dyn FullPluginDyn>> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        let idx = self.extension_map.get(&ext)?;
        self.plugins.get(*idx)
    }

    /// Get plugin for a URI string
    pub fn plugin_for_uri(&self, uri: &str) -> Option<&Arc<dyn FullPluginDyn>> {
        let path = uri.split(['?', '#']).next()?;
        let name = path.rsplit('/').next()?;
        let (_, ext) = name.rsplit_once('.')?;
        let idx = self.extension_map.get(&ext.to_lowercase())?;
        self.plugins.get(*idx)
    }

    pub fn plugins(&self) -> &[Arc<dyn FullPluginDyn>] {
        &self.plugins
    }

    /// Get combined trigger characters from all plugins
    pub fn all_trigger_characters(&self) -> Vec<String> {
        let mut chars: Vec<char> = self
            .plugins
            .iter()
            .flat_map(|p| p.as_language().trigger_characters().to_vec())
            .collect();
        chars.sort();
        chars.dedup();
        chars.into_iter().map(|c| c.to_string()).collect()
    }

    /// Check if any plugin handles the given extension
    pub fn supports_extension(&self, ext: &str) -> bool {
        self.extension_map
            .contains_key(&ext.trim_start_matches('.').to_lowercase())
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
