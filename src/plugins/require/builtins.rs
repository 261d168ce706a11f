//! Node.js core module catalog.
//!
//! The catalog ships inside the binary as YAML so it can be edited
//! without touching code.

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_CATALOG: &str = include_str!("../../../data/builtins.yaml");

/// Errors that can occur when loading the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse builtin module catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Builtin module catalog is empty")]
    Empty,
}

/// A core module and its one-line summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuiltinModule {
    pub name: String,
    pub description: String,
    /// Short label shown next to the name, when it differs from the name
    #[serde(default)]
    pub detail: Option<String>,
}

impl BuiltinModule {
    /// Label for the completion detail field
    pub fn detail_label(&self) -> &str {
        self.detail.as_deref().unwrap_or(&self.name)
    }
}

/// All core modules, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct BuiltinCatalog {
    modules: Vec<BuiltinModule>,
}

impl BuiltinCatalog {
    /// Load the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::parse(EMBEDDED_CATALOG)
    }

    /// Parse a catalog from YAML text.
    pub fn parse(yaml: &str) -> Result<Self, CatalogError> {
        let modules: Vec<BuiltinModule> = serde_yaml::from_str(yaml)?;
        if modules.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { modules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltinModule> {
        self.modules.iter()
    }

    pub fn get(&self, name: &str) -> Option<&BuiltinModule> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
