//! Installed package discovery.
//!
//! Packages come from the closest `node_modules` directory above the
//! edited file. Only that one directory is listed, matching how the
//! resolver would find a bare specifier first.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// An installed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Specifier used to require it (`lodash`, `@babel/core`)
    pub name: String,
    /// `description` from its `package.json`
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    description: Option<String>,
}

/// Find the nearest readable `node_modules` for `file`.
///
/// Ancestors are searched from the file's directory upwards, never leaving
/// `workspace_root` when one is given.
pub fn find_node_modules(file: &Path, workspace_root: Option<&Path>) -> Option<PathBuf> {
    let dir = file.parent()?;

    for ancestor in dir.ancestors() {
        if let Some(root) = workspace_root {
            if !ancestor.starts_with(root) {
                break;
            }
        }

        let candidate = ancestor.join("node_modules");
        if candidate.is_dir() && fs::read_dir(&candidate).is_ok() {
            return Some(candidate);
        }
    }

    None
}

/// List packages installed next to `file`, sorted by name.
///
/// I/O errors are treated as an empty installation.
pub fn discover(file: &Path, workspace_root: Option<&Path>) -> Vec<Package> {
    let Some(node_modules) = find_node_modules(file, workspace_root) else {
        return Vec::new();
    };

    tracing::debug!("Listing packages in {}", node_modules.display());

    let mut packages = Vec::new();
    for name in list_dirs(&node_modules) {
        if name.starts_with('@') {
            let scope_dir = node_modules.join(&name);
            for inner in list_dirs(&scope_dir) {
                let qualified = format!("{}/{}", name, inner);
                packages.push(Package {
                    description: read_description(&scope_dir.join(&inner)),
                    name: qualified,
                });
            }
        } else {
            packages.push(Package {
                description: read_description(&node_modules.join(&name)),
                name,
            });
        }
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}

/// Names of visible subdirectories (symlinks followed)
fn list_dirs(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect()
}

fn read_description(package_dir: &Path) -> Option<String> {
    let manifest_path = package_dir.join("package.json");
    let content = fs::read_to_string(&manifest_path).ok()?;

    match serde_json::from_str::<PackageManifest>(&content) {
        Ok(manifest) => manifest.description.filter(|d| !d.is_empty()),
        Err(e) => {
            tracing::trace!("Invalid {}: {}", manifest_path.display(), e);
            None
        }
    }
}
