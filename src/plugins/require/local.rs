//! Workspace source file discovery.
//!
//! Walks the workspace and turns every accepted file into an import
//! specifier relative to the edited file.

use super::relpath::import_specifier;
use crate::engine::config::CompletionSettings;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Import specifiers for every local module reachable from `file`.
///
/// Walks `workspace_root`, or the file's own directory (depth limited)
/// when no workspace is open. Unreadable entries are skipped and the
/// edited file is never offered.
pub fn discover(
    file: &Path,
    workspace_root: Option<&Path>,
    settings: &CompletionSettings,
) -> Vec<String> {
    let Some(from_dir) = file.parent() else {
        return Vec::new();
    };
    let walk_root = workspace_root.unwrap_or(from_dir);

    let mut walker = WalkDir::new(walk_root).follow_links(true).sort_by_file_name();
    if let Some(depth) = settings.walk_depth(workspace_root.is_some()) {
        walker = walker.max_depth(depth);
    }

    walker
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || walks(entry, settings)
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::trace!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path() != file)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| settings.accepts_file(name))
                .unwrap_or(false)
        })
        .filter_map(|entry| import_specifier(from_dir, entry.path()))
        .collect()
}

fn walks(entry: &DirEntry, settings: &CompletionSettings) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| settings.walks_dir(name))
        .unwrap_or(false)
}
