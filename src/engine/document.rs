//! Open document store
//!
//! Completion needs the live buffer text, not what is on disk, so every
//! open JavaScript document is mirrored here.

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

/// Manages open documents in the LSP session
#[derive(Debug, Default)]
pub struct DocumentManager {
    documents: DashMap<Url, DocumentState>,
}

/// State of an open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    pub version: i32,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    pub fn open(&self, uri: Url, content: String, version: i32) {
        self.documents
            .insert(uri, DocumentState { content, version });
    }

    /// Replace the full content of an open document.
    ///
    /// Stale versions are ignored so late notifications cannot roll the
    /// buffer back.
    pub fn update(&self, uri: &Url, content: String, version: i32) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            if version < doc.version {
                tracing::debug!(%uri, version, current = doc.version, "Ignoring stale change");
                return;
            }
            doc.content = content;
            doc.version = version;
        }
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn get_content(&self, uri: &Url) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.content.clone())
    }

    pub fn get(&self, uri: &Url) -> Option<DocumentState> {
        self.documents.get(uri).map(|doc| doc.clone())
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }
}
