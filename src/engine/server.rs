//! Generic LSP server implementation
//!
//! This server delegates to registered plugins based on file type.

use super::config::EngineConfig;
use super::convert;
use super::document::DocumentManager;
use super::text::LineIndex;
use crate::plugins::{CompletionRequest, PluginRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

/// Workspace state captured on initialize
#[derive(Debug, Clone, Default)]
struct Workspace {
    root: Option<PathBuf>,
    config: EngineConfig,
}

/// Generic Language Server
pub struct LspServer {
    /// LSP client for sending notifications
    client: Client,
    documents: DocumentManager,
    plugins: Arc<PluginRegistry>,
    workspace: RwLock<Workspace>,
}

impl LspServer {
    /// Create a new LSP server with the given plugins
    pub fn new(client: Client, plugins: PluginRegistry) -> Self {
        Self::with_config(client, plugins, EngineConfig::default())
    }

    /// Create with configuration
    pub fn with_config(client: Client, plugins: PluginRegistry, config: EngineConfig) -> Self {
        Self {
            client,
            documents: DocumentManager::new(),
            plugins: Arc::new(plugins),
            workspace: RwLock::new(Workspace { root: None, config }),
        }
    }

    /// Get server capabilities based on registered plugins
    pub fn capabilities(&self) -> ServerCapabilities {
        capabilities_for(&self.plugins)
    }
}

fn capabilities_for(plugins: &PluginRegistry) -> ServerCapabilities {
    let trigger_chars = plugins.all_trigger_characters();

    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                will_save: None,
                will_save_wait_until: None,
                save: None,
            },
        )),

        completion_provider: Some(CompletionOptions {
            trigger_characters: if trigger_chars.is_empty() {
                None
            } else {
                Some(trigger_chars)
            },
            resolve_provider: Some(true),
            work_done_progress_options: WorkDoneProgressOptions::default(),
            all_commit_characters: None,
            completion_item: None,
        }),

        ..ServerCapabilities::default()
    }
}

/// Workspace root from the initialize request
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    #[allow(deprecated)]
    let root_uri = params.root_uri.as_ref();

    root_uri
        .or_else(|| {
            params
                .workspace_folders
                .as_ref()
                .and_then(|folders| folders.first())
                .map(|folder| &folder.uri)
        })
        .and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = workspace_root(&params);
        let mut workspace = self.workspace.write().await;

        if let Some(root) = &root {
            tracing::info!("Workspace root: {}", root.display());
            if workspace.config.engine.workspace_discovery {
                workspace.config = EngineConfig::load_default(root);
            }
        } else {
            tracing::info!("No workspace root; local modules resolve from each file's directory");
        }
        workspace.root = root;

        let name = workspace.config.engine.name.clone();
        tracing::info!(
            log_level = %workspace.config.engine.log_level,
            "{} initializing",
            name
        );

        Ok(InitializeResult {
            capabilities: self.capabilities(),
            server_info: Some(ServerInfo {
                name,
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let name = self.workspace.read().await.config.engine.name.clone();
        tracing::info!("{} initialized", name);
        self.client
            .log_message(MessageType::INFO, format!("{} ready", name))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document opened: {}", uri);
        self.documents
            .open(uri, params.text_document.text, params.text_document.version);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the last change holds the whole document
        if let Some(change) = params.content_changes.into_iter().last() {
            self.documents.update(&uri, change.text, version);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document closed: {}", uri);
        self.documents.close(&uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(plugin) = self.plugins.plugin_for_uri(uri.as_str()).cloned() else {
            return Ok(None);
        };
        let Some(content) = self.documents.get_content(&uri) else {
            return Ok(None);
        };
        let Ok(file) = uri.to_file_path() else {
            tracing::debug!("Not a file URI: {}", uri);
            return Ok(None);
        };

        let workspace = self.workspace.read().await.clone();

        // Directory walks are blocking I/O
        let result = tokio::task::spawn_blocking(move || {
            let index = LineIndex::new(&content);
            let request = CompletionRequest {
                source: &content,
                offset: index.offset_at(position),
                file: &file,
                workspace_root: workspace.root.as_deref(),
                settings: &workspace.config.completion,
            };

            plugin
                .as_completion()
                .complete(&request)
                .iter()
                .map(|item| convert::to_lsp_completion(item, &index))
                .collect::<Vec<_>>()
        })
        .await;

        match result {
            Ok(items) if items.is_empty() => Ok(None),
            Ok(items) => Ok(Some(CompletionResponse::Array(items))),
            Err(e) => {
                tracing::warn!("Completion task failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        let Some(key) = convert::data_key(&item).map(str::to_string) else {
            return Ok(item);
        };

        let resolved = self
            .plugins
            .plugins()
            .iter()
            .find_map(|plugin| plugin.as_completion().resolve(&key));

        Ok(match resolved {
            Some(resolved) => convert::apply_resolved(item, &resolved),
            None => item,
        })
    }
}
