//! require() completion plugin
//!
//! Combines the three candidate sources in a fixed order: core modules,
//! installed packages, workspace files.

pub mod builtins;
pub mod context;
pub mod local;
pub mod matching;
pub mod node_modules;
pub mod relpath;

use crate::engine::config::CompletionSettings;
use crate::plugins::registry::FullPluginDyn;
use crate::plugins::traits::{
    Completion, CompletionKind, CompletionProvider, CompletionRequest, LanguagePlugin, Span,
};
use builtins::{BuiltinCatalog, CatalogError};
use context::ImportContext;
use dashmap::DashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Sources whose results depend on the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Source {
    Packages,
    Local,
}

/// Last answer of one source, reused while the request is unchanged
#[derive(Debug, Clone)]
struct Memo {
    file: PathBuf,
    workspace_root: Option<PathBuf>,
    typed: String,
    replace: Span,
    settings: CompletionSettings,
    items: Vec<Completion>,
}

impl Memo {
    fn answers(
        &self,
        request: &CompletionRequest<'_>,
        ctx: &ImportContext,
        replace: Span,
    ) -> bool {
        self.file.as_path() == request.file
            && self.workspace_root.as_deref() == request.workspace_root
            && self.typed == ctx.typed
            && self.replace == replace
            && &self.settings == request.settings
    }
}

/// JavaScript `require()` completion
pub struct RequirePlugin {
    catalog: BuiltinCatalog,
    memo: DashMap<Source, Memo>,
    /// Full items from the latest request, keyed by `data`.
    /// Replaced as a whole so readers never see a half-built table.
    resolved: RwLock<HashMap<String, Completion>>,
}

impl RequirePlugin {
    /// Create the plugin with the embedded core module catalog
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self::with_catalog(BuiltinCatalog::embedded()?))
    }

    pub fn with_catalog(catalog: BuiltinCatalog) -> Self {
        Self {
            catalog,
            memo: DashMap::new(),
            resolved: RwLock::new(HashMap::new()),
        }
    }

    fn builtin_items(&self, ctx: &ImportContext, replace: Span) -> Vec<Completion> {
        // Core modules are never relative
        if ctx.typed.starts_with('.') {
            return Vec::new();
        }

        self.catalog
            .iter()
            .map(|module| Completion {
                label: module.name.clone(),
                kind: CompletionKind::Builtin,
                detail: Some(module.detail_label().to_string()),
                documentation: Some(module.description.clone()),
                insert_text: matching::insert_text(&module.name, &ctx.typed),
                sort_text: None,
                data: matching::data_key(CompletionKind::Builtin, &module.name),
                replace: Some(replace),
            })
            .collect()
    }

    fn package_items(
        &self,
        request: &CompletionRequest<'_>,
        ctx: &ImportContext,
        replace: Span,
    ) -> Vec<Completion> {
        if ctx.typed.starts_with('.') {
            return Vec::new();
        }

        self.memoized(Source::Packages, request, ctx, replace, || {
            node_modules::discover(request.file, request.workspace_root)
                .into_iter()
                .filter_map(|package| {
                    matching::candidate(
                        &package.name,
                        CompletionKind::Package,
                        &ctx.typed,
                        replace,
                        package.description,
                    )
                })
                .collect()
        })
    }

    fn local_items(
        &self,
        request: &CompletionRequest<'_>,
        ctx: &ImportContext,
        replace: Span,
    ) -> Vec<Completion> {
        self.memoized(Source::Local, request, ctx, replace, || {
            local::discover(request.file, request.workspace_root, request.settings)
                .iter()
                .filter_map(|specifier| {
                    matching::candidate(
                        specifier,
                        CompletionKind::File,
                        &ctx.typed,
                        replace,
                        None,
                    )
                })
                .collect()
        })
    }

    fn memoized(
        &self,
        source: Source,
        request: &CompletionRequest<'_>,
        ctx: &ImportContext,
        replace: Span,
        compute: impl FnOnce() -> Vec<Completion>,
    ) -> Vec<Completion> {
        if let Some(memo) = self.memo.get(&source) {
            if memo.answers(request, ctx, replace) {
                tracing::trace!(?source, "Reusing previous candidates");
                return memo.items.clone();
            }
        }

        let items = compute();
        tracing::debug!(
            ?source,
            count = items.len(),
            typed = %ctx.typed,
            "Computed candidates"
        );

        self.memo.insert(
            source,
            Memo {
                file: request.file.to_path_buf(),
                workspace_root: request.workspace_root.map(Path::to_path_buf),
                typed: ctx.typed.clone(),
                replace,
                settings: request.settings.clone(),
                items: items.clone(),
            },
        );
        items
    }
}

impl LanguagePlugin for RequirePlugin {
    fn name(&self) -> &str {
        "require"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".js", ".mjs", ".cjs", ".jsx"]
    }

    fn trigger_characters(&self) -> &[char] {
        &['"', '\'', '`', '/', '.']
    }
}

impl CompletionProvider for RequirePlugin {
    fn complete(&self, request: &CompletionRequest<'_>) -> Vec<Completion> {
        let Some(ctx) = context::detect(request.source, request.offset) else {
            return Vec::new();
        };
        let replace = Span {
            start: ctx.start,
            end: request.offset,
        };

        let settings = request.settings;
        let mut items = Vec::new();
        if settings.builtins {
            items.extend(self.builtin_items(&ctx, replace));
        }
        if settings.node_modules {
            items.extend(self.package_items(request, &ctx, replace));
        }
        if settings.local_modules {
            items.extend(self.local_items(request, &ctx, replace));
        }

        let table: HashMap<String, Completion> = items
            .iter()
            .map(|item| (item.data.clone(), item.clone()))
            .collect();
        *self
            .resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner) = table;

        // Detail and documentation are filled in on resolve
        items
            .into_iter()
            .map(|item| Completion {
                detail: None,
                documentation: None,
                ..item
            })
            .collect()
    }

    fn resolve(&self, data: &str) -> Option<Completion> {
        let table = self.resolved.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(item) = table.get(data) {
            return Some(item.clone());
        }
        drop(table);

        // Core modules stay resolvable across requests
        let name = data.strip_prefix("builtin:")?;
        let module = self.catalog.get(name)?;
        Some(Completion {
            label: module.name.clone(),
            kind: CompletionKind::Builtin,
            detail: Some(module.detail_label().to_string()),
            documentation: Some(module.description.clone()),
            insert_text: module.name.clone(),
            sort_text: None,
            data: data.to_string(),
            replace: None,
        })
    }
}

impl FullPluginDyn for RequirePlugin {
    fn as_language(&self) -> &dyn LanguagePlugin {
        self
    }

    fn as_completion(&self) -> &dyn CompletionProvider {
        self
    }
}
