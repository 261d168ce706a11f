//! Type conversions from plugin types to LSP types

use super::text::LineIndex;
use crate::plugins::{Completion, CompletionKind, Span};
use tower_lsp::lsp_types::{
    self, CompletionItem as LspCompletionItem, CompletionItemKind as LspCompletionItemKind,
    CompletionTextEdit, MarkupContent, MarkupKind, Range as LspRange, TextEdit,
};

/// Convert plugin completion to LSP completion item
///
/// When the plugin knows which text the item replaces, the item carries a
/// text edit over that range; otherwise clients fall back to `insert_text`.
pub fn to_lsp_completion(item: &Completion, index: &LineIndex<'_>) -> LspCompletionItem {
    LspCompletionItem {
        label: item.label.clone(),
        kind: Some(to_lsp_completion_kind(&item.kind)),
        detail: item.detail.clone(),
        documentation: to_lsp_documentation(item.documentation.as_deref()),
        insert_text: Some(item.insert_text.clone()),
        insert_text_format: Some(lsp_types::InsertTextFormat::PLAIN_TEXT),
        sort_text: item.sort_text.clone(),
        text_edit: item.replace.map(|span| {
            CompletionTextEdit::Edit(TextEdit {
                range: to_lsp_range(&span, index),
                new_text: item.label.clone(),
            })
        }),
        data: Some(serde_json::Value::String(item.data.clone())),
        ..Default::default()
    }
}

/// Copy the resolved fields onto an item the client sent back
pub fn apply_resolved(mut lsp_item: LspCompletionItem, item: &Completion) -> LspCompletionItem {
    lsp_item.detail = item.detail.clone();
    lsp_item.documentation = to_lsp_documentation(item.documentation.as_deref());
    lsp_item.insert_text = Some(item.insert_text.clone());
    lsp_item.sort_text = item.sort_text.clone();
    lsp_item
}

/// Key stored in the `data` field of an item
pub fn data_key(lsp_item: &LspCompletionItem) -> Option<&str> {
    lsp_item.data.as_ref()?.as_str()
}

fn to_lsp_documentation(doc: Option<&str>) -> Option<lsp_types::Documentation> {
    doc.filter(|d| !d.is_empty()).map(|doc| {
        lsp_types::Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: doc.to_string(),
        })
    })
}

/// Convert plugin completion kind to LSP completion kind
fn to_lsp_completion_kind(kind: &CompletionKind) -> LspCompletionItemKind {
    match kind {
        CompletionKind::Builtin => LspCompletionItemKind::MODULE,
        CompletionKind::Package => LspCompletionItemKind::MODULE,
        CompletionKind::File => LspCompletionItemKind::FILE,
    }
}

/// Convert a byte span to an LSP range
pub fn to_lsp_range(span: &Span, index: &LineIndex<'_>) -> LspRange {
    LspRange {
        start: index.position_at(span.start),
        end: index.position_at(span.end),
    }
}
