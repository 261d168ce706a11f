//! Candidate filtering and insert text.

use crate::plugins::traits::{Completion, CompletionKind, Span};

/// Characters that end a word for the editor's default word replacement
const WORD_BREAKS: [char; 6] = ['.', '/', '\\', ':', '\'', '-'];

/// Whether `name` is a plausible completion of `typed`.
///
/// Any candidate containing the typed text matches. Relative paths also
/// match each other whenever the typed text itself is relative, so
/// `./` keeps offering every sibling.
pub fn matches(name: &str, typed: &str) -> bool {
    name.contains(typed) || (name.starts_with("./") && typed.starts_with("./"))
}

/// Trailing word of `text`, the part an editor replaces on accept
pub fn last_word(text: &str) -> &str {
    match text.rfind(WORD_BREAKS) {
        Some(idx) => &text[idx + 1..],
        None => text,
    }
}

/// Text to insert in place of the current word.
///
/// When the candidate extends what was typed, only the typed trailing
/// word plus the remainder is inserted; otherwise the whole name.
pub fn insert_text(name: &str, typed: &str) -> String {
    match name.strip_prefix(typed) {
        Some(rest) => format!("{}{}", last_word(typed), rest),
        None => name.to_string(),
    }
}

/// Key used to find an item again on resolve
pub fn data_key(kind: CompletionKind, name: &str) -> String {
    let prefix = match kind {
        CompletionKind::Builtin => "builtin",
        CompletionKind::Package => "package",
        CompletionKind::File => "file",
    };
    format!("{}:{}", prefix, name)
}

/// Build a completion for `name` if it matches the typed text
pub fn candidate(
    name: &str,
    kind: CompletionKind,
    typed: &str,
    replace: Span,
    documentation: Option<String>,
) -> Option<Completion> {
    if !matches(name, typed) {
        return None;
    }

    let insert_text = insert_text(name, typed);
    Some(Completion {
        label: name.to_string(),
        kind,
        detail: Some(name.to_string()),
        documentation,
        sort_text: (kind == CompletionKind::File).then(|| insert_text.clone()),
        insert_text,
        data: data_key(kind, name),
        replace: Some(replace),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: Span = Span { start: 9, end: 12 };

    #[test]
    fn test_matches_substring() {
        assert!(matches("lodash", "lod"));
        assert!(matches("lodash", "dash"));
        assert!(matches("lodash", ""));
        assert!(!matches("lodash", "express"));
    }

    #[test]
    fn test_matches_relative_siblings() {
        assert!(matches("./util.js", "./ma"));
        assert!(!matches("../util.js", "./ma"));
        assert!(matches("../util.js", "../"));
    }

    #[test]
    fn test_last_word() {
        assert_eq!(last_word("./lib/ut"), "ut");
        assert_eq!(last_word("lodash"), "lodash");
        assert_eq!(last_word("a:b"), "b");
        assert_eq!(last_word("./"), "");
        assert_eq!(last_word("..\\x"), "x");
        assert_eq!(last_word("lodash-e"), "e");
    }

    #[test]
    fn test_insert_text_extends_prefix() {
        assert_eq!(insert_text("./lib/util.js", "./lib/ut"), "util.js");
        assert_eq!(insert_text("lodash", "lod"), "lodash");
        assert_eq!(insert_text("./a.js", "./"), "a.js");
    }

    #[test]
    fn test_insert_text_after_hyphen() {
        assert_eq!(insert_text("lodash-es", "lodash-e"), "es");
        assert_eq!(insert_text("./date-fns.js", "./date-"), "fns.js");
    }

    #[test]
    fn test_insert_text_not_prefix() {
        assert_eq!(insert_text("./lib/util.js", "util"), "./lib/util.js");
    }

    #[test]
    fn test_candidate_file() {
        let item = candidate("./lib/util.js", CompletionKind::File, "./lib/", SPAN, None).unwrap();
        assert_eq!(item.label, "./lib/util.js");
        assert_eq!(item.detail.as_deref(), Some("./lib/util.js"));
        assert_eq!(item.insert_text, "util.js");
        assert_eq!(item.sort_text.as_deref(), Some("util.js"));
        assert_eq!(item.data, "file:./lib/util.js");
        assert_eq!(item.replace, Some(SPAN));
    }

    #[test]
    fn test_candidate_package_has_no_sort_text() {
        let item = candidate(
            "express",
            CompletionKind::Package,
            "ex",
            SPAN,
            Some("Web framework".to_string()),
        )
        .unwrap();
        assert!(item.sort_text.is_none());
        assert_eq!(item.documentation.as_deref(), Some("Web framework"));
        assert_eq!(item.data, "package:express");
    }

    #[test]
    fn test_candidate_rejected() {
        assert!(candidate("express", CompletionKind::Package, "koa", SPAN, None).is_none());
    }
}
