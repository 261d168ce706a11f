//! Detects whether the cursor sits inside a `require()` string literal.

/// Call openers recognised before the typed text
const OPENERS: [&str; 3] = ["require(\"", "require('", "require(`"];

const QUOTES: [char; 3] = ['"', '\'', '`'];

/// Import string being typed at the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportContext {
    /// Text between the opening quote and the cursor
    pub typed: String,
    /// Byte offset of the first typed character
    pub start: usize,
}

/// Find the import string under the cursor, if any.
///
/// The cursor must be on the same line as the `require(` call, right
/// after the opening quote or after text that contains no further
/// quote, and directly in front of the matching closing quote.
pub fn detect(text: &str, offset: usize) -> Option<ImportContext> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }

    let before = &text[..offset];
    let call_start = OPENERS
        .iter()
        .filter_map(|opener| before.rfind(opener))
        .max()?;

    let quote_pos = call_start + "require(".len();
    let quote = text[quote_pos..].chars().next()?;

    let last_quote = before.rfind(QUOTES)?;
    if last_quote != quote_pos {
        return None;
    }

    if !text[offset..].starts_with(quote) {
        return None;
    }

    if before[call_start..].contains('\n') {
        return None;
    }

    let start = quote_pos + 1;
    Some(ImportContext {
        typed: text[start..offset].to_string(),
        start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Split `|` out of the fixture and use its position as the cursor
    fn at_cursor(fixture: &str) -> Option<ImportContext> {
        let offset = fixture.find('|').unwrap();
        let text = fixture.replacen('|', "", 1);
        detect(&text, offset)
    }

    #[test]
    fn test_empty_import() {
        let ctx = at_cursor("const fs = require('|');").unwrap();
        assert_eq!(ctx.typed, "");
        assert_eq!(ctx.start, 20);
    }

    #[test]
    fn test_partial_import() {
        let ctx = at_cursor("const a = require(\"./li|\");").unwrap();
        assert_eq!(ctx.typed, "./li");
        assert_eq!(ctx.start, 19);
    }

    #[test]
    fn test_backtick_import() {
        let ctx = at_cursor("require(`lod|`)").unwrap();
        assert_eq!(ctx.typed, "lod");
    }

    #[test]
    fn test_last_require_wins() {
        let ctx = at_cursor("require('fs'); require('pa|')").unwrap();
        assert_eq!(ctx.typed, "pa");
    }

    #[test]
    fn test_no_require() {
        assert!(at_cursor("const x = '|';").is_none());
    }

    #[test]
    fn test_too_short() {
        assert!(detect("req", 2).is_none());
    }

    #[test]
    fn test_cursor_after_closed_string() {
        assert!(at_cursor("require('fs') + '|'").is_none());
    }

    #[test]
    fn test_missing_closing_quote() {
        assert!(at_cursor("require('fs|").is_none());
    }

    #[test]
    fn test_mismatched_closing_quote() {
        assert!(at_cursor("require('fs|\")").is_none());
    }

    #[test]
    fn test_require_on_previous_line() {
        assert!(at_cursor("require('\n|'").is_none());
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(detect("require('')", 40).is_none());
    }

    #[test]
    fn test_offset_inside_multibyte_char() {
        assert!(detect("require('é')", 10).is_none());
    }
}
