//! `#include "path"` recognition.

use crate::scanner::{Cursor, is_whitespace};

const INCLUDE_KEYWORD: &str = "#include";

/// A recognized include directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeDirective<'a> {
    /// Path between the quotes, uninterpreted.
    pub path: &'a str,
    /// Byte offset just past the closing quote.
    pub end: usize,
}

/// Try to read an include directive starting at `cursor`, which should be
/// on a `#`.
///
/// Separators are allowed between the keyword and the opening quote. The
/// path may not contain newline, tab, carriage return or nul bytes and must
/// be closed on the same line. An empty path is not an include.
pub fn try_parse_include(cursor: Cursor<'_>) -> Option<IncludeDirective<'_>> {
    let cursor = cursor.match_literal(INCLUDE_KEYWORD)?;
    let cursor = cursor.skip_separators().match_literal("\"")?;

    let (path, cursor) = cursor.take_while(|c| c != b'"' && !is_whitespace(c));
    let cursor = cursor.match_literal("\"")?;
    if path.is_empty() {
        return None;
    }

    Some(IncludeDirective {
        path,
        end: cursor.pos(),
    })
}
