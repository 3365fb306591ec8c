//! Vertex input attribute recognition.
//!
//! Recognizes declarations of the form
//!
//! ```glsl
//! in vec3 a_position; // SEM POSITION
//! in vec2 a_uv1;      // SEM TEXCOORD1
//! in vec4 a_extra;
//! ```
//!
//! The declared name is harvested whenever the declaration itself parses.
//! The trailing comment is optional; when it is absent, malformed or names an
//! unknown semantic, the attribute gets [`SemanticId::INVALID`].

use crate::scanner::{Cursor, is_blank, is_numeric, is_separator};
use crate::semantic::{SemanticId, SemanticTable};

const IN_KEYWORD: &str = "in";
const SEM_KEYWORD: &str = "SEM";

/// A harvested attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDecl<'a> {
    pub name: &'a str,
    pub semantic: SemanticId,
}

/// Try to read an attribute declaration starting at `cursor`, which should
/// be on an `i`.
///
/// Returns `None` when no attribute name could be read. Never consumes
/// input on behalf of the caller; the returned declaration borrows from the
/// source.
pub fn try_parse_attribute<'a>(
    cursor: Cursor<'a>,
    semantics: &SemanticTable,
) -> Option<AttributeDecl<'a>> {
    let cursor = cursor.match_literal(IN_KEYWORD)?;
    if !cursor.peek().is_some_and(is_blank) {
        return None;
    }

    let cursor = cursor.skip_separators();
    if cursor.is_at_end() {
        return None;
    }
    let (_ty, cursor) = cursor.read_until(is_separator)?;

    let cursor = cursor.skip_separators();
    if cursor.is_at_end() {
        return None;
    }
    let (name, cursor) = cursor.read_until(|c| c == b';' || is_separator(c))?;
    if name.is_empty() {
        return None;
    }

    let semantic = parse_semantic_comment(cursor, semantics).unwrap_or_else(|| {
        log::trace!("Attribute \"{name}\" has no semantic");
        SemanticId::INVALID
    });
    Some(AttributeDecl { name, semantic })
}

/// Parse `; // SEM NAME<index>` following an attribute name.
fn parse_semantic_comment(cursor: Cursor<'_>, semantics: &SemanticTable) -> Option<SemanticId> {
    let cursor = cursor.skip_separators();
    let cursor = cursor.match_literal(";").unwrap_or(cursor);

    let cursor = cursor.skip_separators().match_literal("//")?;
    let cursor = cursor.skip_separators().match_literal(SEM_KEYWORD)?;
    if !cursor.peek().is_some_and(is_blank) {
        return None;
    }

    let cursor = cursor.skip_separators();
    let (semantic_name, cursor) = cursor.read_until(|c| is_separator(c) || is_numeric(c))?;
    let role = semantics.lookup(semantic_name)?;

    let (digits, _) = cursor.take_while(is_numeric);
    let index = if digits.is_empty() {
        0
    } else {
        digits.parse().ok()?
    };

    SemanticId::new(role, index)
}
