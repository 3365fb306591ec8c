//! Byte-level scanning primitives shared by the directive recognizers.
//!
//! A [`Cursor`] is a position in an immutable source string. It is `Copy`
//! and every scanning method takes it by value and returns a new cursor, so
//! a failed match simply drops the advanced copy: the caller still holds the
//! cursor it started with.

/// Line-structure bytes: newline, nul, tab and carriage return.
///
/// Space is not part of this set. The include path reader rejects exactly
/// these bytes, while token separation uses [`is_separator`].
pub const fn is_whitespace(c: u8) -> bool {
    matches!(c, b'\n' | b'\0' | b'\t' | b'\r')
}

/// [`is_whitespace`] plus the space character.
pub const fn is_separator(c: u8) -> bool {
    c == b' ' || is_whitespace(c)
}

/// Space or tab.
pub const fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t')
}

pub const fn is_numeric(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Bytes that can continue an identifier.
pub const fn is_identifier(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// A read position in shader source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor at byte offset `pos`, clamped to the end of `source`.
    ///
    /// `pos` must lie on a character boundary.
    pub fn new(source: &'a str, pos: usize) -> Self {
        Self {
            source,
            pos: pos.min(source.len()),
        }
    }

    pub fn pos(self) -> usize {
        self.pos
    }

    pub fn is_at_end(self) -> bool {
        self.pos >= self.source.len()
    }

    /// Byte under the cursor.
    pub fn peek(self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    /// Byte just before the cursor.
    pub fn prev(self) -> Option<u8> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.source.as_bytes().get(i).copied())
    }

    fn advance(self, n: usize) -> Self {
        Self::new(self.source, self.pos + n)
    }

    /// Advance past every [`is_whitespace`] byte, stopping at spaces.
    ///
    /// Skips line endings without eating indentation. No recognizer in this
    /// crate calls it: they separate tokens with [`Cursor::skip_separators`].
    pub fn skip_whitespace(self) -> Self {
        self.skip_while(is_whitespace)
    }

    /// Advance past every [`is_separator`] byte.
    pub fn skip_separators(self) -> Self {
        self.skip_while(is_separator)
    }

    fn skip_while(self, pred: impl Fn(u8) -> bool) -> Self {
        let skipped = self.source.as_bytes()[self.pos..]
            .iter()
            .take_while(|&&c| pred(c))
            .count();
        self.advance(skipped)
    }

    /// Consume `literal` if the source continues with it.
    ///
    /// Returns `None` on any mismatch, including running out of input.
    pub fn match_literal(self, literal: &str) -> Option<Self> {
        self.source.as_bytes()[self.pos..]
            .starts_with(literal.as_bytes())
            .then(|| self.advance(literal.len()))
    }

    /// Consume bytes up to, not including, the first one matching `stop`.
    ///
    /// Reaching the end of input ends the token normally. An embedded nul
    /// byte always aborts the read, even when `stop` would accept it. `stop`
    /// must only match ASCII bytes so the token is sliced on a character
    /// boundary.
    pub fn read_until(self, stop: impl Fn(u8) -> bool) -> Option<(&'a str, Self)> {
        let bytes = &self.source.as_bytes()[self.pos..];
        let mut len = 0;
        for &c in bytes {
            if c == b'\0' {
                return None;
            }
            if stop(c) {
                break;
            }
            len += 1;
        }
        let end = self.advance(len);
        Some((&self.source[self.pos..end.pos], end))
    }

    /// Consume a run of bytes matching `pred`. Never fails.
    pub fn take_while(self, pred: impl Fn(u8) -> bool) -> (&'a str, Self) {
        let end = self.skip_while(pred);
        (&self.source[self.pos..end.pos], end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b'\n', true)]
    #[case(b'\0', true)]
    #[case(b'\t', true)]
    #[case(b'\r', true)]
    #[case(b' ', false)]
    #[case(b'a', false)]
    fn whitespace_set(#[case] c: u8, #[case] expected: bool) {
        assert_eq!(is_whitespace(c), expected);
        assert!(is_separator(c) || !expected);
    }

    #[test]
    fn space_is_a_separator_only() {
        assert!(is_separator(b' '));
        assert!(!is_whitespace(b' '));
    }

    #[test]
    fn numeric_set() {
        assert!((b'0'..=b'9').all(is_numeric));
        assert!(!is_numeric(b'a'));
        assert!(!is_numeric(b'/'));
    }

    #[test]
    fn skip_whitespace_stops_at_space() {
        let c = Cursor::new("\n\t\r\0 x", 0).skip_whitespace();
        assert_eq!(c.pos(), 4);
        assert_eq!(c.skip_separators().pos(), 5);
    }

    #[test]
    fn skip_to_end() {
        let c = Cursor::new("\n\n", 0).skip_whitespace();
        assert!(c.is_at_end());
        assert_eq!(c.peek(), None);
    }

    #[test]
    fn match_literal_success_advances() {
        let start = Cursor::new("#include \"a\"", 0);
        let after = start.match_literal("#include").unwrap();
        assert_eq!(after.pos(), 8);
        assert_eq!(start.pos(), 0);
    }

    #[rstest]
    #[case::mismatch("#define X", "#include")]
    #[case::truncated("#inc", "#include")]
    #[case::empty("", "in")]
    fn match_literal_failure(#[case] source: &str, #[case] literal: &str) {
        assert_eq!(Cursor::new(source, 0).match_literal(literal), None);
    }

    #[test]
    fn read_until_stops_before_terminator() {
        let (token, c) = Cursor::new("vec3 pos;", 0).read_until(is_separator).unwrap();
        assert_eq!(token, "vec3");
        assert_eq!(c.peek(), Some(b' '));
    }

    #[test]
    fn read_until_runs_to_end() {
        let (token, c) = Cursor::new("pos", 0).read_until(|c| c == b';').unwrap();
        assert_eq!(token, "pos");
        assert!(c.is_at_end());
    }

    #[test]
    fn read_until_rejects_embedded_nul() {
        assert_eq!(Cursor::new("ve\0c3 pos", 0).read_until(is_separator), None);
    }

    #[test]
    fn nul_aborts_even_when_it_would_stop() {
        assert!(is_separator(b'\0'));
        assert_eq!(Cursor::new("ab\0cd", 0).read_until(is_separator), None);
        assert_eq!(Cursor::new("\0", 0).read_until(|c| c == b'\0'), None);
    }

    #[test]
    fn read_until_keeps_utf8_intact() {
        let (token, _) = Cursor::new("größe;", 0).read_until(|c| c == b';').unwrap();
        assert_eq!(token, "größe");
    }

    #[test]
    fn take_while_digits() {
        let (digits, c) = Cursor::new("12ab", 0).take_while(is_numeric);
        assert_eq!(digits, "12");
        assert_eq!(c.pos(), 2);
        let (none, c) = c.take_while(is_numeric);
        assert_eq!(none, "");
        assert_eq!(c.pos(), 2);
    }

    #[test]
    fn prev_byte() {
        assert_eq!(Cursor::new("ab", 0).prev(), None);
        assert_eq!(Cursor::new("ab", 1).prev(), Some(b'a'));
    }
}
