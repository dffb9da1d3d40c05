//! Character cursor over source text.

use crate::source::SourcePosition;

/// Forward-only cursor with bounded lookahead and line/column tracking.
///
/// ## Notes
/// - `peek(k)` walks at most `k` characters from the cursor; the lexer never asks for more than three.
/// - Line/column advance per character: `\n` moves to column 1 of the next line.
pub struct SourceCursor<'a> {
    source: &'a str,
    offset: usize,
    line: i32,
    column: i32,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Character `k` positions ahead of the cursor (`0` is the current character).
    pub fn peek(&self, k: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(k)
    }

    pub fn current(&self) -> Option<char> {
        self.peek(0)
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Consume one character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `predicate` holds.
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(c) = self.current() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn position(&self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            column: self.column,
        }
    }

    /// Source text between a previously recorded offset and the cursor.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_columns() {
        let mut cursor = SourceCursor::new("ab\ncd");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position(), SourcePosition::new(1, 3));
        cursor.advance();
        assert_eq!(cursor.position(), SourcePosition::new(2, 1));
        assert_eq!(cursor.peek(1), Some('d'));
    }

    #[test]
    fn advance_past_end_is_none() {
        let mut cursor = SourceCursor::new("x");
        assert_eq!(cursor.advance(), Some('x'));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.offset(), 1);
    }
}
