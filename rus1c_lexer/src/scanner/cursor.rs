//! Byte-offset cursor over an immutable source buffer

use crate::utils::{Position, Span};

/// Read position into the input with line and column tracking
///
/// All matching is done against [`Cursor::rest`]; the cursor only moves
/// forward, and only by whole characters.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: Position::start(),
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn offset(&self) -> usize {
        self.pos.offset
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos.offset >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character `n` places ahead of the cursor (`peek_nth(0) == peek()`)
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume one character
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos = self.pos.advance(ch);
        Some(ch)
    }

    /// Consume `len` bytes; `len` must end on a character boundary
    pub fn advance_bytes(&mut self, len: usize) -> &'a str {
        let start = self.pos.offset;
        let text = &self.input[start..start + len];
        self.pos = self.pos.advance_str(text);
        text
    }

    /// Consume characters while `predicate` holds, returning the byte count
    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> usize {
        let start = self.pos.offset;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos = self.pos.advance(ch);
        }
        self.pos.offset - start
    }

    /// Consume up to, not including, the next line feed
    pub fn take_line(&mut self) -> &'a str {
        let start = self.pos.offset;
        self.eat_while(|ch| ch != '\n');
        &self.input[start..self.pos.offset]
    }

    /// Text consumed since `start`
    pub fn slice_from(&self, start: Position) -> &'a str {
        &self.input[start.offset..self.pos.offset]
    }

    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_bump() {
        let mut cursor = Cursor::new("Аб\nв");
        assert_eq!(cursor.peek(), Some('А'));
        assert_eq!(cursor.peek_nth(2), Some('\n'));
        assert_eq!(cursor.peek_nth(9), None);

        assert_eq!(cursor.bump(), Some('А'));
        assert_eq!(cursor.offset(), 'А'.len_utf8());
        assert_eq!(cursor.position().column, 2);
        assert!(cursor.starts_with("б"));
    }

    #[test]
    fn test_take_line_stops_before_newline() {
        let mut cursor = Cursor::new("// комментарий\nА");
        let start = cursor.position();
        assert_eq!(cursor.take_line(), "// комментарий");
        assert_eq!(cursor.peek(), Some('\n'));
        assert_eq!(cursor.slice_from(start), "// комментарий");
        assert_eq!(cursor.span_from(start).start.offset, 0);
    }

    #[test]
    fn test_eat_while_and_advance_bytes() {
        let mut cursor = Cursor::new("123abc");
        assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), 3);
        assert_eq!(cursor.advance_bytes(2), "ab");
        assert_eq!(cursor.rest(), "c");
        cursor.bump();
        assert!(cursor.is_eof());
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.input(), "123abc");
    }
}
