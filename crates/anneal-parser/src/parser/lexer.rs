//! Character-level scanning for the grammar
//!
//! The grammar is scannerless: there is no token stream. The [`Lexer`] owns
//! the cursor over the source, provides checkpoint/restore for backtracking,
//! and implements the character classes and the Skip rule (whitespace and
//! comments between tokens).

use super::error::{Construct, ParseError, ParseResult};
use crate::ast::SourceLocation;

/// Lowercase letter; starts a bare atom
pub fn is_lower(ch: char) -> bool {
    ch.is_lowercase()
}

/// Uppercase letter or underscore; starts a variable
pub fn is_upper_or_underscore(ch: char) -> bool {
    ch.is_uppercase() || ch == '_'
}

/// Decimal digit
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Whitespace, including line terminators and Unicode space separators
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace()
}

/// Letter, underscore or digit; continues an atom or variable
pub fn is_ident_continue(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || is_digit(ch)
}

/// A saved position in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Index into the character buffer
    pub index: usize,
    /// Byte offset into the source
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Cursor {
    fn start() -> Self {
        Self { index: 0, offset: 0, line: 1, column: 1 }
    }
}

/// Cursor over the source text
pub struct Lexer<'a> {
    source: &'a str,
    input: Vec<char>,
    cursor: Cursor,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.chars().collect(),
            cursor: Cursor::start(),
        }
    }

    /// Length of the source in bytes
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Check if the source is empty
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Save the current position
    pub fn checkpoint(&self) -> Cursor {
        self.cursor
    }

    /// Rewind to a saved position
    pub fn restore(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Check if all input has been consumed
    pub fn is_at_end(&self) -> bool {
        self.cursor.index >= self.input.len()
    }

    /// Look at the current character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Look `ahead` characters past the current one
    pub fn peek_at(&self, ahead: usize) -> Option<char> {
        self.input.get(self.cursor.index + ahead).copied()
    }

    /// Consume one character
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.cursor.index += 1;
        self.cursor.offset += ch.len_utf8();

        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }

        Some(ch)
    }

    /// Check whether the remaining input starts with `text`
    pub fn starts_with(&self, text: &str) -> bool {
        self.source[self.cursor.offset..].starts_with(text)
    }

    /// Consume `text` if the remaining input starts with it
    pub fn eat_str(&mut self, text: &str) -> bool {
        if !self.starts_with(text) {
            return false;
        }
        for _ in text.chars() {
            self.advance();
        }
        true
    }

    /// Consume one character matching `pred`
    pub fn eat_if(&mut self, pred: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(ch) if pred(ch) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// Consume characters while `pred` holds; returns how many were consumed
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.eat_if(&pred) {
            count += 1;
        }
        count
    }

    /// Source text between two positions
    pub fn slice(&self, start: Cursor, end: Cursor) -> &'a str {
        &self.source[start.offset..end.offset]
    }

    /// Source text between `start` and the current position
    pub fn slice_from(&self, start: Cursor) -> &'a str {
        self.slice(start, self.cursor)
    }

    /// Location of the match between `start` and the current position
    pub fn location_from(&self, start: Cursor) -> SourceLocation {
        self.location_between(start, self.cursor)
    }

    /// Location of the match between two positions
    pub fn location_between(&self, start: Cursor, end: Cursor) -> SourceLocation {
        SourceLocation::new(start.line, start.column, start.offset, end.offset - start.offset)
    }

    /// Describe the character at `cursor` for error messages
    pub fn describe_at(&self, cursor: Cursor) -> String {
        match self.input.get(cursor.index) {
            Some(ch) => format!("{:?}", ch),
            None => "end of input".to_string(),
        }
    }

    /// Consume whitespace and comments
    ///
    /// Never fails except on an unterminated block comment, which aborts the
    /// whole parse.
    pub fn skip(&mut self) -> ParseResult<()> {
        loop {
            if self.eat_while(is_space) > 0 {
                continue;
            }
            if self.skip_line_comment() {
                continue;
            }
            if self.skip_block_comment()? {
                continue;
            }
            return Ok(());
        }
    }

    /// `%` up to and including a line terminator
    ///
    /// The terminator is mandatory: a `%` comment on the last line of input
    /// with no newline after it is not consumed.
    fn skip_line_comment(&mut self) -> bool {
        if self.peek() != Some('%') {
            return false;
        }
        let start = self.checkpoint();
        self.advance();
        loop {
            match self.peek() {
                None => {
                    self.restore(start);
                    return false;
                }
                Some('\n') => {
                    self.advance();
                    return true;
                }
                Some('\r') if self.peek_at(1) == Some('\n') => {
                    self.advance();
                    self.advance();
                    return true;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// `/*` ... `*/`, nesting
    fn skip_block_comment(&mut self) -> ParseResult<bool> {
        if !self.starts_with("/*") {
            return Ok(false);
        }
        let start = self.checkpoint();
        let mut depth = 0usize;
        loop {
            if self.eat_str("/*") {
                depth += 1;
            } else if self.eat_str("*/") {
                depth -= 1;
                if depth == 0 {
                    return Ok(true);
                }
            } else if self.advance().is_none() {
                return Err(ParseError::Unterminated {
                    construct: Construct::BlockComment,
                    line: start.line,
                    column: start.column,
                });
            }
        }
    }
}
