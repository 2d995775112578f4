//! Parse errors

use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;

/// A lexical construct that can run off the end of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// `'...'`
    QuotedAtom,
    /// `/* ... */`
    BlockComment,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::QuotedAtom => write!(f, "quoted atom"),
            Construct::BlockComment => write!(f, "block comment"),
        }
    }
}

/// Parse error
///
/// `Syntax` is the only error produced by ordinary ordered-choice failure.
/// The others abort the parse as soon as they are detected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No alternative of the grammar matched
    #[error("Syntax error at {line}:{column} in {rule}: expected {}, found {found}", .expected.join(" or "))]
    Syntax {
        /// Line of the furthest failure
        line: usize,
        /// Column of the furthest failure
        column: usize,
        /// Innermost grammar rule active at the failure
        rule: &'static str,
        /// Everything that would have let the parse continue, sorted
        expected: Vec<String>,
        /// The character at the failure, or end of input
        found: String,
    },

    /// Input ended inside a quoted atom or block comment
    #[error("Unterminated {construct} starting at {line}:{column}")]
    Unterminated {
        /// What was left open
        construct: Construct,
        /// Line where it was opened
        line: usize,
        /// Column where it was opened
        column: usize,
    },

    /// Numeral too large for `i64`
    #[error("Numeral {text} at {line}:{column} does not fit in a 64-bit integer")]
    NumeralOverflow {
        /// The digits as written
        text: String,
        /// Line of the first digit
        line: usize,
        /// Column of the first digit
        column: usize,
    },

    /// Structures or parentheses nested past `ParserConfig::max_depth`
    #[error("Nesting deeper than {limit} levels at {line}:{column}")]
    NestingTooDeep {
        /// The configured limit
        limit: usize,
        /// Line of the opening parenthesis that crossed the limit
        line: usize,
        /// Column of that parenthesis
        column: usize,
    },

    /// The parser configuration failed validation
    #[error("Invalid parser configuration: {0}")]
    Config(#[from] ConfigError),
}

impl ParseError {
    /// Position the error refers to, if any
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Syntax { line, column, .. }
            | ParseError::Unterminated { line, column, .. }
            | ParseError::NumeralOverflow { line, column, .. }
            | ParseError::NestingTooDeep { line, column, .. } => Some((*line, *column)),
            ParseError::Config(_) => None,
        }
    }

    /// Check if this error aborted the parse rather than exhausting the
    /// alternatives of the grammar
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ParseError::Syntax { .. })
    }
}

/// Result type for parsing
pub type ParseResult<T> = Result<T, ParseError>;
