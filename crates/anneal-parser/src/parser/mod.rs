//! Logic program parser
//!
//! A scannerless PEG-style recursive-descent parser: ordered choice is a
//! loop over alternatives, and backtracking restores a saved cursor.

pub mod error;
pub mod lexer;
pub mod parse;

pub use error::{Construct, ParseError, ParseResult};
pub use lexer::Lexer;
pub use parse::{Parser, RuleResult};
