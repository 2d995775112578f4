// Anneal Parser - Source parser for the Anneal logic language

#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod ast;
pub mod config;
pub mod parser;

pub use ast::{variables, walk_node, Node, NodeKind, NodeValue, SourceLocation, Visitor};
pub use config::{ConfigError, ParserConfig};
pub use parser::{Construct, ParseError, ParseResult, Parser};

/// Parse a complete program into a `Program` node
pub fn parse_program(source: &str) -> ParseResult<Node> {
    parse_program_with_config(source, ParserConfig::default())
}

/// Parse a complete program with explicit configuration
pub fn parse_program_with_config(source: &str, config: ParserConfig) -> ParseResult<Node> {
    Parser::with_config(source, config).parse_program()
}

/// Parse a `?- ...` query into a `Query` node
pub fn parse_query(source: &str) -> ParseResult<Node> {
    parse_query_with_config(source, ParserConfig::default())
}

/// Parse a query with explicit configuration
pub fn parse_query_with_config(source: &str, config: ParserConfig) -> ParseResult<Node> {
    Parser::with_config(source, config).parse_query()
}
