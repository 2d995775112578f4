//! Abstract Syntax Tree (AST) for logic programs
//!
//! The AST is a single recursive node type tagged with a [`NodeKind`]. It is
//! produced by the parser and consumed read-only by later stages.

pub mod dump;
pub mod nodes;
pub mod visitor;

pub use nodes::{Node, NodeKind, NodeValue, SourceLocation};
pub use visitor::{variables, walk_node, Visitor};
