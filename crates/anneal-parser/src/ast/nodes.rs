//! AST node definitions

use serde::Serialize;
use std::fmt;

/// The kind of an AST node
///
/// The kind determines the legal shape of a node's children. See the
/// per-kind constructors on [`Node`] for the shapes the parser produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
    /// Non-negative integer literal
    Numeral,
    /// Bare or quoted atom
    Atom,
    /// Named or anonymous variable
    Variable,
    /// Generic term; the parser yields the concrete kind instead
    Term,
    /// Arguments of a structure or predicate call
    TermList,
    /// Parenthesized sub-expression
    PrimaryExpr,
    /// `left (* or /) right`
    MultiplicativeExpr,
    /// `*` or `/`
    MultiplicativeOp,
    /// `left (+ or -) right`
    AdditiveExpr,
    /// `+` or `-`
    AdditiveOp,
    /// One of the relation operators
    RelationOp,
    /// `left op right` comparison or `is`
    Relation,
    /// Atom call, with or without arguments
    Predicate,
    /// Compound term `functor(args...)`
    Structure,
    /// Body of a rule or query
    PredicateList,
    /// Fact or rule
    Clause,
    /// Sequence of clauses
    ClauseList,
    /// `?- body`
    Query,
    /// A whole source file
    Program,
}

impl NodeKind {
    /// Name of the kind, as used in dumps and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Numeral => "Numeral",
            NodeKind::Atom => "Atom",
            NodeKind::Variable => "Variable",
            NodeKind::Term => "Term",
            NodeKind::TermList => "TermList",
            NodeKind::PrimaryExpr => "PrimaryExpr",
            NodeKind::MultiplicativeExpr => "MultiplicativeExpr",
            NodeKind::MultiplicativeOp => "MultiplicativeOp",
            NodeKind::AdditiveExpr => "AdditiveExpr",
            NodeKind::AdditiveOp => "AdditiveOp",
            NodeKind::RelationOp => "RelationOp",
            NodeKind::Relation => "Relation",
            NodeKind::Predicate => "Predicate",
            NodeKind::Structure => "Structure",
            NodeKind::PredicateList => "PredicateList",
            NodeKind::Clause => "Clause",
            NodeKind::ClauseList => "ClauseList",
            NodeKind::Query => "Query",
            NodeKind::Program => "Program",
        }
    }

    /// Check if nodes of this kind hold a flat sequence of elements
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            NodeKind::TermList | NodeKind::PredicateList | NodeKind::ClauseList | NodeKind::Program
        )
    }

    /// Check if this kind is an operator leaf
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            NodeKind::MultiplicativeOp | NodeKind::AdditiveOp | NodeKind::RelationOp
        )
    }

    /// Check if this kind never has children
    pub fn is_leaf(&self) -> bool {
        self.is_operator()
            || matches!(self, NodeKind::Numeral | NodeKind::Atom | NodeKind::Variable)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeValue {
    /// No payload
    None,
    /// Integer value of a numeral
    Int(i64),
    /// Atom or variable text, operator symbol, or the matched source text of
    /// a composite node
    Text(String),
}

impl NodeValue {
    /// Get the integer payload
    pub fn as_int(&self) -> Option<i64> {
        match self {
            NodeValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Check if there is no payload
    pub fn is_none(&self) -> bool {
        matches!(self, NodeValue::None)
    }
}

impl From<Option<String>> for NodeValue {
    fn from(text: Option<String>) -> Self {
        text.map_or(NodeValue::None, NodeValue::Text)
    }
}

/// Source location of a node's match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
    /// Byte offset of the first matched character
    pub offset: usize,
    /// Matched length in bytes
    pub length: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self { line, column, offset, length }
    }

    /// Byte offset one past the last matched character
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Extend this location so that it also covers `other`
    pub fn cover(self, other: SourceLocation) -> Self {
        let end = self.end().max(other.end());
        Self { length: end - self.offset, ..self }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node of the abstract syntax tree
///
/// Nodes are built bottom-up by the parser and are immutable once handed
/// out: fields are private and only exposed through accessors. Every child is
/// owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    kind: NodeKind,
    value: NodeValue,
    location: SourceLocation,
    children: Vec<Node>,
}

impl Node {
    fn leaf(kind: NodeKind, value: NodeValue, location: SourceLocation) -> Self {
        Self { kind, value, location, children: Vec::new() }
    }

    fn composite(kind: NodeKind, location: SourceLocation, children: Vec<Node>) -> Self {
        Self { kind, value: NodeValue::None, location, children }
    }

    /// Create a numeral
    pub fn numeral(value: i64, location: SourceLocation) -> Self {
        Self::leaf(NodeKind::Numeral, NodeValue::Int(value), location)
    }

    /// Create an atom; `text` excludes any delimiting quotes
    pub fn atom(text: impl Into<String>, location: SourceLocation) -> Self {
        Self::leaf(NodeKind::Atom, NodeValue::Text(text.into()), location)
    }

    /// Create a variable
    pub fn variable(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::leaf(NodeKind::Variable, NodeValue::Text(name.into()), location)
    }

    /// Create an operator leaf of one of the three operator kinds
    pub fn operator(kind: NodeKind, symbol: impl Into<String>, location: SourceLocation) -> Self {
        debug_assert!(kind.is_operator(), "{} is not an operator kind", kind);
        Self::leaf(kind, NodeValue::Text(symbol.into()), location)
    }

    /// Create a structure `functor(args...)`
    pub fn structure(functor: Node, args: Node, location: SourceLocation) -> Self {
        debug_assert_eq!(functor.kind, NodeKind::Atom);
        debug_assert_eq!(args.kind, NodeKind::TermList);
        Self::composite(NodeKind::Structure, location, vec![functor, args])
    }

    /// Wrap a sub-expression that appeared in parentheses
    pub fn parenthesized(inner: Node, location: SourceLocation) -> Self {
        Self::composite(NodeKind::PrimaryExpr, location, vec![inner])
    }

    /// Create a binary arithmetic expression
    ///
    /// `kind` is `MultiplicativeExpr` or `AdditiveExpr`, and `op` must be the
    /// operator kind of the same tier.
    pub fn binary(
        kind: NodeKind,
        left: Node,
        op: Node,
        right: Node,
        location: SourceLocation,
    ) -> Self {
        debug_assert!(matches!(
            (kind, op.kind),
            (NodeKind::MultiplicativeExpr, NodeKind::MultiplicativeOp)
                | (NodeKind::AdditiveExpr, NodeKind::AdditiveOp)
        ));
        Self::composite(kind, location, vec![left, op, right])
    }

    /// Create a relation `left op right`
    pub fn relation(left: Node, op: Node, right: Node, location: SourceLocation) -> Self {
        debug_assert_eq!(op.kind, NodeKind::RelationOp);
        Self::composite(NodeKind::Relation, location, vec![left, op, right])
    }

    /// Create a predicate call, with or without arguments
    pub fn predicate(functor: Node, args: Option<Node>, location: SourceLocation) -> Self {
        debug_assert_eq!(functor.kind, NodeKind::Atom);
        let mut children = vec![functor];
        children.extend(args);
        Self::composite(NodeKind::Predicate, location, children)
    }

    /// Create a fact `head.`
    pub fn fact(head: Node, location: SourceLocation) -> Self {
        Self::composite(NodeKind::Clause, location, vec![head])
    }

    /// Create a rule `head :- body.`
    pub fn rule(head: Node, body: Node, location: SourceLocation) -> Self {
        debug_assert_eq!(body.kind, NodeKind::PredicateList);
        Self::composite(NodeKind::Clause, location, vec![head, body])
    }

    /// Create a query `?- body`
    pub fn query(body: Node, location: SourceLocation) -> Self {
        debug_assert_eq!(body.kind, NodeKind::PredicateList);
        Self::composite(NodeKind::Query, location, vec![body])
    }

    /// Create a list node directly from its elements
    pub fn list(kind: NodeKind, items: Vec<Node>) -> Self {
        debug_assert!(kind.is_list(), "{} is not a list kind", kind);
        debug_assert!(items.iter().all(|item| item.kind != kind));
        let location = match (items.first(), items.last()) {
            (Some(first), Some(last)) => first.location.cover(last.location),
            _ => SourceLocation::default(),
        };
        Self::composite(kind, location, items)
    }

    /// Prepend `head` to the elements of `tail`
    ///
    /// Yields `[head] ++ tail.children`, `[head]` without a tail, and `[]`
    /// without a head. Every list-shaped node goes through here, so a list
    /// never contains a list of its own kind.
    pub fn cons(kind: NodeKind, head: Option<Node>, tail: Option<Node>) -> Self {
        let mut items = Vec::with_capacity(1 + tail.as_ref().map_or(0, |t| t.children.len()));
        items.extend(head);
        if let Some(tail) = tail {
            items.extend(tail.children);
        }
        Self::list(kind, items)
    }

    /// Attach the matched source text to a composite node
    pub fn with_source(mut self, text: Option<String>) -> Self {
        debug_assert!(!self.kind.is_leaf());
        self.value = text.into();
        self
    }

    /// Set source location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    /// Get the node kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Get the payload
    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    /// Get the source location
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Get the children in source order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Get the child at `index`
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Shorthand for `self.value().as_text()`
    pub fn text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Shorthand for `self.value().as_int()`
    pub fn int(&self) -> Option<i64> {
        self.value.as_int()
    }

    /// Take ownership of the children
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Check if this is a clause with a body
    pub fn is_rule(&self) -> bool {
        self.kind == NodeKind::Clause && self.children.len() == 2
    }

    /// Check if this is a clause without a body
    pub fn is_fact(&self) -> bool {
        self.kind == NodeKind::Clause && self.children.len() == 1
    }
}
