//! Parser implementation for logic programs
//!
//! Every grammar rule returns a [`RuleResult`]: `Ok(Some(node))` when it
//! matched, `Ok(None)` when it did not (the cursor is back where the rule
//! started, so the caller can try its next alternative), and `Err(_)` for
//! failures that abort the whole parse.

use super::error::{Construct, ParseError, ParseResult};
use super::lexer::{is_digit, is_ident_continue, is_lower, is_upper_or_underscore, Cursor, Lexer};
use crate::ast::{Node, NodeKind};
use crate::config::ParserConfig;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

/// Outcome of a single grammar rule
pub type RuleResult = ParseResult<Option<Node>>;

type Rule<'a> = fn(&mut Parser<'a>) -> RuleResult;

const MULTIPLICATIVE_OPERATORS: &[&str] = &["*", "/"];
const ADDITIVE_OPERATORS: &[&str] = &["+", "-"];
// Two-character operators come before their one-character prefixes
const RELATION_OPERATORS: &[&str] = &["<=", ">=", "<", ">", "=", "/=", "is"];

/// Something the parser looked for and did not find
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Expected {
    Literal(&'static str),
    Class(&'static str),
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Literal(text) => write!(f, "'{}'", text),
            Expected::Class(name) => f.write_str(name),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// The furthest point any rule reached before failing
#[derive(Debug)]
struct Failure {
    cursor: Cursor,
    rule: &'static str,
    expected: BTreeSet<Expected>,
}

/// Parser for programs and queries
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    config: ParserConfig,
    rule: &'static str,
    depth: usize,
    furthest: Option<Failure>,
}

impl<'a> Parser<'a> {
    /// Create a new parser from source code
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Create a parser with explicit configuration
    pub fn with_config(source: &'a str, config: ParserConfig) -> Self {
        Self {
            lexer: Lexer::new(source),
            config,
            rule: "Program",
            depth: 0,
            furthest: None,
        }
    }

    /// Parse a complete program: `Skip ClauseList Skip` followed by end of
    /// input
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        self.entry_point("Program", Self::program)
    }

    /// Parse a query: `?- PredicateList`, optionally terminated by `.`,
    /// followed by end of input
    pub fn parse_query(&mut self) -> ParseResult<Node> {
        self.entry_point("Query", Self::query)
    }

    fn entry_point(&mut self, name: &'static str, rule: Rule<'a>) -> ParseResult<Node> {
        self.config.validate()?;
        debug!(rule = name, bytes = self.lexer.len(), "parse started");

        let result = match rule(self) {
            Ok(Some(node)) => Ok(node),
            Ok(None) => Err(self.syntax_error()),
            Err(e) => Err(e),
        };

        match &result {
            Ok(node) => debug!(rule = name, children = node.children().len(), "parse succeeded"),
            Err(e) => debug!(rule = name, error = %e, "parse failed"),
        }
        result
    }

    fn program(&mut self) -> RuleResult {
        self.attempt("Program", |p| {
            let start = p.lexer.checkpoint();
            p.lexer.skip()?;
            let Some(clauses) = p.parse_clause_list()? else {
                return Ok(None);
            };
            p.lexer.skip()?;
            if !p.end_of_input() {
                return Ok(None);
            }
            let node = Node::cons(NodeKind::Program, None, Some(clauses))
                .with_location(p.lexer.location_from(start))
                .with_source(p.source_text(start));
            Ok(Some(node))
        })
    }

    fn query(&mut self) -> RuleResult {
        self.attempt("Query", |p| {
            p.lexer.skip()?;
            let start = p.lexer.checkpoint();
            if !p.literal("?-") {
                return Ok(None);
            }
            p.lexer.skip()?;
            let Some(body) = p.parse_predicate_list()? else {
                return Ok(None);
            };
            let end = p.lexer.checkpoint();
            p.lexer.skip()?;
            if p.literal(".") {
                p.lexer.skip()?;
            }
            if !p.end_of_input() {
                return Ok(None);
            }

            let location = p.lexer.location_between(start, end);
            let text = p.source_text_between(start, end);
            Ok(Some(Node::query(body, location).with_source(text)))
        })
    }

    /// Numeral: one or more digits
    pub fn parse_numeral(&mut self) -> RuleResult {
        self.attempt("Numeral", |p| {
            let start = p.lexer.checkpoint();
            if p.lexer.eat_while(is_digit) == 0 {
                p.expected(Expected::Class("digit"));
                return Ok(None);
            }

            let text = p.lexer.slice_from(start);
            let value = text.parse::<i64>().map_err(|_| ParseError::NumeralOverflow {
                text: text.to_string(),
                line: start.line,
                column: start.column,
            })?;
            Ok(Some(Node::numeral(value, p.lexer.location_from(start))))
        })
    }

    /// Atom: a bare lowercase identifier or a single-quoted string
    pub fn parse_atom(&mut self) -> RuleResult {
        self.attempt("Atom", |p| {
            let start = p.lexer.checkpoint();
            match p.lexer.peek() {
                Some('\'') => p.quoted_atom(start).map(Some),
                Some(ch) if is_lower(ch) => {
                    p.lexer.advance();
                    p.lexer.eat_while(is_ident_continue);
                    let text = p.lexer.slice_from(start);
                    Ok(Some(Node::atom(text, p.lexer.location_from(start))))
                }
                _ => {
                    p.expected(Expected::Class("atom"));
                    Ok(None)
                }
            }
        })
    }

    /// Body of a quoted atom; the opening quote is at the cursor
    ///
    /// Backslash escapes and doubled quotes are kept verbatim.
    fn quoted_atom(&mut self, start: Cursor) -> ParseResult<Node> {
        let unterminated = ParseError::Unterminated {
            construct: Construct::QuotedAtom,
            line: start.line,
            column: start.column,
        };

        self.lexer.advance();
        let content_start = self.lexer.checkpoint();
        loop {
            match self.lexer.peek() {
                None => return Err(unterminated),
                Some('\\') => {
                    self.lexer.advance();
                    if self.lexer.advance().is_none() {
                        return Err(unterminated);
                    }
                }
                Some('\'') if self.lexer.peek_at(1) == Some('\'') => {
                    self.lexer.advance();
                    self.lexer.advance();
                }
                Some('\'') => break,
                Some(_) => {
                    self.lexer.advance();
                }
            }
        }

        let content = self.lexer.slice_from(content_start);
        self.lexer.advance();
        Ok(Node::atom(content, self.lexer.location_from(start)))
    }

    /// Variable: an uppercase letter or underscore, then identifier characters
    pub fn parse_variable(&mut self) -> RuleResult {
        self.attempt("Variable", |p| {
            let start = p.lexer.checkpoint();
            if !p.lexer.eat_if(is_upper_or_underscore) {
                p.expected(Expected::Class("variable"));
                return Ok(None);
            }
            p.lexer.eat_while(is_ident_continue);
            let text = p.lexer.slice_from(start);
            Ok(Some(Node::variable(text, p.lexer.location_from(start))))
        })
    }

    /// Structure: an atom immediately followed by a parenthesized TermList
    pub fn parse_structure(&mut self) -> RuleResult {
        self.attempt("Structure", |p| {
            let start = p.lexer.checkpoint();
            let Some(functor) = p.parse_atom()? else {
                return Ok(None);
            };
            let Some(args) = p.arguments()? else {
                return Ok(None);
            };
            let node = Node::structure(functor, args, p.lexer.location_from(start))
                .with_source(p.source_text(start));
            Ok(Some(node))
        })
    }

    /// `( Skip TermList Skip )`, counted against the nesting limit
    fn arguments(&mut self) -> RuleResult {
        let start = self.lexer.checkpoint();
        if !self.literal("(") {
            return Ok(None);
        }
        self.descend(start)?;
        let args = self.closed_by_paren(Self::parse_term_list);
        self.ascend();

        let args = args?;
        if args.is_none() {
            self.lexer.restore(start);
        }
        Ok(args)
    }

    /// `Skip inner Skip )`, the tail of a parenthesized group
    fn closed_by_paren(&mut self, inner: Rule<'a>) -> RuleResult {
        self.lexer.skip()?;
        let Some(node) = inner(self)? else {
            return Ok(None);
        };
        self.lexer.skip()?;
        Ok(self.literal(")").then_some(node))
    }

    /// Term: Numeral, Structure, Atom or Variable, tried in that order
    pub fn parse_term(&mut self) -> RuleResult {
        self.first_of(&[
            Self::parse_numeral,
            Self::parse_structure,
            Self::parse_atom,
            Self::parse_variable,
        ])
    }

    /// TermList: comma-separated Terms
    pub fn parse_term_list(&mut self) -> RuleResult {
        self.attempt("TermList", |p| p.list_of(NodeKind::TermList, Self::parse_term, Some(",")))
    }

    /// PrimaryExpr: a parenthesized PrimaryExpr or a Term
    pub fn parse_primary_expr(&mut self) -> RuleResult {
        self.first_of(&[Self::parenthesized, Self::parse_term])
    }

    fn parenthesized(&mut self) -> RuleResult {
        self.attempt("PrimaryExpr", |p| {
            let start = p.lexer.checkpoint();
            if !p.literal("(") {
                return Ok(None);
            }
            p.descend(start)?;
            let inner = p.closed_by_paren(Self::parse_primary_expr);
            p.ascend();

            let Some(inner) = inner? else {
                return Ok(None);
            };
            let node = Node::parenthesized(inner, p.lexer.location_from(start))
                .with_source(p.source_text(start));
            Ok(Some(node))
        })
    }

    /// MultiplicativeExpr: `PrimaryExpr (* or /) PrimaryExpr`, or a bare
    /// PrimaryExpr
    pub fn parse_multiplicative_expr(&mut self) -> RuleResult {
        self.attempt("MultiplicativeExpr", |p| {
            p.binary(
                NodeKind::MultiplicativeExpr,
                NodeKind::MultiplicativeOp,
                MULTIPLICATIVE_OPERATORS,
                Self::parse_primary_expr,
            )
        })
    }

    /// AdditiveExpr: `MultiplicativeExpr (+ or -) MultiplicativeExpr`, or a
    /// bare MultiplicativeExpr
    pub fn parse_additive_expr(&mut self) -> RuleResult {
        self.attempt("AdditiveExpr", |p| {
            p.binary(
                NodeKind::AdditiveExpr,
                NodeKind::AdditiveOp,
                ADDITIVE_OPERATORS,
                Self::parse_multiplicative_expr,
            )
        })
    }

    /// A single binary application over `operand`
    ///
    /// The left operand is parsed once; if no operator and right operand
    /// follow, the rule backs up to just after it and returns it unchanged.
    /// Chains such as `1 + 2 + 3` are not folded: the trailing `+ 3` is left
    /// for the enclosing rule.
    fn binary(
        &mut self,
        kind: NodeKind,
        op_kind: NodeKind,
        operators: &'static [&'static str],
        operand: Rule<'a>,
    ) -> RuleResult {
        let start = self.lexer.checkpoint();
        let Some(left) = operand(self)? else {
            return Ok(None);
        };
        let after_left = self.lexer.checkpoint();

        self.lexer.skip()?;
        let Some(op) = self.operator(op_kind, operators) else {
            self.lexer.restore(after_left);
            return Ok(Some(left));
        };
        self.lexer.skip()?;
        let Some(right) = operand(self)? else {
            trace!(rule = %kind, "no right operand, backing up");
            self.lexer.restore(after_left);
            return Ok(Some(left));
        };

        let node = Node::binary(kind, left, op, right, self.lexer.location_from(start))
            .with_source(self.source_text(start));
        Ok(Some(node))
    }

    /// First of `symbols` present at the cursor, as an operator leaf
    fn operator(&mut self, kind: NodeKind, symbols: &'static [&'static str]) -> Option<Node> {
        let start = self.lexer.checkpoint();
        let symbol = symbols.iter().copied().find(|&symbol| self.literal(symbol))?;
        Some(Node::operator(kind, symbol, self.lexer.location_from(start)))
    }

    /// RelationOperator: `<=`, `>=`, `<`, `>`, `=`, `/=` or `is`
    pub fn parse_relation_op(&mut self) -> RuleResult {
        self.attempt("RelationOperator", |p| {
            Ok(p.operator(NodeKind::RelationOp, RELATION_OPERATORS))
        })
    }

    /// Relation: `AdditiveExpr RelationOperator AdditiveExpr`
    pub fn parse_relation(&mut self) -> RuleResult {
        self.attempt("Relation", |p| {
            let start = p.lexer.checkpoint();
            let Some(left) = p.parse_additive_expr()? else {
                return Ok(None);
            };
            p.lexer.skip()?;
            let Some(op) = p.parse_relation_op()? else {
                return Ok(None);
            };
            p.lexer.skip()?;
            let Some(right) = p.parse_additive_expr()? else {
                return Ok(None);
            };

            let node = Node::relation(left, op, right, p.lexer.location_from(start))
                .with_source(p.source_text(start));
            Ok(Some(node))
        })
    }

    /// Predicate: a Relation, or an atom call with or without arguments
    pub fn parse_predicate(&mut self) -> RuleResult {
        self.first_of(&[Self::parse_relation, Self::call])
    }

    fn call(&mut self) -> RuleResult {
        self.attempt("Predicate", |p| {
            let start = p.lexer.checkpoint();
            let Some(functor) = p.parse_atom()? else {
                return Ok(None);
            };
            let args = p.arguments()?;
            let node = Node::predicate(functor, args, p.lexer.location_from(start))
                .with_source(p.source_text(start));
            Ok(Some(node))
        })
    }

    /// PredicateList: comma-separated Predicates
    pub fn parse_predicate_list(&mut self) -> RuleResult {
        self.attempt("PredicateList", |p| {
            p.list_of(NodeKind::PredicateList, Self::parse_predicate, Some(","))
        })
    }

    /// Clause: `Predicate :- PredicateList .` (rule) or `Predicate .` (fact)
    pub fn parse_clause(&mut self) -> RuleResult {
        self.attempt("Clause", |p| {
            let start = p.lexer.checkpoint();
            let Some(head) = p.parse_predicate()? else {
                return Ok(None);
            };
            let after_head = p.lexer.checkpoint();

            p.lexer.skip()?;
            if p.literal(":-") {
                p.lexer.skip()?;
                if let Some(body) = p.parse_predicate_list()? {
                    p.lexer.skip()?;
                    if p.literal(".") {
                        let node = Node::rule(head, body, p.lexer.location_from(start))
                            .with_source(p.source_text(start));
                        return Ok(Some(node));
                    }
                }
                p.lexer.restore(after_head);
                p.lexer.skip()?;
            }

            if !p.literal(".") {
                return Ok(None);
            }
            let node = Node::fact(head, p.lexer.location_from(start)).with_source(p.source_text(start));
            Ok(Some(node))
        })
    }

    /// ClauseList: Clauses separated only by Skip material
    pub fn parse_clause_list(&mut self) -> RuleResult {
        self.attempt("ClauseList", |p| p.list_of(NodeKind::ClauseList, Self::parse_clause, None))
    }

    /// `item (Skip separator Skip item)*`, built with [`Node::cons`]
    fn list_of(
        &mut self,
        kind: NodeKind,
        item: Rule<'a>,
        separator: Option<&'static str>,
    ) -> RuleResult {
        let start = self.lexer.checkpoint();
        let Some(head) = item(self)? else {
            return Ok(None);
        };

        let mut rest = Vec::new();
        loop {
            let checkpoint = self.lexer.checkpoint();
            self.lexer.skip()?;
            if let Some(separator) = separator {
                if !self.literal(separator) {
                    self.lexer.restore(checkpoint);
                    break;
                }
                self.lexer.skip()?;
            }
            match item(self)? {
                Some(node) => rest.push(node),
                None => {
                    self.lexer.restore(checkpoint);
                    break;
                }
            }
        }

        trace!(kind = %kind, len = rest.len() + 1, "list built");
        let tail = (!rest.is_empty()).then(|| Node::list(kind, rest));
        let node = Node::cons(kind, Some(head), tail).with_source(self.source_text(start));
        Ok(Some(node))
    }

    /// Run `body` as the rule `name`, restoring the cursor if it does not
    /// match
    fn attempt<F>(&mut self, name: &'static str, body: F) -> RuleResult
    where
        F: FnOnce(&mut Self) -> RuleResult,
    {
        let checkpoint = self.lexer.checkpoint();
        let outer = std::mem::replace(&mut self.rule, name);
        let result = body(self);
        self.rule = outer;

        let result = result?;
        if result.is_none() {
            self.lexer.restore(checkpoint);
        }
        Ok(result)
    }

    /// Ordered choice: the first alternative that matches wins
    fn first_of(&mut self, alternatives: &[Rule<'a>]) -> RuleResult {
        for alternative in alternatives {
            if let Some(node) = alternative(self)? {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// Consume `text` or record it as expected here
    fn literal(&mut self, text: &'static str) -> bool {
        if self.lexer.eat_str(text) {
            return true;
        }
        self.expected(Expected::Literal(text));
        false
    }

    fn end_of_input(&mut self) -> bool {
        if self.lexer.is_at_end() {
            return true;
        }
        self.expected(Expected::EndOfInput);
        false
    }

    fn expected(&mut self, what: Expected) {
        let here = self.lexer.checkpoint();
        if let Some(failure) = self.furthest.as_mut() {
            if failure.cursor.offset > here.offset {
                return;
            }
            if failure.cursor.offset == here.offset {
                failure.expected.insert(what);
                return;
            }
        }
        self.furthest = Some(Failure {
            cursor: here,
            rule: self.rule,
            expected: BTreeSet::from([what]),
        });
    }

    fn syntax_error(&self) -> ParseError {
        let cursor = self
            .furthest
            .as_ref()
            .map_or_else(|| self.lexer.checkpoint(), |f| f.cursor);
        let (rule, expected) = match &self.furthest {
            Some(f) => (f.rule, f.expected.iter().map(ToString::to_string).collect()),
            None => (self.rule, Vec::new()),
        };
        ParseError::Syntax {
            line: cursor.line,
            column: cursor.column,
            rule,
            expected,
            found: self.lexer.describe_at(cursor),
        }
    }

    /// Enter one level of nesting; every successful call is paired with
    /// [`Self::ascend`], including when the nested rule fails fatally
    fn descend(&mut self, at: Cursor) -> ParseResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_depth,
                line: at.line,
                column: at.column,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn source_text(&self, start: Cursor) -> Option<String> {
        self.source_text_between(start, self.lexer.checkpoint())
    }

    fn source_text_between(&self, start: Cursor, end: Cursor) -> Option<String> {
        if !self.config.record_source_text {
            return None;
        }
        Some(self.lexer.slice(start, end).to_string())
    }
}
