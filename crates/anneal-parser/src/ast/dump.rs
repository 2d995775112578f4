//! Human-readable renderings of a tree
//!
//! Neither format is a stable serialization; they exist for diagnostics and
//! for comparing tree shapes in tests.

use super::nodes::{Node, NodeValue};
use std::fmt::{self, Write};

impl Node {
    /// Render the node and its descendants, one node per line, children
    /// indented by two spaces
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// Render the tree as an S-expression of kinds and leaf payloads
    ///
    /// Positions and the recorded source text of composite nodes are left
    /// out, so two trees that differ only in whitespace or comments render
    /// identically.
    pub fn to_sexpr(&self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind().as_str());
        if self.kind().is_leaf() {
            match self.value() {
                NodeValue::Int(n) => {
                    let _ = write!(out, " {}", n);
                }
                NodeValue::Text(s) => {
                    let _ = write!(out, " {:?}", s);
                }
                NodeValue::None => {}
            }
        }
        for child in self.children() {
            out.push(' ');
            child.write_sexpr(out);
        }
        out.push(')');
    }

    fn write_dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.kind(), indent = depth * 2)?;
        match self.value() {
            NodeValue::Int(n) => write!(f, " {}", n)?,
            NodeValue::Text(s) => write!(f, " {:?}", s)?,
            NodeValue::None => {}
        }
        writeln!(f, " @{}", self.location())?;
        for child in self.children() {
            child.write_dump(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_dump(f, 0)
    }
}
