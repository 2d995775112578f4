//! Visitor pattern for traversing AST

use super::nodes::{Node, NodeKind};

/// Visitor trait for read-only AST traversal
///
/// Override `visit_node` and call [`walk_node`] to continue into children.
pub trait Visitor: Sized {
    /// Visit a node
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

/// Walk the children of a node in order
pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in node.children() {
        visitor.visit_node(child);
    }
}

#[derive(Default)]
struct VariableCollector {
    names: Vec<String>,
}

impl Visitor for VariableCollector {
    fn visit_node(&mut self, node: &Node) {
        if node.kind() == NodeKind::Variable {
            if let Some(name) = node.text() {
                if !self.names.iter().any(|n| n == name) {
                    self.names.push(name.to_string());
                }
            }
        }
        walk_node(self, node);
    }
}

/// Collect the distinct variable names in a tree, in order of first
/// occurrence
pub fn variables(node: &Node) -> Vec<String> {
    let mut collector = VariableCollector::default();
    collector.visit_node(node);
    collector.names
}
