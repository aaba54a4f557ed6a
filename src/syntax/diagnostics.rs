use serde::Serialize;
use tree_sitter::{Node, Tree};

/// A syntax error reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub start: usize,
    pub end: usize,
}

/// Collect one diagnostic per `ERROR` or `MISSING` node.
pub fn collect_diagnostics(tree: &Tree) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let root = tree.root_node();
    if root.has_error() {
        visit(root, &mut diagnostics);
    }
    diagnostics
}

fn visit(node: Node, diagnostics: &mut Vec<Diagnostic>) {
    if node.is_missing() {
        diagnostics.push(Diagnostic {
            message: format!("Missing {}", node.kind()),
            start: node.start_byte(),
            end: node.end_byte(),
        });
        return;
    }
    if node.is_error() {
        diagnostics.push(Diagnostic {
            message: "Unexpected syntax".to_string(),
            start: node.start_byte(),
            end: node.end_byte(),
        });
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node
        .children(&mut cursor)
        .filter(|child| child.has_error())
        .collect();
    for child in children {
        visit(child, diagnostics);
    }
}
