use tree_sitter::Node;

use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::replace_node_text;
use crate::node::{AnyNode, AstNode};
use crate::syntax::SyntaxKind;

/// Nodes built around one inner expression: the callee of a call, the
/// object of a property access, the body of an expression statement.
pub trait ExpressionedNode: AstNode {
    fn expression(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        let node = file.ts_node(self.id())?;
        let expression = expression_of(node).ok_or_else(|| {
            MorphError::not_found(format!("node {} has no expression", self.id()))
        })?;
        Ok(file.wrap(expression))
    }

    fn set_expression(&self, file: &mut SourceFile, text: &str) -> MorphResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MorphError::invalid_operation("an expression cannot be empty"));
        }
        let expression = self.expression(file)?;
        if expression.text(file)? != text {
            replace_node_text(file, expression.id(), text)?;
        }
        Ok(*self)
    }
}

fn expression_of(node: Node) -> Option<Node> {
    match SyntaxKind::of(node) {
        SyntaxKind::CallExpression => node.child_by_field_name("function"),
        SyntaxKind::PropertyAccessExpression => node.child_by_field_name("object"),
        _ => {
            let mut cursor = node.walk();
            let expression = node
                .named_children(&mut cursor)
                .find(|child| !child.is_extra());
            expression
        }
    }
}
