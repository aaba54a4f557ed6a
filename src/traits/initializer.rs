use tree_sitter::Node;

use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::{TextChange, replace_node_text};
use crate::node::{AnyNode, AstNode};
use crate::structures::InitializerExpressionableNodeStructure;
use crate::syntax::SyntaxKind;

/// Nodes with an optional `= value`.
pub trait InitializerExpressionableNode: AstNode {
    fn initializer(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        let node = file.ts_node(self.id())?;
        Ok(node
            .child_by_field_name("value")
            .map(|value| file.wrap(value)))
    }

    fn initializer_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.initializer(file)?.ok_or_else(|| {
            MorphError::not_found(format!("node {} has no initializer", self.id()))
        })
    }

    fn has_initializer(&self, file: &SourceFile) -> MorphResult<bool> {
        Ok(self.initializer(file)?.is_some())
    }

    fn set_initializer(&self, file: &mut SourceFile, text: &str) -> MorphResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MorphError::invalid_operation(
                "an initializer cannot be empty; remove it instead",
            ));
        }

        if let Some(current) = self.initializer(file)? {
            if current.text(file)? != text {
                replace_node_text(file, current.id(), text)?;
            }
            return Ok(*self);
        }

        let position = initializer_insertion_point(file.ts_node(self.id())?)?;
        file.apply_changes(vec![TextChange::insert(position, format!(" = {text}"))])?;
        Ok(*self)
    }

    /// Remove `= value`, including the whitespace before `=`.
    fn remove_initializer(&self, file: &mut SourceFile) -> MorphResult<Self> {
        let node = file.ts_node(self.id())?;
        let Some(value) = node.child_by_field_name("value") else {
            return Ok(*self);
        };
        let start = value
            .prev_sibling()
            .filter(|sibling| sibling.kind() == "=")
            .and_then(|equals| equals.prev_sibling())
            .map_or(value.start_byte(), |before| before.end_byte());
        let end = value.end_byte();
        file.apply_changes(vec![TextChange::remove(start, end)])?;
        Ok(*self)
    }

    fn fill_initializer(
        &self,
        file: &mut SourceFile,
        structure: &InitializerExpressionableNodeStructure,
    ) -> MorphResult<()> {
        match &structure.initializer {
            Some(Some(text)) => {
                self.set_initializer(file, text)?;
            }
            Some(None) => {
                self.remove_initializer(file)?;
            }
            None => {}
        }
        Ok(())
    }
}

/// Where ` = value` goes: after the type annotation, or after the name.
fn initializer_insertion_point(node: Node) -> MorphResult<usize> {
    if let Some(annotation) = node.child_by_field_name("type") {
        return Ok(annotation.end_byte());
    }
    let name = match SyntaxKind::of(node) {
        SyntaxKind::Parameter => node.child_by_field_name("pattern"),
        _ => node.child_by_field_name("name"),
    }
    .ok_or_else(|| MorphError::invalid_operation("node has no name to initialize"))?;
    let question = name.next_sibling().filter(|sibling| sibling.kind() == "?");
    Ok(question.unwrap_or(name).end_byte())
}
