use tree_sitter::Node;

use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::{TextChange, replace_node_text};
use crate::node::{AnyNode, AstNode};
use crate::structures::TypedNodeStructure;
use crate::syntax::SyntaxKind;

/// Nodes with an optional type: `x: T` annotations, or the aliased type of
/// `type A = T`.
pub trait TypedNode: AstNode {
    fn type_node(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        let node = file.ts_node(self.id())?;
        Ok(type_of(node).map(|ty| file.wrap(ty)))
    }

    fn type_node_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.type_node(file)?.ok_or_else(|| {
            MorphError::not_found(format!("node {} has no type", self.id()))
        })
    }

    fn type_text(&self, file: &SourceFile) -> MorphResult<Option<String>> {
        match self.type_node(file)? {
            Some(ty) => Ok(Some(ty.text(file)?.to_string())),
            None => Ok(None),
        }
    }

    /// Set the type. An empty text removes it.
    fn set_type(&self, file: &mut SourceFile, text: &str) -> MorphResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return self.remove_type(file);
        }

        if let Some(current) = self.type_node(file)? {
            if current.text(file)? != text {
                replace_node_text(file, current.id(), text)?;
            }
            return Ok(*self);
        }

        let position = type_insertion_point(file.ts_node(self.id())?)?;
        file.apply_changes(vec![TextChange::insert(position, format!(": {text}"))])?;
        Ok(*self)
    }

    fn remove_type(&self, file: &mut SourceFile) -> MorphResult<Self> {
        let node = file.ts_node(self.id())?;
        if SyntaxKind::of(node) == SyntaxKind::TypeAliasDeclaration {
            return Err(MorphError::invalid_operation(
                "a type alias must have a type",
            ));
        }
        let Some(annotation) = node.child_by_field_name("type") else {
            return Ok(*self);
        };
        let (start, end) = (annotation.start_byte(), annotation.end_byte());
        file.apply_changes(vec![TextChange::remove(start, end)])?;
        Ok(*self)
    }

    fn fill_typed(&self, file: &mut SourceFile, structure: &TypedNodeStructure) -> MorphResult<()> {
        match &structure.type_text {
            Some(Some(text)) => {
                self.set_type(file, text)?;
            }
            Some(None) => {
                self.remove_type(file)?;
            }
            None => {}
        }
        Ok(())
    }
}

/// The type node: the aliased type, or the type inside an annotation.
fn type_of(node: Node) -> Option<Node> {
    match SyntaxKind::of(node) {
        SyntaxKind::TypeAliasDeclaration => node.child_by_field_name("value"),
        _ => node
            .child_by_field_name("type")
            .filter(|annotation| annotation.kind() == "type_annotation")
            .and_then(|annotation| annotation.named_child(0)),
    }
}

/// Where `: T` goes: after the name and an optional `?`.
fn type_insertion_point(node: Node) -> MorphResult<usize> {
    let name = match SyntaxKind::of(node) {
        SyntaxKind::Parameter => node.child_by_field_name("pattern"),
        _ => node.child_by_field_name("name"),
    }
    .ok_or_else(|| MorphError::invalid_operation("node has no name to annotate"))?;

    let question = name
        .next_sibling()
        .filter(|sibling| sibling.kind() == "?");
    Ok(question.unwrap_or(name).end_byte())
}
