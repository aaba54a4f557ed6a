//! Modifier/keyword editor.

use tree_sitter::Node;

use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::{TextChange, remove_nodes};
use crate::node::{AnyNode, AstNode, NodeId};
use crate::syntax::{ModifierKind, SyntaxKind, carrier_of};

/// Nodes with a list of keyword modifiers.
///
/// Keywords hoisted into wrapper statements (`export`, `default`,
/// `declare`) count as modifiers of the declaration they wrap.
pub trait ModifierableNode: AstNode {
    /// Modifier tokens in source order.
    fn modifiers(&self, file: &SourceFile) -> MorphResult<Vec<AnyNode>> {
        let node = file.ts_node(self.id())?;
        Ok(modifier_tokens(node)
            .into_iter()
            .map(|(_, token)| file.wrap(token))
            .collect())
    }

    fn first_modifier_by_kind(
        &self,
        file: &SourceFile,
        kind: ModifierKind,
    ) -> MorphResult<Option<AnyNode>> {
        let node = file.ts_node(self.id())?;
        Ok(modifier_tokens(node)
            .into_iter()
            .find(|(found, _)| *found == kind)
            .map(|(_, token)| file.wrap(token)))
    }

    fn first_modifier_by_kind_or_throw(
        &self,
        file: &SourceFile,
        kind: ModifierKind,
    ) -> MorphResult<AnyNode> {
        self.first_modifier_by_kind(file, kind)?.ok_or_else(|| {
            MorphError::not_found(format!("node {} has no `{kind}` modifier", self.id()))
        })
    }

    fn has_modifier(&self, file: &SourceFile, kind: ModifierKind) -> MorphResult<bool> {
        let node = file.ts_node(self.id())?;
        Ok(modifier_tokens(node).iter().any(|(found, _)| *found == kind))
    }

    /// Add a modifier at its canonical position. Returns the modifier, the
    /// existing one when already present.
    fn add_modifier(&self, file: &mut SourceFile, kind: ModifierKind) -> MorphResult<AnyNode> {
        if let Some(existing) = self.first_modifier_by_kind(file, kind)? {
            return Ok(existing);
        }

        let position = insertion_position(file.ts_node(self.id())?, kind);
        file.apply_changes(vec![TextChange::insert(position, format!("{kind} "))])?;
        self.first_modifier_by_kind_or_throw(file, kind)
    }

    /// Remove a modifier. Returns whether one was present.
    fn remove_modifier(&self, file: &mut SourceFile, kind: ModifierKind) -> MorphResult<bool> {
        match self.first_modifier_by_kind(file, kind)? {
            Some(modifier) => {
                remove_nodes(file, &[modifier.id()])?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Add or remove a modifier; `None` flips the current state.
    fn toggle_modifier(
        &self,
        file: &mut SourceFile,
        kind: ModifierKind,
        value: Option<bool>,
    ) -> MorphResult<Self> {
        let present = self.has_modifier(file, kind)?;
        let wanted = value.unwrap_or(!present);
        if wanted && !present {
            self.add_modifier(file, kind)?;
        } else if !wanted && present {
            self.remove_modifier(file, kind)?;
        }
        Ok(*self)
    }
}

/// Keywords that never appear inside the declaration node itself.
fn is_hoisted(kind: ModifierKind) -> bool {
    matches!(
        kind,
        ModifierKind::Export | ModifierKind::Default | ModifierKind::Declare
    )
}

fn token_modifier(node: Node) -> Option<ModifierKind> {
    SyntaxKind::of(node).modifier()
}

/// Leading modifier tokens of one node, up to its first other child.
fn own_modifiers<'tree>(node: Node<'tree>, declaration: Node<'tree>) -> Vec<(ModifierKind, Node<'tree>)> {
    let mut cursor = node.walk();
    let mut found = Vec::new();
    for child in node.children(&mut cursor) {
        if child.id() == declaration.id() {
            break;
        }
        if child.kind() == "decorator" || child.is_extra() {
            continue;
        }
        match token_modifier(child) {
            // `const x` declares a constant, it does not modify a statement
            Some(ModifierKind::Const) if SyntaxKind::of(node) == SyntaxKind::VariableStatement => {
                break;
            }
            Some(kind) => found.push((kind, child)),
            None => break,
        }
    }
    found
}

/// All modifiers of a declaration: hoisted ones first, outermost carrier
/// first, then the declaration's own.
pub(crate) fn modifier_tokens(node: Node) -> Vec<(ModifierKind, Node)> {
    let mut carriers = Vec::new();
    let mut current = node;
    while let Some(carrier) = carrier_of(current) {
        carriers.push((carrier, current));
        current = carrier;
    }

    let mut tokens = Vec::new();
    for (carrier, carried) in carriers.into_iter().rev() {
        tokens.extend(own_modifiers(carrier, carried));
    }
    tokens.extend(own_modifiers(node, node));
    tokens
}

/// Byte offset where `kind` is inserted to keep canonical order.
fn insertion_position(node: Node, kind: ModifierKind) -> usize {
    let tokens = modifier_tokens(node);
    if let Some((_, next)) = tokens
        .iter()
        .find(|(existing, _)| existing.order() > kind.order())
    {
        return next.start_byte();
    }

    // Hoisted keywords go in front of the whole declaration, decorators
    // included, so the declaration keeps its range
    if is_hoisted(kind) {
        return node.start_byte();
    }

    let own = own_modifiers(node, node);
    let mut cursor = node.walk();
    let anchor = node
        .children(&mut cursor)
        .find(|child| {
            child.kind() != "decorator"
                && !child.is_extra()
                && !own.iter().any(|(_, token)| token.id() == child.id())
        })
        .map_or(node.start_byte(), |child| child.start_byte());
    anchor
}

impl SourceFile {
    /// Modifier kinds of a node, in source order.
    pub fn modifier_kinds(&self, id: NodeId) -> MorphResult<Vec<ModifierKind>> {
        let node = self.ts_node(id)?;
        Ok(modifier_tokens(node).into_iter().map(|(kind, _)| kind).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{ClassDeclaration, FunctionDeclaration};

    fn class(file: &SourceFile) -> ClassDeclaration {
        file.classes().unwrap()[0]
    }

    #[test]
    fn test_hoisted_keywords_are_modifiers() {
        let file = SourceFile::from_text("a.ts", "export declare abstract class A {}").unwrap();
        assert_eq!(
            file.modifier_kinds(class(&file).id()).unwrap(),
            vec![
                ModifierKind::Export,
                ModifierKind::Declare,
                ModifierKind::Abstract
            ]
        );
    }

    #[test]
    fn test_const_is_not_a_statement_modifier() {
        let file = SourceFile::from_text("a.ts", "export const x = 1;").unwrap();
        let statement = file.variable_statements().unwrap()[0];
        assert_eq!(
            file.modifier_kinds(statement.id()).unwrap(),
            vec![ModifierKind::Export]
        );
    }

    #[test]
    fn test_add_modifier_uses_canonical_order() {
        let mut file = SourceFile::from_text("a.ts", "abstract class A {}\n").unwrap();
        let class = class(&file);
        class.add_modifier(&mut file, ModifierKind::Declare).unwrap();
        assert_eq!(file.text(), "declare abstract class A {}\n");
        class.add_modifier(&mut file, ModifierKind::Export).unwrap();
        assert_eq!(file.text(), "export declare abstract class A {}\n");
        assert!(class.is_valid(&file));
    }

    #[test]
    fn test_add_existing_modifier_is_idempotent() {
        let mut file = SourceFile::from_text("a.ts", "export class A {}\n").unwrap();
        let class = class(&file);
        let first = class.add_modifier(&mut file, ModifierKind::Export).unwrap();
        let second = class.add_modifier(&mut file, ModifierKind::Export).unwrap();
        assert_eq!(first, second);
        assert_eq!(file.text(), "export class A {}\n");
        assert_eq!(file.edit_count(), 0);
    }

    #[test]
    fn test_async_goes_before_function_keyword() {
        let mut file = SourceFile::from_text("a.ts", "export function f() {}\n").unwrap();
        let function: FunctionDeclaration = file.functions().unwrap()[0];
        function.add_modifier(&mut file, ModifierKind::Async).unwrap();
        assert_eq!(file.text(), "export async function f() {}\n");
    }

    #[test]
    fn test_remove_modifier_invalidates_keyword() {
        let mut file = SourceFile::from_text("a.ts", "export class A {}\n").unwrap();
        let class = class(&file);
        let keyword = class
            .first_modifier_by_kind_or_throw(&file, ModifierKind::Export)
            .unwrap();
        assert!(class.remove_modifier(&mut file, ModifierKind::Export).unwrap());
        assert_eq!(file.text(), "class A {}\n");
        assert!(!keyword.is_valid(&file));
        assert!(matches!(
            keyword.text(&file),
            Err(MorphError::InvalidNode { .. })
        ));
        assert!(!class.has_modifier(&file, ModifierKind::Export).unwrap());
    }

    #[test]
    fn test_toggle_modifier() {
        let mut file = SourceFile::from_text("a.ts", "class A {}\n").unwrap();
        let class = class(&file);
        class
            .toggle_modifier(&mut file, ModifierKind::Abstract, None)
            .unwrap();
        assert_eq!(file.text(), "abstract class A {}\n");
        class
            .toggle_modifier(&mut file, ModifierKind::Abstract, Some(true))
            .unwrap();
        assert_eq!(file.text(), "abstract class A {}\n");
        class
            .toggle_modifier(&mut file, ModifierKind::Abstract, None)
            .unwrap();
        assert_eq!(file.text(), "class A {}\n");
    }
}
