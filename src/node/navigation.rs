use tree_sitter::Node;

use super::{AnyNode, AstNode, NodeId};
use crate::binder::SymbolId;
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::syntax::{SyntaxKind, carried_declaration, carrier_of};

/// The declaration a node stands for: carriers resolve to what they carry.
pub(crate) fn logical(mut node: Node) -> Node {
    while let Some(declaration) = carried_declaration(node) {
        node = declaration;
    }
    node
}

/// The outermost carrier hoisting keywords onto `node`, or `node` itself.
pub(crate) fn outermost(mut node: Node) -> Node {
    while let Some(carrier) = carrier_of(node) {
        node = carrier;
    }
    node
}

impl SourceFile {
    pub(crate) fn kind_of(&self, id: NodeId) -> MorphResult<SyntaxKind> {
        self.ensure_usable()?;
        Ok(self
            .arena
            .borrow()
            .anchor(id)?
            .map_or(SyntaxKind::SourceFile, |anchor| anchor.kind))
    }

    /// Byte range of the node including hoisted modifiers and decorators.
    pub(crate) fn logical_range(&self, id: NodeId) -> MorphResult<(usize, usize)> {
        let node = self.ts_node(id)?;
        let outer = outermost(node);
        Ok((outer.start_byte(), outer.end_byte().max(node.end_byte())))
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> MorphResult<Option<AnyNode>> {
        let node = self.ts_node(id)?;
        Ok(outermost(node).parent().map(|parent| self.wrap(parent)))
    }

    pub(crate) fn children_of(&self, id: NodeId) -> MorphResult<Vec<AnyNode>> {
        let node = self.ts_node(id)?;
        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .map(|child| self.wrap(child))
            .collect();
        Ok(children)
    }

    /// The sibling `offset` positions away among the parent's children.
    pub(crate) fn sibling_of(&self, id: NodeId, offset: isize) -> MorphResult<Option<AnyNode>> {
        let Some(parent) = self.parent_of(id)? else {
            return Ok(None);
        };
        let siblings = self.children_of(parent.id())?;
        let sibling = siblings
            .iter()
            .position(|sibling| sibling.id() == id)
            .and_then(|position| position.checked_add_signed(offset))
            .and_then(|position| siblings.get(position).copied());
        Ok(sibling)
    }

    /// Up to `limit` descendants of `kind` in document order.
    pub(crate) fn descendants_of(
        &self,
        id: NodeId,
        kind: SyntaxKind,
        limit: usize,
    ) -> MorphResult<Vec<AnyNode>> {
        let node = self.ts_node(id)?;
        let mut found = Vec::new();
        if kind == SyntaxKind::ModifierCarrier || limit == 0 {
            return Ok(found);
        }

        let mut cursor = node.walk();
        loop {
            let advanced = if cursor.goto_first_child() {
                true
            } else {
                loop {
                    if cursor.goto_next_sibling() {
                        break true;
                    }
                    if !cursor.goto_parent() {
                        break false;
                    }
                }
            };
            if !advanced {
                return Ok(found);
            }

            let candidate = cursor.node();
            if SyntaxKind::of(candidate) == kind {
                found.push(self.wrap(candidate));
                if found.len() >= limit {
                    return Ok(found);
                }
            }
        }
    }

    pub(crate) fn symbol_of(&self, id: NodeId) -> MorphResult<Option<SymbolId>> {
        let node = self.ts_node(id)?;
        if node.parent().is_none() {
            return Ok(None);
        }

        if SyntaxKind::of(node) != SyntaxKind::Identifier {
            return Ok(self.symbols.declared_by(&super::Anchor::of(node)));
        }

        // The name of a declaration resolves to what it declares
        let declared = node
            .parent()
            .filter(|parent| {
                parent
                    .child_by_field_name("name")
                    .is_some_and(|name| name.id() == node.id())
            })
            .and_then(|parent| self.symbols.declared_by(&super::Anchor::of(parent)));
        if declared.is_some() {
            return Ok(declared);
        }

        let name = node.utf8_text(self.text.as_bytes()).unwrap_or_default();
        Ok(self.symbols.local(name))
    }
}
