//! Node handles and navigation.
//!
//! A handle is a [`NodeId`] into the arena of the [`SourceFile`] that owns
//! the node. Handles carry no tree state of their own: every query resolves
//! the handle against the current tree, so a handle is either answered from
//! live data or rejected with [`MorphError::InvalidNode`].

pub(crate) mod arena;
pub(crate) mod navigation;

use std::fmt;

use crate::binder::SymbolId;
use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::syntax::SyntaxKind;

pub(crate) use arena::{Anchor, NodeArena, find_anchor};

/// Generational index of a node in its source file's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// Navigation shared by every node type.
///
/// All methods take the owning [`SourceFile`]; a handle used with a file
/// other than the one that created it yields unspecified nodes or
/// [`MorphError::InvalidNode`].
pub trait AstNode: Copy {
    /// Whether a node of `kind` can be viewed as `Self`.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// View a handle as `Self` without checking its kind.
    fn from_id(id: NodeId) -> Self;

    fn id(&self) -> NodeId;

    /// View `id` as `Self` when its kind allows it.
    fn cast(file: &SourceFile, id: NodeId) -> MorphResult<Option<Self>> {
        let kind = file.kind_of(id)?;
        Ok(Self::can_cast(kind).then(|| Self::from_id(id)))
    }

    fn cast_or_throw(file: &SourceFile, id: NodeId) -> MorphResult<Self> {
        let kind = file.kind_of(id)?;
        if Self::can_cast(kind) {
            Ok(Self::from_id(id))
        } else {
            Err(MorphError::not_found(format!(
                "node {id} has unexpected kind {kind:?}"
            )))
        }
    }

    fn kind(&self, file: &SourceFile) -> MorphResult<SyntaxKind> {
        file.kind_of(self.id())
    }

    /// Source text of the node, including modifiers hoisted in front of it.
    fn text<'f>(&self, file: &'f SourceFile) -> MorphResult<&'f str> {
        let (start, end) = file.logical_range(self.id())?;
        Ok(&file.text()[start..end])
    }

    fn start(&self, file: &SourceFile) -> MorphResult<usize> {
        Ok(file.logical_range(self.id())?.0)
    }

    fn end(&self, file: &SourceFile) -> MorphResult<usize> {
        Ok(file.logical_range(self.id())?.1)
    }

    fn parent(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        file.parent_of(self.id())
    }

    fn parent_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.parent(file)?.ok_or_else(|| {
            MorphError::not_found(format!("node {} has no parent", self.id()))
        })
    }

    fn is_source_file(&self, file: &SourceFile) -> MorphResult<bool> {
        Ok(self.kind(file)? == SyntaxKind::SourceFile)
    }

    fn children(&self, file: &SourceFile) -> MorphResult<Vec<AnyNode>> {
        file.children_of(self.id())
    }

    fn next_sibling(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        file.sibling_of(self.id(), 1)
    }

    fn previous_sibling(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        file.sibling_of(self.id(), -1)
    }

    /// Logical ancestors, nearest first, ending with the source file.
    fn ancestors(&self, file: &SourceFile) -> MorphResult<Vec<AnyNode>> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(file)?;
        while let Some(node) = current {
            ancestors.push(node);
            current = node.parent(file)?;
        }
        Ok(ancestors)
    }

    /// Descendants of `kind` in document order, keyword tokens included.
    fn descendants_of_kind(&self, file: &SourceFile, kind: SyntaxKind) -> MorphResult<Vec<AnyNode>> {
        file.descendants_of(self.id(), kind, usize::MAX)
    }

    fn first_descendant_by_kind(
        &self,
        file: &SourceFile,
        kind: SyntaxKind,
    ) -> MorphResult<Option<AnyNode>> {
        Ok(file.descendants_of(self.id(), kind, 1)?.into_iter().next())
    }

    fn first_descendant_by_kind_or_throw(
        &self,
        file: &SourceFile,
        kind: SyntaxKind,
    ) -> MorphResult<AnyNode> {
        self.first_descendant_by_kind(file, kind)?.ok_or_else(|| {
            MorphError::not_found(format!("no descendant of kind {kind:?} under {}", self.id()))
        })
    }

    /// Symbol declared by this node, or referenced by it for identifiers.
    fn symbol(&self, file: &SourceFile) -> MorphResult<Option<SymbolId>> {
        file.symbol_of(self.id())
    }

    fn is_valid(&self, file: &SourceFile) -> bool {
        file.is_valid(self.id())
    }
}

/// A node of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnyNode(NodeId);

impl AstNode for AnyNode {
    fn can_cast(_kind: SyntaxKind) -> bool {
        true
    }

    fn from_id(id: NodeId) -> Self {
        AnyNode(id)
    }

    fn id(&self) -> NodeId {
        self.0
    }
}

impl AnyNode {
    /// View this node as a more specific type when its kind allows it.
    pub fn downcast<T: AstNode>(self, file: &SourceFile) -> MorphResult<Option<T>> {
        T::cast(file, self.0)
    }
}

impl From<AnyNode> for NodeId {
    fn from(node: AnyNode) -> Self {
        node.0
    }
}
