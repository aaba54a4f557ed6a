use super::{Fill, ast_node};
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::structures::TypeAliasDeclarationStructure;
use crate::syntax::SyntaxKind;
use crate::traits::{AmbientableNode, ExportableNode, ModifierableNode, NamedNode, TypedNode};

ast_node!(TypeAliasDeclaration, SyntaxKind::TypeAliasDeclaration);

impl ModifierableNode for TypeAliasDeclaration {}
impl NamedNode for TypeAliasDeclaration {}
impl TypedNode for TypeAliasDeclaration {}
impl ExportableNode for TypeAliasDeclaration {}
impl AmbientableNode for TypeAliasDeclaration {}

impl Fill for TypeAliasDeclaration {
    type Structure = TypeAliasDeclarationStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_named(file, &structure.named)?;
        self.fill_typed(file, &structure.typed)?;
        self.fill_exportable(file, &structure.exportable)?;
        self.fill_ambientable(file, &structure.ambientable)?;
        Ok(*self)
    }
}
