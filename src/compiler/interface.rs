use super::{Fill, ast_node};
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::structures::InterfaceDeclarationStructure;
use crate::syntax::SyntaxKind;
use crate::traits::{AmbientableNode, ExportableNode, ModifierableNode, NamedNode};

ast_node!(InterfaceDeclaration, SyntaxKind::InterfaceDeclaration);

impl ModifierableNode for InterfaceDeclaration {}
impl NamedNode for InterfaceDeclaration {}
impl ExportableNode for InterfaceDeclaration {}
impl AmbientableNode for InterfaceDeclaration {}

impl Fill for InterfaceDeclaration {
    type Structure = InterfaceDeclarationStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_named(file, &structure.named)?;
        self.fill_exportable(file, &structure.exportable)?;
        self.fill_ambientable(file, &structure.ambientable)?;
        Ok(*self)
    }
}
