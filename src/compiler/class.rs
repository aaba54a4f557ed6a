use super::{Fill, ast_node};
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::structures::ClassDeclarationStructure;
use crate::syntax::SyntaxKind;
use crate::traits::{
    AbstractableNode, AmbientableNode, ExportableNode, ModifierableNode, NamedNode,
};

ast_node!(
    /// `class A {}`, `abstract class A {}` or a default-exported class.
    ClassDeclaration,
    SyntaxKind::ClassDeclaration
);

impl ModifierableNode for ClassDeclaration {}
impl NamedNode for ClassDeclaration {}
impl ExportableNode for ClassDeclaration {}
impl AbstractableNode for ClassDeclaration {}
impl AmbientableNode for ClassDeclaration {}

impl Fill for ClassDeclaration {
    type Structure = ClassDeclarationStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_named(file, &structure.named)?;
        self.fill_exportable(file, &structure.exportable)?;
        self.fill_abstractable(file, &structure.abstractable)?;
        self.fill_ambientable(file, &structure.ambientable)?;
        Ok(*self)
    }
}
