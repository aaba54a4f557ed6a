use super::{Fill, ast_node};
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::structures::EnumDeclarationStructure;
use crate::syntax::{ModifierKind, SyntaxKind};
use crate::traits::{AmbientableNode, ExportableNode, ModifierableNode, NamedNode};

ast_node!(EnumDeclaration, SyntaxKind::EnumDeclaration);

impl ModifierableNode for EnumDeclaration {}
impl NamedNode for EnumDeclaration {}
impl ExportableNode for EnumDeclaration {}
impl AmbientableNode for EnumDeclaration {}

impl EnumDeclaration {
    /// `const enum E {}`
    pub fn is_const_enum(&self, file: &SourceFile) -> MorphResult<bool> {
        self.has_modifier(file, ModifierKind::Const)
    }

    pub fn set_is_const_enum(&self, file: &mut SourceFile, value: bool) -> MorphResult<Self> {
        self.toggle_modifier(file, ModifierKind::Const, Some(value))
    }
}

impl Fill for EnumDeclaration {
    type Structure = EnumDeclarationStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_named(file, &structure.named)?;
        self.fill_exportable(file, &structure.exportable)?;
        self.fill_ambientable(file, &structure.ambientable)?;
        if let Some(value) = structure.is_const {
            self.set_is_const_enum(file, value)?;
        }
        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_enum() {
        let mut file = SourceFile::from_text("a.ts", "export enum E { A }\n").unwrap();
        let e = file.enum_("E").unwrap().unwrap();
        assert!(!e.is_const_enum(&file).unwrap());
        e.set_is_const_enum(&mut file, true).unwrap();
        assert_eq!(file.text(), "export const enum E { A }\n");
        assert!(e.is_const_enum(&file).unwrap());
        assert!(e.is_named_export(&file).unwrap());
    }
}
