use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::node::{AnyNode, AstNode};
use crate::structures::AmbientableNodeStructure;
use crate::syntax::{ModifierKind, SyntaxKind};
use crate::traits::ModifierableNode;

/// Declarations that can be ambient (`declare`).
pub trait AmbientableNode: ModifierableNode {
    fn has_declare_keyword(&self, file: &SourceFile) -> MorphResult<bool> {
        self.has_modifier(file, ModifierKind::Declare)
    }

    fn declare_keyword(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        self.first_modifier_by_kind(file, ModifierKind::Declare)
    }

    fn declare_keyword_or_throw(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.first_modifier_by_kind_or_throw(file, ModifierKind::Declare)
    }

    /// Ambient when declared with `declare`, inside an ambient declaration,
    /// or in a declaration file. Interfaces and type aliases always are.
    fn is_ambient(&self, file: &SourceFile) -> MorphResult<bool> {
        if self.has_declare_keyword(file)?
            || matches!(
                self.kind(file)?,
                SyntaxKind::InterfaceDeclaration | SyntaxKind::TypeAliasDeclaration
            )
        {
            return Ok(true);
        }

        for ancestor in self.ancestors(file)? {
            if file
                .modifier_kinds(ancestor.id())?
                .contains(&ModifierKind::Declare)
            {
                return Ok(true);
            }
        }
        Ok(file.is_declaration_file())
    }

    fn set_has_declare_keyword(&self, file: &mut SourceFile, value: bool) -> MorphResult<Self> {
        self.toggle_modifier(file, ModifierKind::Declare, Some(value))
    }

    fn fill_ambientable(
        &self,
        file: &mut SourceFile,
        structure: &AmbientableNodeStructure,
    ) -> MorphResult<()> {
        if let Some(value) = structure.has_declare_keyword {
            self.set_has_declare_keyword(file, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_keyword_makes_ambient() {
        let file = SourceFile::from_text("a.ts", "declare class A {}\nclass B {}\n").unwrap();
        let a = file.class_or_throw("A").unwrap();
        let b = file.class_or_throw("B").unwrap();
        assert!(a.has_declare_keyword(&file).unwrap());
        assert!(a.is_ambient(&file).unwrap());
        assert!(!b.is_ambient(&file).unwrap());
    }

    #[test]
    fn test_declaration_file_is_ambient() {
        let file = SourceFile::from_text("lib.d.ts", "class A {}\n").unwrap();
        let a = file.class_or_throw("A").unwrap();
        assert!(!a.has_declare_keyword(&file).unwrap());
        assert!(a.is_ambient(&file).unwrap());
    }

    #[test]
    fn test_interfaces_are_always_ambient() {
        let file = SourceFile::from_text("a.ts", "interface I {}\n").unwrap();
        let interface = file.interface("I").unwrap().unwrap();
        assert!(interface.is_ambient(&file).unwrap());
    }

    #[test]
    fn test_set_has_declare_keyword() {
        let mut file = SourceFile::from_text("a.ts", "export class A {}\n").unwrap();
        let a = file.class_or_throw("A").unwrap();
        a.set_has_declare_keyword(&mut file, true).unwrap();
        assert_eq!(file.text(), "export declare class A {}\n");
        a.set_has_declare_keyword(&mut file, false).unwrap();
        assert_eq!(file.text(), "export class A {}\n");
    }
}
