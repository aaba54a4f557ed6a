use std::fmt;

use super::{Fill, ast_node};
use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::TextChange;
use crate::node::AstNode;
use crate::structures::{VariableDeclarationStructure, VariableStatementStructure};
use crate::syntax::SyntaxKind;
use crate::traits::{
    AmbientableNode, DeclarationNamedNode, ExportableNode, InitializerExpressionableNode,
    ModifierableNode, NamedNode, TypedNode,
};

ast_node!(
    /// `let a = 1, b;` as a whole.
    VariableStatement,
    SyntaxKind::VariableStatement
);

ast_node!(
    /// One binding of a variable statement.
    VariableDeclaration,
    SyntaxKind::VariableDeclaration
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableDeclarationKind {
    Var,
    Let,
    Const,
}

impl VariableDeclarationKind {
    fn keyword(self) -> &'static str {
        match self {
            VariableDeclarationKind::Var => "var",
            VariableDeclarationKind::Let => "let",
            VariableDeclarationKind::Const => "const",
        }
    }
}

impl fmt::Display for VariableDeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl ModifierableNode for VariableStatement {}
impl ExportableNode for VariableStatement {}
impl AmbientableNode for VariableStatement {}

impl VariableStatement {
    pub fn declarations(&self, file: &SourceFile) -> MorphResult<Vec<VariableDeclaration>> {
        let node = file.ts_node(self.id())?;
        let mut cursor = node.walk();
        let declarations = node
            .named_children(&mut cursor)
            .filter(|child| SyntaxKind::of(*child) == SyntaxKind::VariableDeclaration)
            .map(|child| VariableDeclaration::from_id(file.wrap(child).id()))
            .collect();
        Ok(declarations)
    }

    pub fn declaration_kind(&self, file: &SourceFile) -> MorphResult<VariableDeclarationKind> {
        let node = file.ts_node(self.id())?;
        let keyword = node.child(0).map(|token| token.kind());
        match keyword {
            Some("var") => Ok(VariableDeclarationKind::Var),
            Some("let") => Ok(VariableDeclarationKind::Let),
            Some("const") => Ok(VariableDeclarationKind::Const),
            other => Err(MorphError::not_found(format!(
                "unexpected declaration keyword {other:?}"
            ))),
        }
    }

    pub fn set_declaration_kind(
        &self,
        file: &mut SourceFile,
        kind: VariableDeclarationKind,
    ) -> MorphResult<Self> {
        if self.declaration_kind(file)? == kind {
            return Ok(*self);
        }
        let node = file.ts_node(self.id())?;
        let Some(keyword) = node.child(0) else {
            return Err(MorphError::not_found("variable statement has no keyword"));
        };
        let (start, end) = (keyword.start_byte(), keyword.end_byte());
        file.apply_changes(vec![TextChange::replace(start, end, kind.keyword())])?;
        Ok(*self)
    }
}

impl Fill for VariableStatement {
    type Structure = VariableStatementStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_exportable(file, &structure.exportable)?;
        self.fill_ambientable(file, &structure.ambientable)?;
        Ok(*self)
    }
}

impl NamedNode for VariableDeclaration {}
impl DeclarationNamedNode for VariableDeclaration {}
impl TypedNode for VariableDeclaration {}
impl InitializerExpressionableNode for VariableDeclaration {}

impl VariableDeclaration {
    /// The statement declaring this binding.
    pub fn variable_statement(&self, file: &SourceFile) -> MorphResult<VariableStatement> {
        let parent = self.parent_or_throw(file)?;
        VariableStatement::cast_or_throw(file, parent.id())
    }
}

impl Fill for VariableDeclaration {
    type Structure = VariableDeclarationStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_named(file, &structure.named)?;
        self.fill_typed(file, &structure.typed)?;
        self.fill_initializer(file, &structure.initializer)?;
        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_and_kind() {
        let file = SourceFile::from_text("a.ts", "export let a = 1, b;\n").unwrap();
        let statement = file.variable_statements().unwrap()[0];
        let declarations = statement.declarations(&file).unwrap();
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[1].name(&file).unwrap(), "b");
        assert_eq!(
            statement.declaration_kind(&file).unwrap(),
            VariableDeclarationKind::Let
        );
        assert_eq!(
            declarations[0].variable_statement(&file).unwrap(),
            statement
        );
        assert!(statement.is_named_export(&file).unwrap());
    }

    #[test]
    fn test_set_declaration_kind() {
        let mut file = SourceFile::from_text("a.ts", "let a = 1;\n").unwrap();
        let statement = file.variable_statements().unwrap()[0];
        statement
            .set_declaration_kind(&mut file, VariableDeclarationKind::Const)
            .unwrap();
        assert_eq!(file.text(), "const a = 1;\n");
        assert!(statement.is_valid(&file));
    }
}
