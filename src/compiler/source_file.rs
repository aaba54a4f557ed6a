use log::debug;
use tree_sitter::Node;

use super::{
    ClassDeclaration, EnumDeclaration, FunctionDeclaration, InterfaceDeclaration,
    TypeAliasDeclaration, VariableDeclaration, VariableStatement,
};
use crate::binder::SymbolId;
use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::removal_changes;
use crate::node::{AnyNode, AstNode, NodeId, find_anchor};
use crate::syntax::{ModifierKind, SyntaxKind};
use crate::traits::NamedNode;
use crate::traits::modifierable::modifier_tokens;

impl SourceFile {
    /// Top-level statements; exported declarations count as the declaration.
    pub fn statements(&self) -> MorphResult<Vec<AnyNode>> {
        self.root().children(self)
    }

    fn statements_of<T: AstNode>(&self) -> MorphResult<Vec<T>> {
        let mut found = Vec::new();
        for statement in self.statements()? {
            if let Some(node) = statement.downcast::<T>(self)? {
                found.push(node);
            }
        }
        Ok(found)
    }

    fn statement_named<T: AstNode + NamedNode>(&self, name: &str) -> MorphResult<Option<T>> {
        for node in self.statements_of::<T>()? {
            if self.name_of(node.id())?.as_deref() == Some(name) {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    pub fn classes(&self) -> MorphResult<Vec<ClassDeclaration>> {
        self.statements_of()
    }

    pub fn class(&self, name: &str) -> MorphResult<Option<ClassDeclaration>> {
        self.statement_named(name)
    }

    pub fn class_or_throw(&self, name: &str) -> MorphResult<ClassDeclaration> {
        self.class(name)?
            .ok_or_else(|| MorphError::not_found(format!("no class named `{name}`")))
    }

    pub fn functions(&self) -> MorphResult<Vec<FunctionDeclaration>> {
        self.statements_of()
    }

    /// First function named `name`; for overloads, the first signature.
    pub fn function(&self, name: &str) -> MorphResult<Option<FunctionDeclaration>> {
        self.statement_named(name)
    }

    pub fn interfaces(&self) -> MorphResult<Vec<InterfaceDeclaration>> {
        self.statements_of()
    }

    pub fn interface(&self, name: &str) -> MorphResult<Option<InterfaceDeclaration>> {
        self.statement_named(name)
    }

    pub fn enums(&self) -> MorphResult<Vec<EnumDeclaration>> {
        self.statements_of()
    }

    pub fn enum_(&self, name: &str) -> MorphResult<Option<EnumDeclaration>> {
        self.statement_named(name)
    }

    pub fn type_aliases(&self) -> MorphResult<Vec<TypeAliasDeclaration>> {
        self.statements_of()
    }

    pub fn type_alias(&self, name: &str) -> MorphResult<Option<TypeAliasDeclaration>> {
        self.statement_named(name)
    }

    pub fn variable_statements(&self) -> MorphResult<Vec<VariableStatement>> {
        self.statements_of()
    }

    pub fn variable_declaration(&self, name: &str) -> MorphResult<Option<VariableDeclaration>> {
        for statement in self.variable_statements()? {
            for declaration in statement.declarations(self)? {
                if self.name_of(declaration.id())?.as_deref() == Some(name) {
                    return Ok(Some(declaration));
                }
            }
        }
        Ok(None)
    }

    /// The symbol exported as `default`, if any.
    pub fn default_export_symbol(&self) -> Option<SymbolId> {
        self.symbols.default_export()
    }

    /// Strip default-export status from whatever holds it.
    ///
    /// `export default X;` statements are removed. An `X as default`
    /// specifier is removed, with its statement when it is the only one.
    /// Declarations lose their `export` and `default` keywords.
    pub fn remove_default_export(&mut self) -> MorphResult<()> {
        self.ensure_usable()?;
        let Some(symbol) = self.default_export_symbol() else {
            return Ok(());
        };
        let anchors = self
            .symbols
            .symbol(symbol)
            .map(|symbol| symbol.declarations().to_vec())
            .unwrap_or_default();

        let mut spans: Vec<(usize, usize)> = Vec::new();
        let root = self.tree.root_node();
        for anchor in anchors {
            let Some(declaration) = find_anchor(root, &anchor) else {
                continue;
            };
            match anchor.kind {
                SyntaxKind::ExportAssignment => {
                    spans.push(self.removal_span(self.wrap(declaration).id())?)
                }
                SyntaxKind::ExportSpecifier => match specifier_removal(self, declaration) {
                    SpecifierRemoval::Statement(statement) => {
                        spans.push(self.removal_span(statement)?)
                    }
                    SpecifierRemoval::Range(start, end) => spans.push((start, end)),
                },
                _ => {
                    for (kind, keyword) in modifier_tokens(declaration) {
                        if matches!(kind, ModifierKind::Export | ModifierKind::Default) {
                            spans.push(self.removal_span(self.wrap(keyword).id())?);
                        }
                    }
                }
            }
        }

        debug!(
            target: "katachi::manipulation",
            "Removing default export of {}: {} ranges",
            self.name,
            spans.len()
        );
        self.apply_changes(removal_changes(spans))
    }
}

enum SpecifierRemoval {
    Statement(NodeId),
    Range(usize, usize),
}

/// What to delete to drop one specifier from `export { ... }`.
fn specifier_removal(file: &SourceFile, specifier: Node) -> SpecifierRemoval {
    let clause = specifier.parent();
    let siblings: Vec<Node> = clause
        .map(|clause| {
            let mut cursor = clause.walk();
            clause
                .named_children(&mut cursor)
                .filter(|child| child.kind() == "export_specifier")
                .collect()
        })
        .unwrap_or_default();

    let statement = clause.and_then(|clause| clause.parent());
    if siblings.len() <= 1 {
        if let Some(statement) = statement {
            return SpecifierRemoval::Statement(file.wrap(statement).id());
        }
    }

    let position = siblings
        .iter()
        .position(|sibling| sibling.id() == specifier.id())
        .unwrap_or(0);
    match siblings.get(position + 1) {
        // `a, b` -> drop through the start of the next specifier
        Some(next) => SpecifierRemoval::Range(specifier.start_byte(), next.start_byte()),
        // last one: drop from the end of the previous specifier
        None => {
            let start = position
                .checked_sub(1)
                .and_then(|previous| siblings.get(previous))
                .map_or(specifier.start_byte(), |previous| previous.end_byte());
            SpecifierRemoval::Range(start, specifier.end_byte())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ExportableNode;

    #[test]
    fn test_statement_lookups() {
        let file = SourceFile::from_text(
            "a.ts",
            "export class A {}\nfunction f() {}\ninterface I {}\nenum E { X }\ntype T = string;\nconst v = 1;\n",
        )
        .unwrap();
        assert_eq!(file.statements().unwrap().len(), 6);
        assert_eq!(file.classes().unwrap().len(), 1);
        assert!(file.function("f").unwrap().is_some());
        assert!(file.interface("I").unwrap().is_some());
        assert!(file.enum_("E").unwrap().is_some());
        assert!(file.type_alias("T").unwrap().is_some());
        assert!(file.variable_declaration("v").unwrap().is_some());
        assert!(file.class("Missing").unwrap().is_none());
        assert!(matches!(
            file.class_or_throw("Missing"),
            Err(MorphError::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_default_export_assignment() {
        let mut file = SourceFile::from_text("a.ts", "class Foo {}\nexport default Foo;\n").unwrap();
        let foo = file.class_or_throw("Foo").unwrap();
        file.remove_default_export().unwrap();
        assert_eq!(file.text(), "class Foo {}\n");
        assert!(file.default_export_symbol().is_none());
        assert!(foo.is_valid(&file));
    }

    #[test]
    fn test_remove_default_export_keywords() {
        let mut file = SourceFile::from_text("a.ts", "export default function f() {}\n").unwrap();
        file.remove_default_export().unwrap();
        assert_eq!(file.text(), "function f() {}\n");
        assert_eq!(file.edit_count(), 1);
    }

    #[test]
    fn test_remove_only_default_specifier_removes_statement() {
        let mut file =
            SourceFile::from_text("a.ts", "class Foo {}\nexport { Foo as default };\n").unwrap();
        file.remove_default_export().unwrap();
        assert_eq!(file.text(), "class Foo {}\n");
    }

    #[test]
    fn test_remove_default_specifier_keeps_others() {
        let mut file = SourceFile::from_text(
            "a.ts",
            "class Foo {}\nclass Bar {}\nexport { Bar, Foo as default };\n",
        )
        .unwrap();
        let foo = file.class_or_throw("Foo").unwrap();
        assert!(foo.is_default_export(&file).unwrap());
        file.remove_default_export().unwrap();
        assert_eq!(file.text(), "class Foo {}\nclass Bar {}\nexport { Bar };\n");
        assert!(!foo.is_default_export(&file).unwrap());
    }
}
