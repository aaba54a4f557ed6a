use super::ast_node;
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::node::{AnyNode, AstNode};
use crate::syntax::SyntaxKind;
use crate::traits::{ExpressionedNode, NamedNode};

ast_node!(
    /// `callee(args)`. The expression of `import(x)` is `import`.
    CallExpression,
    SyntaxKind::CallExpression
);

ast_node!(
    /// `object.name`. The expression of `super.x` is `super`.
    PropertyAccessExpression,
    SyntaxKind::PropertyAccessExpression
);

ast_node!(ExpressionStatement, SyntaxKind::ExpressionStatement);

impl ExpressionedNode for CallExpression {}

impl CallExpression {
    pub fn arguments(&self, file: &SourceFile) -> MorphResult<Vec<AnyNode>> {
        let node = file.ts_node(self.id())?;
        let Some(arguments) = node.child_by_field_name("arguments") else {
            return Ok(Vec::new());
        };
        let mut cursor = arguments.walk();
        let wrapped = arguments
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .map(|child| file.wrap(child))
            .collect();
        Ok(wrapped)
    }
}

impl ExpressionedNode for PropertyAccessExpression {}
impl NamedNode for PropertyAccessExpression {}

impl ExpressionedNode for ExpressionStatement {}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<T: AstNode>(file: &SourceFile, kind: SyntaxKind) -> T {
        let node = file
            .root()
            .first_descendant_by_kind_or_throw(file, kind)
            .unwrap();
        T::cast_or_throw(file, node.id()).unwrap()
    }

    #[test]
    fn test_dynamic_import_callee() {
        let file = SourceFile::from_text("a.ts", "import(x)").unwrap();
        let call: CallExpression = first(&file, SyntaxKind::CallExpression);
        assert_eq!(call.expression(&file).unwrap().text(&file).unwrap(), "import");
        assert_eq!(call.arguments(&file).unwrap().len(), 1);
    }

    #[test]
    fn test_super_property_access() {
        let file = SourceFile::from_text("a.ts", "super.x").unwrap();
        let access: PropertyAccessExpression =
            first(&file, SyntaxKind::PropertyAccessExpression);
        assert_eq!(access.expression(&file).unwrap().text(&file).unwrap(), "super");
        assert_eq!(access.name(&file).unwrap(), "x");
    }

    #[test]
    fn test_set_expression_of_statement() {
        let mut file = SourceFile::from_text("a.ts", "foo();\n").unwrap();
        let statement: ExpressionStatement = first(&file, SyntaxKind::ExpressionStatement);
        assert_eq!(statement.expression(&file).unwrap().text(&file).unwrap(), "foo()");
        statement.set_expression(&mut file, "bar(1)").unwrap();
        assert_eq!(file.text(), "bar(1);\n");
        assert!(statement.is_valid(&file));
    }
}
