use super::{Fill, ast_node};
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::node::AstNode;
use crate::structures::ParameterDeclarationStructure;
use crate::syntax::SyntaxKind;
use crate::traits::{DeclarationNamedNode, InitializerExpressionableNode, NamedNode, TypedNode};

ast_node!(
    /// A function parameter: `a`, `a?: T`, `a = 1` or `...rest`.
    ParameterDeclaration,
    SyntaxKind::Parameter
);

impl NamedNode for ParameterDeclaration {}
impl DeclarationNamedNode for ParameterDeclaration {}
impl InitializerExpressionableNode for ParameterDeclaration {}
impl TypedNode for ParameterDeclaration {}

impl ParameterDeclaration {
    pub fn is_rest_parameter(&self, file: &SourceFile) -> MorphResult<bool> {
        let node = file.ts_node(self.id())?;
        Ok(node
            .child_by_field_name("pattern")
            .is_some_and(|pattern| pattern.kind() == "rest_pattern"))
    }

    /// Declared with `?`, with an initializer, or as a rest parameter.
    pub fn is_optional(&self, file: &SourceFile) -> MorphResult<bool> {
        let node = file.ts_node(self.id())?;
        Ok(node.kind() == "optional_parameter"
            || node.child_by_field_name("value").is_some()
            || self.is_rest_parameter(file)?)
    }
}

impl Fill for ParameterDeclaration {
    type Structure = ParameterDeclarationStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_named(file, &structure.named)?;
        self.fill_initializer(file, &structure.initializer)?;
        self.fill_typed(file, &structure.typed)?;
        Ok(*self)
    }
}
