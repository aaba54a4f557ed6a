use super::{Fill, ParameterDeclaration, ast_node};
use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::node::AstNode;
use crate::structures::FunctionDeclarationStructure;
use crate::syntax::SyntaxKind;
use crate::traits::{AmbientableNode, AsyncableNode, ExportableNode, ModifierableNode, NamedNode};

ast_node!(
    /// A function declaration, overload signature or default-exported
    /// function.
    FunctionDeclaration,
    SyntaxKind::FunctionDeclaration
);

impl ModifierableNode for FunctionDeclaration {}
impl NamedNode for FunctionDeclaration {}
impl ExportableNode for FunctionDeclaration {}
impl AsyncableNode for FunctionDeclaration {}
impl AmbientableNode for FunctionDeclaration {}

impl FunctionDeclaration {
    pub fn parameters(&self, file: &SourceFile) -> MorphResult<Vec<ParameterDeclaration>> {
        let node = file.ts_node(self.id())?;
        let Some(list) = node.child_by_field_name("parameters") else {
            return Ok(Vec::new());
        };
        let mut cursor = list.walk();
        let parameters = list
            .named_children(&mut cursor)
            .filter(|child| SyntaxKind::of(*child) == SyntaxKind::Parameter)
            .map(|child| ParameterDeclaration::from_id(file.wrap(child).id()))
            .collect();
        Ok(parameters)
    }

    pub fn parameter(&self, file: &SourceFile, name: &str) -> MorphResult<Option<ParameterDeclaration>> {
        for parameter in self.parameters(file)? {
            if file.name_of(parameter.id())?.as_deref() == Some(name) {
                return Ok(Some(parameter));
            }
        }
        Ok(None)
    }

    /// Overload signatures have no body.
    pub fn is_overload(&self, file: &SourceFile) -> MorphResult<bool> {
        let node = file.ts_node(self.id())?;
        Ok(node.child_by_field_name("body").is_none())
    }
}

impl Fill for FunctionDeclaration {
    type Structure = FunctionDeclarationStructure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self> {
        self.fill_named(file, &structure.named)?;
        self.fill_exportable(file, &structure.exportable)?;
        self.fill_asyncable(file, &structure.asyncable)?;
        self.fill_ambientable(file, &structure.ambientable)?;
        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_in_order() {
        let file =
            SourceFile::from_text("a.ts", "function f(a: string, b?: number, ...rest: any[]) {}\n")
                .unwrap();
        let f = file.function("f").unwrap().unwrap();
        let names: Vec<String> = f
            .parameters(&file)
            .unwrap()
            .iter()
            .map(|p| p.name(&file).unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "rest"]);
        assert!(f.parameter(&file, "b").unwrap().is_some());
        assert!(!f.is_overload(&file).unwrap());
    }

    #[test]
    fn test_set_is_async() {
        let mut file = SourceFile::from_text("a.ts", "function f() {}\n").unwrap();
        let f = file.function("f").unwrap().unwrap();
        f.set_is_async(&mut file, true).unwrap();
        assert_eq!(file.text(), "async function f() {}\n");
        assert!(f.is_async(&file).unwrap());
        f.set_is_async(&mut file, false).unwrap();
        assert_eq!(file.text(), "function f() {}\n");
    }
}
