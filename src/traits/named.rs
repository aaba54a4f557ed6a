use tree_sitter::Node;

use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::manipulation::TextChange;
use crate::node::{AnyNode, AstNode, NodeId};
use crate::structures::NamedNodeStructure;
use crate::syntax::SyntaxKind;

/// Nodes with a name.
pub trait NamedNode: AstNode {
    fn name_node_if_exists(&self, file: &SourceFile) -> MorphResult<Option<AnyNode>> {
        let node = file.ts_node(self.id())?;
        Ok(name_of(node)
            .filter(|name| !is_binding_pattern(*name))
            .map(|name| file.wrap(name)))
    }

    /// The identifier naming this node. Anonymous declarations and
    /// destructuring patterns have none.
    fn name_node(&self, file: &SourceFile) -> MorphResult<AnyNode> {
        self.name_node_if_exists(file)?
            .ok_or_else(|| MorphError::not_found(format!("node {} has no name", self.id())))
    }

    fn name(&self, file: &SourceFile) -> MorphResult<String> {
        Ok(self.name_node(file)?.text(file)?.to_string())
    }

    /// Rename this node. A top-level declaration also renames the alias
    /// sites of the file that name it (`export default X;`, `export { X }`,
    /// `import Y = X;`).
    fn set_name(&self, file: &mut SourceFile, name: &str) -> MorphResult<Self> {
        if !is_identifier(name) {
            return Err(MorphError::invalid_operation(format!(
                "`{name}` is not a valid identifier"
            )));
        }
        let current = self.name_node(file)?;
        let old = current.text(file)?.to_string();
        if old == name {
            return Ok(*self);
        }

        let mut changes = vec![TextChange::replace(
            current.start(file)?,
            current.end(file)?,
            name,
        )];
        if self.symbol(file)?.is_some() {
            changes.extend(
                alias_references(file, &old)
                    .into_iter()
                    .map(|(start, end)| TextChange::replace(start, end, name)),
            );
        }
        file.apply_changes(changes)?;
        Ok(*self)
    }

    fn fill_named(&self, file: &mut SourceFile, structure: &NamedNodeStructure) -> MorphResult<()> {
        if let Some(name) = &structure.name {
            self.set_name(file, name)?;
        }
        Ok(())
    }
}

/// Named nodes whose name is a binding: variables and parameters.
///
/// Their name may be a destructuring pattern, which has no single
/// identifier.
pub trait DeclarationNamedNode: NamedNode {
    fn is_binding_pattern(&self, file: &SourceFile) -> MorphResult<bool> {
        let node = file.ts_node(self.id())?;
        Ok(name_of(node).is_some_and(is_binding_pattern))
    }

    /// Source text of the binding, pattern or identifier.
    fn binding_text(&self, file: &SourceFile) -> MorphResult<String> {
        let node = file.ts_node(self.id())?;
        let binding = name_of(node).ok_or_else(|| {
            MorphError::not_found(format!("node {} has no binding", self.id()))
        })?;
        Ok(file.node_text(binding).to_string())
    }
}

fn is_binding_pattern(node: Node) -> bool {
    matches!(node.kind(), "object_pattern" | "array_pattern")
}

/// Words that cannot name a binding in module code.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&text)
}

/// Byte ranges of top-level identifiers that alias the local `name`.
fn alias_references(file: &SourceFile, name: &str) -> Vec<(usize, usize)> {
    let root = file.tree.root_node();
    let mut sites = Vec::new();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        match statement.kind() {
            // `export { X } from "m"` names another module's binding
            "export_statement" if statement.child_by_field_name("source").is_none() => {
                sites.extend(statement.child_by_field_name("value"));
                let mut clauses = statement.walk();
                for clause in statement
                    .named_children(&mut clauses)
                    .filter(|child| child.kind() == "export_clause")
                {
                    let mut specifiers = clause.walk();
                    sites.extend(
                        clause
                            .named_children(&mut specifiers)
                            .filter(|child| child.kind() == "export_specifier")
                            .filter_map(|specifier| specifier.child_by_field_name("name")),
                    );
                }
            }
            // import Y = X;
            "import_alias" => sites.extend(statement.named_child(1)),
            _ => {}
        }
    }

    sites
        .into_iter()
        .filter(|site| site.kind() == "identifier" && file.node_text(*site) == name)
        .map(|site| (site.start_byte(), site.end_byte()))
        .collect()
}

/// The node naming a declaration, by kind.
pub(crate) fn name_of(node: Node) -> Option<Node> {
    match SyntaxKind::of(node) {
        SyntaxKind::Parameter => {
            let pattern = node.child_by_field_name("pattern")?;
            match pattern.kind() {
                // ...rest
                "rest_pattern" => pattern.named_child(0),
                _ => Some(pattern),
            }
        }
        SyntaxKind::PropertyAccessExpression => node.child_by_field_name("property"),
        _ => node.child_by_field_name("name"),
    }
}

impl SourceFile {
    /// Name of a node, when it has one.
    pub fn name_of(&self, id: NodeId) -> MorphResult<Option<String>> {
        let node = self.ts_node(id)?;
        Ok(name_of(node)
            .filter(|name| !is_binding_pattern(*name))
            .map(|name| self.node_text(name).to_string()))
    }
}
