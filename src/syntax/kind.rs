use std::fmt;

use tree_sitter::Node;

/// Keyword tokens that act as modifiers of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModifierKind {
    Export,
    Default,
    Declare,
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Override,
    Readonly,
    Accessor,
    Async,
    Const,
}

impl ModifierKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ModifierKind::Export => "export",
            ModifierKind::Default => "default",
            ModifierKind::Declare => "declare",
            ModifierKind::Public => "public",
            ModifierKind::Protected => "protected",
            ModifierKind::Private => "private",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Static => "static",
            ModifierKind::Override => "override",
            ModifierKind::Readonly => "readonly",
            ModifierKind::Accessor => "accessor",
            ModifierKind::Async => "async",
            ModifierKind::Const => "const",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "export" => ModifierKind::Export,
            "default" => ModifierKind::Default,
            "declare" => ModifierKind::Declare,
            "public" => ModifierKind::Public,
            "protected" => ModifierKind::Protected,
            "private" => ModifierKind::Private,
            "abstract" => ModifierKind::Abstract,
            "static" => ModifierKind::Static,
            "override" => ModifierKind::Override,
            "readonly" => ModifierKind::Readonly,
            "accessor" => ModifierKind::Accessor,
            "async" => ModifierKind::Async,
            "const" => ModifierKind::Const,
            _ => return None,
        })
    }

    /// Position in the canonical modifier order used when inserting.
    ///
    /// Accessibility keywords share a rank.
    pub fn order(self) -> u8 {
        match self {
            ModifierKind::Export => 0,
            ModifierKind::Default => 1,
            ModifierKind::Declare => 2,
            ModifierKind::Public | ModifierKind::Protected | ModifierKind::Private => 3,
            ModifierKind::Abstract => 4,
            ModifierKind::Static => 5,
            ModifierKind::Override => 6,
            ModifierKind::Readonly => 7,
            ModifierKind::Accessor => 8,
            ModifierKind::Async => 9,
            ModifierKind::Const => 10,
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Closed classification of tree-sitter nodes.
///
/// Several raw kinds collapse into one variant when they are the same
/// logical node: `class_declaration`, `abstract_class_declaration` and a
/// default-exported `class` are all a [`SyntaxKind::ClassDeclaration`], so a
/// class keeps its identity when a keyword edit changes the raw kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    SourceFile,
    ClassDeclaration,
    ClassExpression,
    FunctionDeclaration,
    FunctionExpression,
    InterfaceDeclaration,
    EnumDeclaration,
    TypeAliasDeclaration,
    VariableStatement,
    VariableDeclaration,
    Parameter,
    CallExpression,
    PropertyAccessExpression,
    ExpressionStatement,
    ExportAssignment,
    ExportDeclaration,
    ExportSpecifier,
    ImportDeclaration,
    ImportEquals,
    ModuleDeclaration,
    Block,
    Identifier,
    TypeAnnotation,
    Decorator,
    Comment,
    Modifier(ModifierKind),
    /// `export_statement`/`ambient_declaration` that only hoists keywords in
    /// front of a declaration. Never handed out as a node.
    ModifierCarrier,
    Error,
    Other(&'static str),
}

/// Raw kinds of default-exported values that are declarations in disguise.
const DECLARATION_VALUES: &[&str] = &[
    "class",
    "function_expression",
    "function",
    "generator_function",
];

impl SyntaxKind {
    pub fn of(node: Node) -> Self {
        match node.kind() {
            "program" => SyntaxKind::SourceFile,
            "class_declaration" | "abstract_class_declaration" => SyntaxKind::ClassDeclaration,
            "class" => {
                if is_default_exported_value(node) {
                    SyntaxKind::ClassDeclaration
                } else {
                    SyntaxKind::ClassExpression
                }
            }
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                SyntaxKind::FunctionDeclaration
            }
            "function_expression" | "function" | "generator_function" => {
                if is_default_exported_value(node) {
                    SyntaxKind::FunctionDeclaration
                } else {
                    SyntaxKind::FunctionExpression
                }
            }
            "interface_declaration" => SyntaxKind::InterfaceDeclaration,
            "enum_declaration" => SyntaxKind::EnumDeclaration,
            "type_alias_declaration" => SyntaxKind::TypeAliasDeclaration,
            "lexical_declaration" | "variable_declaration" => SyntaxKind::VariableStatement,
            "variable_declarator" => SyntaxKind::VariableDeclaration,
            "required_parameter" | "optional_parameter" => SyntaxKind::Parameter,
            "call_expression" => SyntaxKind::CallExpression,
            "member_expression" => SyntaxKind::PropertyAccessExpression,
            "expression_statement" => SyntaxKind::ExpressionStatement,
            "export_statement" => {
                if carried_declaration(node).is_some() {
                    SyntaxKind::ModifierCarrier
                } else if node.child_by_field_name("value").is_some() || has_token(node, "=") {
                    SyntaxKind::ExportAssignment
                } else {
                    SyntaxKind::ExportDeclaration
                }
            }
            "ambient_declaration" => {
                if carried_declaration(node).is_some() {
                    SyntaxKind::ModifierCarrier
                } else {
                    SyntaxKind::ModuleDeclaration
                }
            }
            "export_specifier" => SyntaxKind::ExportSpecifier,
            "import_statement" => SyntaxKind::ImportDeclaration,
            "import_alias" => SyntaxKind::ImportEquals,
            "internal_module" | "module" => SyntaxKind::ModuleDeclaration,
            "statement_block" => SyntaxKind::Block,
            "identifier" | "type_identifier" | "property_identifier" => SyntaxKind::Identifier,
            "type_annotation" => SyntaxKind::TypeAnnotation,
            "decorator" => SyntaxKind::Decorator,
            "comment" => SyntaxKind::Comment,
            "accessibility_modifier" => {
                let mut cursor = node.walk();
                let keyword = node
                    .children(&mut cursor)
                    .find_map(|child| ModifierKind::from_keyword(child.kind()));
                match keyword {
                    Some(kind) => SyntaxKind::Modifier(kind),
                    None => SyntaxKind::Other("accessibility_modifier"),
                }
            }
            "ERROR" => SyntaxKind::Error,
            kind if !node.is_named() => match ModifierKind::from_keyword(kind) {
                Some(modifier) => SyntaxKind::Modifier(modifier),
                None => SyntaxKind::Other(kind),
            },
            kind => SyntaxKind::Other(kind),
        }
    }

    /// Kinds that can be carried by an `export`/`declare` wrapper statement.
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::TypeAliasDeclaration
                | SyntaxKind::VariableStatement
                | SyntaxKind::ModuleDeclaration
                | SyntaxKind::ImportEquals
        )
    }

    /// Kinds removed as whole statements, together with their line ending.
    pub fn is_statement(self) -> bool {
        self.is_declaration()
            || matches!(
                self,
                SyntaxKind::ExpressionStatement
                    | SyntaxKind::ExportAssignment
                    | SyntaxKind::ExportDeclaration
                    | SyntaxKind::ImportDeclaration
            )
    }

    pub fn modifier(self) -> Option<ModifierKind> {
        match self {
            SyntaxKind::Modifier(kind) => Some(kind),
            _ => None,
        }
    }
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|child| child.kind() == token)
}

fn is_default_exported_value(node: Node) -> bool {
    node.parent()
        .filter(|parent| parent.kind() == "export_statement")
        .and_then(|parent| parent.child_by_field_name("value"))
        .is_some_and(|value| value.id() == node.id())
}

/// The declaration a modifier carrier hoists its keywords onto.
pub fn carried_declaration(node: Node) -> Option<Node> {
    match node.kind() {
        "export_statement" => node.child_by_field_name("declaration").or_else(|| {
            node.child_by_field_name("value")
                .filter(|value| DECLARATION_VALUES.contains(&value.kind()))
        }),
        "ambient_declaration" => {
            let mut cursor = node.walk();
            let declaration = node
                .named_children(&mut cursor)
                .find(|child| SyntaxKind::of(*child).is_declaration() || is_carrier(*child));
            declaration
        }
        _ => None,
    }
}

fn is_carrier(node: Node) -> bool {
    matches!(node.kind(), "export_statement" | "ambient_declaration")
        && carried_declaration(node).is_some()
}

/// The carrier directly wrapping `node`, if any.
pub fn carrier_of(node: Node) -> Option<Node> {
    let parent = node.parent()?;
    carried_declaration(parent)
        .filter(|carried| carried.id() == node.id())
        .map(|_| parent)
}
