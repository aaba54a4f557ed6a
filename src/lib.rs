pub mod binder;
pub mod compiler;
pub mod config;
pub mod error;
pub mod file;
pub mod manipulation;
pub mod node;
pub mod project;
pub mod structures;
pub mod syntax;
pub mod text;
pub mod traits;

pub use binder::{Symbol, SymbolId, SymbolTable};
pub use compiler::{
    CallExpression, ClassDeclaration, EnumDeclaration, ExpressionStatement, Fill,
    FunctionDeclaration, InterfaceDeclaration, ParameterDeclaration, PropertyAccessExpression,
    TypeAliasDeclaration, VariableDeclaration, VariableDeclarationKind, VariableStatement,
};
pub use config::{AliasResolution, ReparseStrategy, Settings};
pub use error::{MorphError, MorphResult};
pub use file::SourceFile;
pub use manipulation::{TextChange, insert_text, remove_nodes, replace_node_text};
pub use node::{AnyNode, AstNode, NodeId};
pub use project::Project;
pub use syntax::{Diagnostic, Dialect, ModifierKind, SyntaxKind};
