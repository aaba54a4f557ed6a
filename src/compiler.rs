//! Concrete node types.
//!
//! Each type is a handle newtype that opts into the capability traits its
//! syntax supports. [`Fill`] applies a structure trait by trait, base first.

mod class;
mod enum_declaration;
mod expression;
mod function;
mod interface;
mod parameter;
mod source_file;
mod type_alias;
mod variable;

pub use class::ClassDeclaration;
pub use enum_declaration::EnumDeclaration;
pub use expression::{CallExpression, ExpressionStatement, PropertyAccessExpression};
pub use function::FunctionDeclaration;
pub use interface::InterfaceDeclaration;
pub use parameter::ParameterDeclaration;
pub use type_alias::TypeAliasDeclaration;
pub use variable::{VariableDeclaration, VariableDeclarationKind, VariableStatement};

use crate::error::MorphResult;
use crate::file::SourceFile;
use crate::node::AstNode;

/// Apply a structure to a node.
///
/// Only fields present in the structure are applied; every setter checks the
/// current state first, so filling the same structure twice edits nothing
/// the second time.
pub trait Fill: AstNode {
    type Structure;

    fn fill(&self, file: &mut SourceFile, structure: &Self::Structure) -> MorphResult<Self>;
}

/// Declare a handle newtype castable from the given kinds.
macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:pat) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name($crate::node::NodeId);

        impl $crate::node::AstNode for $name {
            fn can_cast(kind: $crate::syntax::SyntaxKind) -> bool {
                matches!(kind, $kind)
            }

            fn from_id(id: $crate::node::NodeId) -> Self {
                $name(id)
            }

            fn id(&self) -> $crate::node::NodeId {
                self.0
            }
        }
    };
}
pub(crate) use ast_node;
