//! Capability traits.
//!
//! Each trait adds one facet of behavior (modifiers, export state, names,
//! types, ...) on top of [`AstNode`](crate::node::AstNode). A concrete node
//! type opts into exactly the traits its syntax supports, and its `fill`
//! applies the matching structure parts trait by trait, base first.

pub mod abstractable;
pub mod ambientable;
pub mod asyncable;
pub mod exportable;
pub mod expressioned;
pub mod initializer;
pub mod modifierable;
pub mod named;
pub mod typed;

pub use abstractable::AbstractableNode;
pub use ambientable::AmbientableNode;
pub use asyncable::AsyncableNode;
pub use exportable::ExportableNode;
pub use expressioned::ExpressionedNode;
pub use initializer::InitializerExpressionableNode;
pub use modifierable::ModifierableNode;
pub use named::{DeclarationNamedNode, NamedNode};
pub use typed::TypedNode;
