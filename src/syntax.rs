//! Syntax tree provider.
//!
//! Parsing is delegated to tree-sitter; this module only classifies what the
//! parser produces into the closed set of kinds the wrapper layer works with.

pub mod diagnostics;
pub mod kind;
pub mod parser;

pub use diagnostics::{Diagnostic, collect_diagnostics};
pub use kind::{ModifierKind, SyntaxKind, carried_declaration, carrier_of};
pub use parser::{Dialect, ParseOutput, ParserFactory, SyntaxProvider};
