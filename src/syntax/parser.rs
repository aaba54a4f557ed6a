use std::path::Path;

use serde::{Deserialize, Serialize};
use tree_sitter::{Language, Parser, Tree};

use super::{Diagnostic, collect_diagnostics};
use crate::error::{MorphError, MorphResult};

/// Grammar flavour used to parse a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    TypeScript,
    Tsx,
}

impl Dialect {
    pub fn language(self) -> Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// `.tsx` files always use the TSX grammar; anything else uses `fallback`.
    pub fn for_path(path: &Path, fallback: Dialect) -> Dialect {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("tsx") => Dialect::Tsx,
            _ => fallback,
        }
    }
}

/// Factory for creating Tree-sitter parsers with proper language configuration
pub struct ParserFactory;

impl ParserFactory {
    /// Create a new parser for the specified dialect
    pub fn create_parser(dialect: Dialect) -> MorphResult<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&dialect.language()).map_err(|err| {
            MorphError::config(format!("grammar for {dialect:?} is incompatible: {err}"))
        })?;
        Ok(parser)
    }
}

/// A parsed tree and the syntax errors found in it.
pub struct ParseOutput {
    pub tree: Tree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses text into trees. Owned by exactly one source file.
pub struct SyntaxProvider {
    parser: Parser,
    dialect: Dialect,
}

impl SyntaxProvider {
    pub fn new(dialect: Dialect) -> MorphResult<Self> {
        Ok(Self {
            parser: ParserFactory::create_parser(dialect)?,
            dialect,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse `text`. When `old_tree` is given it must already carry the edits
    /// that turned its text into `text`.
    pub fn parse(&mut self, text: &str, old_tree: Option<&Tree>) -> MorphResult<ParseOutput> {
        let tree = self
            .parser
            .parse(text, old_tree)
            .ok_or_else(|| MorphError::resync("parser returned no tree"))?;
        let diagnostics = collect_diagnostics(&tree);
        Ok(ParseOutput { tree, diagnostics })
    }
}
