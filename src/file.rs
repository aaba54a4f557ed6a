use std::cell::RefCell;
use std::path::Path;

use log::debug;
use tree_sitter::{Node, Tree};

use crate::binder::SymbolTable;
use crate::config::Settings;
use crate::error::{MorphError, MorphResult};
use crate::node::navigation::logical;
use crate::node::{Anchor, AnyNode, AstNode, NodeArena, NodeId, find_anchor};
use crate::syntax::{Diagnostic, Dialect, SyntaxProvider};

/// Extensions of declaration files; everything declared in them is ambient.
const DECLARATION_FILE_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

/// One parsed file: text buffer, tree, node handles and symbols.
///
/// The text and the tree are owned exclusively; every mutation goes through
/// the edit engine, which keeps the two and all live handles in sync.
pub struct SourceFile {
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) tree: Tree,
    pub(crate) provider: SyntaxProvider,
    pub(crate) arena: RefCell<NodeArena>,
    pub(crate) symbols: SymbolTable,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) settings: Settings,
    pub(crate) edit_count: usize,
    /// Set once a re-sync failed; the file must not be used any further
    pub(crate) poisoned: Option<String>,
}

impl SourceFile {
    /// Parse `text` as the file `name`.
    ///
    /// `.tsx` files are parsed with the TSX grammar regardless of
    /// `settings.dialect`.
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        settings: Settings,
    ) -> MorphResult<Self> {
        let name = name.into();
        let text = text.into();
        let dialect = Dialect::for_path(Path::new(&name), settings.dialect);

        let mut provider = SyntaxProvider::new(dialect)?;
        let output = provider.parse(&text, None)?;
        let symbols = SymbolTable::bind(output.tree.root_node(), &text);

        debug!(
            target: "katachi::manipulation",
            "Parsed {} ({} bytes, {:?}, {} diagnostics)",
            name,
            text.len(),
            dialect,
            output.diagnostics.len()
        );

        Ok(Self {
            name,
            text,
            tree: output.tree,
            provider,
            arena: RefCell::new(NodeArena::new()),
            symbols,
            diagnostics: output.diagnostics,
            settings,
            edit_count: 0,
            poisoned: None,
        })
    }

    /// Parse with default settings.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> MorphResult<Self> {
        Self::new(name, text, Settings::default())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full text of the file.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// The source file node itself.
    pub fn root(&self) -> AnyNode {
        AnyNode::from_id(self.arena.borrow().root())
    }

    pub fn dialect(&self) -> Dialect {
        self.provider.dialect()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Syntax errors of the current tree.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether this is a declaration file (`.d.ts`).
    pub fn is_declaration_file(&self) -> bool {
        DECLARATION_FILE_SUFFIXES
            .iter()
            .any(|suffix| self.name.ends_with(suffix))
    }

    /// Number of text edits applied since the file was parsed.
    pub fn edit_count(&self) -> usize {
        self.edit_count
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    pub fn is_valid(&self, id: NodeId) -> bool {
        self.poisoned.is_none() && self.arena.borrow().is_valid(id)
    }

    /// Number of handles currently alive, root excluded.
    pub fn live_node_count(&self) -> usize {
        self.arena.borrow().live_count()
    }

    pub(crate) fn ensure_usable(&self) -> MorphResult<()> {
        match &self.poisoned {
            Some(reason) => Err(MorphError::resync(format!(
                "{} is unusable after a failed re-sync: {reason}",
                self.name
            ))),
            None => Ok(()),
        }
    }

    /// The tree node behind a handle.
    pub(crate) fn ts_node(&self, id: NodeId) -> MorphResult<Node<'_>> {
        self.ensure_usable()?;
        let root = self.tree.root_node();
        match self.arena.borrow().anchor(id)? {
            None => Ok(root),
            Some(anchor) => find_anchor(root, &anchor).ok_or_else(|| {
                MorphError::resync(format!(
                    "handle {id} points at {}..{} which is not in the tree",
                    anchor.start, anchor.end
                ))
            }),
        }
    }

    /// The handle for a tree node. Carriers are wrapped as the declaration
    /// they carry.
    pub(crate) fn wrap(&self, node: Node) -> AnyNode {
        let node = logical(node);
        let mut arena = self.arena.borrow_mut();
        let id = match node.parent() {
            None => arena.root(),
            Some(_) => arena.get_or_create(Anchor::of(node)),
        };
        AnyNode::from_id(id)
    }

    pub(crate) fn node_text(&self, node: Node) -> &str {
        &self.text[node.start_byte()..node.end_byte()]
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.text.len())
            .field("edit_count", &self.edit_count)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}
