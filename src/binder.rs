//! Per-file symbol table.
//!
//! Binding is deliberately shallow: only top-level statements declare
//! symbols, which is all export resolution needs. Symbols from other modules
//! are recorded as unresolvable alias targets.

use std::collections::{HashMap, HashSet};

use log::debug;
use tree_sitter::Node;

use crate::config::AliasResolution;
use crate::node::Anchor;
use crate::syntax::{SyntaxKind, carried_declaration};

/// Name of the default export binding.
pub const DEFAULT_EXPORT_NAME: &str = "default";

/// Index of a symbol in its file's [`SymbolTable`].
///
/// Two ids are equal iff they denote the same declaration identity. Ids are
/// only meaningful until the next edit of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

/// What an alias symbol stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    /// A name bound in this file
    Local(String),
    /// An export of another module; never resolvable here
    Module { module: String, name: String },
}

#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    declarations: Vec<Anchor>,
    alias: Option<AliasTarget>,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_alias(&self) -> bool {
        self.alias.is_some()
    }

    pub fn alias_target(&self) -> Option<&AliasTarget> {
        self.alias.as_ref()
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    pub(crate) fn declarations(&self) -> &[Anchor] {
        &self.declarations
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    locals: HashMap<String, SymbolId>,
    exports: HashMap<String, SymbolId>,
    by_declaration: HashMap<Anchor, SymbolId>,
}

impl SymbolTable {
    /// Bind the top-level statements of a tree.
    pub fn bind(root: Node, text: &str) -> Self {
        let mut binder = Binder {
            table: SymbolTable::default(),
            text,
        };
        let mut cursor = root.walk();
        for statement in root.named_children(&mut cursor) {
            binder.bind_statement(statement);
        }

        debug!(
            target: "katachi::binder",
            "Bound {} symbols ({} exports)",
            binder.table.symbols.len(),
            binder.table.exports.len()
        );
        binder.table
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol bound to `name` in the file scope.
    pub fn local(&self, name: &str) -> Option<SymbolId> {
        self.locals.get(name).copied()
    }

    /// Symbol exported as `name`.
    pub fn export(&self, name: &str) -> Option<SymbolId> {
        self.exports.get(name).copied()
    }

    /// Exported names in sorted order.
    pub fn export_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.exports.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn default_export(&self) -> Option<SymbolId> {
        self.export(DEFAULT_EXPORT_NAME)
    }

    pub(crate) fn declared_by(&self, anchor: &Anchor) -> Option<SymbolId> {
        self.by_declaration.get(anchor).copied()
    }

    /// The symbol an alias stands for.
    ///
    /// `None` when `id` is not an alias, when the chain leaves the file, or
    /// when it loops. With [`AliasResolution::SingleHop`] exactly one level
    /// is followed, even when that lands on another alias.
    pub fn aliased_symbol(&self, id: SymbolId, resolution: AliasResolution) -> Option<SymbolId> {
        let mut visited = HashSet::from([id]);
        let mut current = id;
        loop {
            let target = match self.symbol(current)?.alias.as_ref()? {
                AliasTarget::Local(name) => self.local(name)?,
                AliasTarget::Module { .. } => return None,
            };
            if !visited.insert(target) {
                return None;
            }
            if resolution == AliasResolution::SingleHop || !self.symbols[target.0 as usize].is_alias()
            {
                return Some(target);
            }
            current = target;
        }
    }

    /// The non-alias symbol `id` ends up at, `id` itself when it is no alias.
    pub fn resolve(&self, id: SymbolId, resolution: AliasResolution) -> Option<SymbolId> {
        match self.symbol(id)?.is_alias() {
            true => self.aliased_symbol(id, resolution),
            false => Some(id),
        }
    }
}

struct Binder<'a> {
    table: SymbolTable,
    text: &'a str,
}

impl Binder<'_> {
    fn text_of(&self, node: Node) -> String {
        node.utf8_text(self.text.as_bytes())
            .unwrap_or_default()
            .to_string()
    }

    fn module_name(&self, source: Node) -> String {
        self.text_of(source)
            .trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .to_string()
    }

    fn push(&mut self, name: String, anchor: Anchor, alias: Option<AliasTarget>) -> SymbolId {
        let id = SymbolId(self.table.symbols.len() as u32);
        self.table.symbols.push(Symbol {
            name,
            declarations: vec![anchor],
            alias,
        });
        self.table.by_declaration.insert(anchor, id);
        id
    }

    /// Declare a file-scope name, merging with an earlier non-alias
    /// declaration of the same name.
    fn declare_local(&mut self, name: String, anchor: Anchor) -> SymbolId {
        if let Some(&existing) = self.table.locals.get(&name) {
            let symbol = &mut self.table.symbols[existing.0 as usize];
            if !symbol.is_alias() {
                symbol.declarations.push(anchor);
                self.table.by_declaration.insert(anchor, existing);
                return existing;
            }
        }
        let id = self.push(name.clone(), anchor, None);
        self.table.locals.insert(name, id);
        id
    }

    fn declare_alias(&mut self, local: String, anchor: Anchor, target: AliasTarget) {
        let id = self.push(local.clone(), anchor, Some(target));
        self.table.locals.insert(local, id);
    }

    fn export_alias(&mut self, exported: String, anchor: Anchor, target: AliasTarget) {
        let id = self.push(exported.clone(), anchor, Some(target));
        self.table.exports.insert(exported, id);
    }

    fn bind_statement(&mut self, statement: Node) {
        match statement.kind() {
            "export_statement" => self.bind_export(statement),
            "import_statement" => self.bind_import(statement),
            "expression_statement" => {
                // `namespace N {}` parses as an expression statement
                let mut cursor = statement.walk();
                let module = statement
                    .named_children(&mut cursor)
                    .find(|child| child.kind() == "internal_module");
                if let Some(module) = module {
                    self.bind_declaration(module, false, false);
                }
            }
            _ => match carried_declaration(statement) {
                Some(declaration) => self.bind_carried(declaration, false, false),
                None if SyntaxKind::of(statement).is_declaration() => {
                    self.bind_declaration(statement, false, false)
                }
                None => {}
            },
        }
    }

    /// Bind a declaration that may itself be another carrier
    /// (`export declare class A {}`).
    fn bind_carried(&mut self, declaration: Node, exported: bool, default: bool) {
        match declaration.kind() {
            "export_statement" | "ambient_declaration" => match carried_declaration(declaration) {
                Some(inner) => self.bind_carried(inner, exported, default),
                None => self.bind_declaration(declaration, exported, default),
            },
            _ => self.bind_declaration(declaration, exported, default),
        }
    }

    fn bind_export(&mut self, statement: Node) {
        let is_default = {
            let mut cursor = statement.walk();
            statement
                .children(&mut cursor)
                .any(|child| child.kind() == "default")
        };

        if let Some(declaration) = carried_declaration(statement) {
            self.bind_carried(declaration, true, is_default);
            return;
        }

        let anchor = Anchor::of(statement);
        if let Some(value) = statement.child_by_field_name("value") {
            // export default <expression>;
            match value.kind() {
                "identifier" => self.export_alias(
                    DEFAULT_EXPORT_NAME.to_string(),
                    anchor,
                    AliasTarget::Local(self.text_of(value)),
                ),
                _ => {
                    let id = self.push(DEFAULT_EXPORT_NAME.to_string(), anchor, None);
                    self.table.exports.insert(DEFAULT_EXPORT_NAME.to_string(), id);
                }
            }
            return;
        }

        let module = statement
            .child_by_field_name("source")
            .map(|source| self.module_name(source));

        let mut cursor = statement.walk();
        let clause = statement
            .named_children(&mut cursor)
            .find(|child| child.kind() == "export_clause");
        let Some(clause) = clause else {
            // export = x; and export * from "m";
            let mut cursor = statement.walk();
            let assigned = statement
                .named_children(&mut cursor)
                .find(|child| child.kind() == "identifier");
            if let Some(assigned) = assigned {
                self.export_alias(
                    "export=".to_string(),
                    anchor,
                    AliasTarget::Local(self.text_of(assigned)),
                );
            }
            return;
        };

        let mut cursor = clause.walk();
        let specifiers: Vec<Node> = clause
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "export_specifier")
            .collect();
        for specifier in specifiers {
            let Some(name) = specifier.child_by_field_name("name") else {
                continue;
            };
            let name = self.text_of(name);
            let exported = specifier
                .child_by_field_name("alias")
                .map(|alias| self.text_of(alias))
                .unwrap_or_else(|| name.clone());
            let target = match &module {
                Some(module) => AliasTarget::Module {
                    module: module.clone(),
                    name,
                },
                None => AliasTarget::Local(name),
            };
            self.export_alias(exported, Anchor::of(specifier), target);
        }
    }

    fn bind_import(&mut self, statement: Node) {
        let Some(source) = statement.child_by_field_name("source") else {
            return;
        };
        let module = self.module_name(source);

        let mut cursor = statement.walk();
        let clause = statement
            .named_children(&mut cursor)
            .find(|child| child.kind() == "import_clause");
        let Some(clause) = clause else {
            return;
        };

        let mut cursor = clause.walk();
        let parts: Vec<Node> = clause.named_children(&mut cursor).collect();
        for part in parts {
            match part.kind() {
                "identifier" => self.declare_alias(
                    self.text_of(part),
                    Anchor::of(part),
                    AliasTarget::Module {
                        module: module.clone(),
                        name: DEFAULT_EXPORT_NAME.to_string(),
                    },
                ),
                "namespace_import" => {
                    let mut cursor = part.walk();
                    let local = part
                        .named_children(&mut cursor)
                        .find(|child| child.kind() == "identifier");
                    if let Some(local) = local {
                        self.declare_alias(
                            self.text_of(local),
                            Anchor::of(part),
                            AliasTarget::Module {
                                module: module.clone(),
                                name: "*".to_string(),
                            },
                        );
                    }
                }
                "named_imports" => {
                    let mut cursor = part.walk();
                    let specifiers: Vec<Node> = part
                        .named_children(&mut cursor)
                        .filter(|child| child.kind() == "import_specifier")
                        .collect();
                    for specifier in specifiers {
                        let Some(name) = specifier.child_by_field_name("name") else {
                            continue;
                        };
                        let name = self.text_of(name);
                        let local = specifier
                            .child_by_field_name("alias")
                            .map(|alias| self.text_of(alias))
                            .unwrap_or_else(|| name.clone());
                        self.declare_alias(
                            local,
                            Anchor::of(specifier),
                            AliasTarget::Module {
                                module: module.clone(),
                                name,
                            },
                        );
                    }
                }
                _ => {}
            }
        }
    }

    fn bind_declaration(&mut self, declaration: Node, exported: bool, default: bool) {
        let anchor = Anchor::of(declaration);
        match SyntaxKind::of(declaration) {
            SyntaxKind::VariableStatement => {
                let mut cursor = declaration.walk();
                let declarators: Vec<Node> = declaration
                    .named_children(&mut cursor)
                    .filter(|child| child.kind() == "variable_declarator")
                    .collect();
                for declarator in declarators {
                    let Some(name) = declarator
                        .child_by_field_name("name")
                        .filter(|name| name.kind() == "identifier")
                    else {
                        continue;
                    };
                    let name = self.text_of(name);
                    let id = self.declare_local(name.clone(), Anchor::of(declarator));
                    if exported {
                        self.table.exports.insert(name, id);
                    }
                }
            }
            SyntaxKind::ImportEquals => {
                let mut cursor = declaration.walk();
                let mut parts = declaration.named_children(&mut cursor);
                let (Some(local), Some(target)) = (parts.next(), parts.next()) else {
                    return;
                };
                let local = self.text_of(local);
                let target = match target.kind() {
                    "identifier" | "nested_identifier" => AliasTarget::Local(self.text_of(target)),
                    _ => {
                        let module = target
                            .named_child(0)
                            .map(|source| self.module_name(source))
                            .unwrap_or_default();
                        AliasTarget::Module {
                            module,
                            name: "export=".to_string(),
                        }
                    }
                };
                let id = self.push(local.clone(), anchor, Some(target));
                self.table.locals.insert(local.clone(), id);
                if exported {
                    self.table.exports.insert(local, id);
                }
            }
            kind if kind.is_declaration() => {
                let name = declaration
                    .child_by_field_name("name")
                    .map(|name| self.text_of(name));
                let id = match name {
                    Some(name) => {
                        let id = self.declare_local(name.clone(), anchor);
                        if exported && !default {
                            self.table.exports.insert(name, id);
                        }
                        id
                    }
                    None => self.push(DEFAULT_EXPORT_NAME.to_string(), anchor, None),
                };
                if default {
                    self.table.exports.insert(DEFAULT_EXPORT_NAME.to_string(), id);
                }
            }
            _ => {}
        }
    }
}
