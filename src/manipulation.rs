//! Text edit engine.
//!
//! Every mutation is expressed as a set of [`TextChange`]s against the
//! current buffer. Changes are applied back to front, each one moving the
//! node arena and editing the tree, and the file is re-synced once at the
//! end: reparse, rebind, and pin every surviving handle to its new node.

use log::{debug, warn};

use crate::binder::SymbolTable;
use crate::config::ReparseStrategy;
use crate::error::{MorphError, MorphResult};
use crate::file::SourceFile;
use crate::node::navigation::outermost;
use crate::node::{AstNode, NodeId, find_anchor};
use crate::syntax::SyntaxKind;
use crate::text::{PointMapper, TextEdit, merged_edit};

/// Replace `[start, end)` of the current buffer with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TextChange {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            text: text.into(),
        }
    }

    pub fn remove(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: String::new(),
        }
    }

    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    fn is_noop(&self) -> bool {
        self.start == self.end && self.text.is_empty()
    }
}

/// Remove nodes from the file.
///
/// Statements are removed with their line; keywords with the whitespace
/// after them. Overlapping ranges are merged. Removed handles are invalid
/// afterwards; all other handles keep pointing at their nodes.
pub fn remove_nodes(file: &mut SourceFile, nodes: &[NodeId]) -> MorphResult<()> {
    let spans = nodes
        .iter()
        .map(|&id| file.removal_span(id))
        .collect::<MorphResult<Vec<_>>>()?;
    file.apply_changes(removal_changes(spans))
}

/// Deletions for a set of ranges, overlapping or touching ones merged.
pub(crate) fn removal_changes(mut spans: Vec<(usize, usize)>) -> Vec<TextChange> {
    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
        .into_iter()
        .map(|(start, end)| TextChange::remove(start, end))
        .collect()
}

/// Insert `text` at byte offset `position`.
pub fn insert_text(file: &mut SourceFile, position: usize, text: &str) -> MorphResult<()> {
    file.apply_changes(vec![TextChange::insert(position, text)])
}

/// Replace the text of a node. The handle survives when the new text parses
/// to a node of the same kind.
pub fn replace_node_text(file: &mut SourceFile, id: NodeId, text: &str) -> MorphResult<()> {
    let node = file.ts_node(id)?;
    let (start, end) = (node.start_byte(), node.end_byte());
    file.apply_changes(vec![TextChange::replace(start, end, text)])
}

impl SourceFile {
    /// Replace the whole text, keeping handles outside the changed region.
    ///
    /// The old and new text are diffed and the change applied as one edit
    /// spanning from the first to the last differing character.
    pub fn replace_text(&mut self, new_text: &str) -> MorphResult<()> {
        self.ensure_usable()?;
        let Some(edit) = merged_edit(&self.text, new_text) else {
            return Ok(());
        };
        let replacement = new_text[edit.start..edit.new_end].to_string();
        self.apply_changes(vec![TextChange::replace(
            edit.start,
            edit.old_end,
            replacement,
        )])
    }

    /// Range deleted when `id` is removed.
    pub(crate) fn removal_span(&self, id: NodeId) -> MorphResult<(usize, usize)> {
        if self.arena.borrow().anchor(id)?.is_none() {
            return Err(MorphError::invalid_operation(
                "the source file node cannot be removed",
            ));
        }
        let node = self.ts_node(id)?;
        let kind = SyntaxKind::of(node);
        let bytes = self.text.as_bytes();

        if kind.is_statement() {
            let outer = outermost(node);
            let mut start = outer.start_byte();
            let mut end = outer.end_byte();

            let mut line_start = start;
            while line_start > 0 && matches!(bytes[line_start - 1], b' ' | b'\t') {
                line_start -= 1;
            }
            let owns_line = line_start == 0 || bytes[line_start - 1] == b'\n';

            while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
                end += 1;
            }
            if owns_line {
                start = line_start;
                if bytes[end..].starts_with(b"\r\n") {
                    end += 2;
                } else if bytes[end..].starts_with(b"\n") {
                    end += 1;
                }
            }
            return Ok((start, end));
        }

        if kind.modifier().is_some() {
            let start = node.start_byte();
            let mut end = node.end_byte();
            while end < bytes.len() && bytes[end].is_ascii_whitespace() {
                end += 1;
            }
            return Ok((start, end));
        }

        Ok((node.start_byte(), node.end_byte()))
    }

    /// Apply changes to the buffer and re-sync once.
    ///
    /// Changes address the current text and must not overlap.
    pub(crate) fn apply_changes(&mut self, mut changes: Vec<TextChange>) -> MorphResult<()> {
        self.ensure_usable()?;
        changes.retain(|change| !change.is_noop());
        if changes.is_empty() {
            return Ok(());
        }
        changes.sort_by_key(|change| (change.start, change.end));

        for pair in changes.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(MorphError::invalid_operation(format!(
                    "overlapping edits at {}..{} and {}..{}",
                    pair[0].start, pair[0].end, pair[1].start, pair[1].end
                )));
            }
        }
        for change in &changes {
            if change.start > change.end
                || change.end > self.text.len()
                || !self.text.is_char_boundary(change.start)
                || !self.text.is_char_boundary(change.end)
            {
                return Err(MorphError::invalid_operation(format!(
                    "edit range {}..{} is not inside the text",
                    change.start, change.end
                )));
            }
        }

        let mut invalidated = 0;
        for change in changes.iter().rev() {
            let edit = TextEdit {
                start: change.start,
                old_end: change.end,
                new_end: change.start + change.text.len(),
            };
            let old_points = PointMapper::new(&self.text);
            self.text.replace_range(change.start..change.end, &change.text);
            let new_points = PointMapper::new(&self.text);

            self.tree.edit(&edit.to_input_edit(&old_points, &new_points));
            invalidated += self.arena.get_mut().apply_edit(&edit);
            self.edit_count += 1;

            debug!(
                target: "katachi::manipulation",
                "Applied edit to {}: {}..{} -> {}..{}",
                self.name,
                edit.start,
                edit.old_end,
                edit.start,
                edit.new_end
            );
        }

        self.resync(invalidated)
    }

    fn resync(&mut self, invalidated_by_edits: usize) -> MorphResult<()> {
        let old_tree = match self.settings.reparse {
            ReparseStrategy::Incremental => Some(&self.tree),
            ReparseStrategy::Full => None,
        };
        let output = match self.provider.parse(&self.text, old_tree) {
            Ok(output) => output,
            Err(err) => {
                warn!(
                    target: "katachi::manipulation",
                    "Re-sync of {} failed, file is unusable: {}",
                    self.name,
                    err
                );
                self.poisoned = Some(err.to_string());
                return Err(err);
            }
        };

        self.tree = output.tree;
        self.diagnostics = output.diagnostics;
        self.symbols = SymbolTable::bind(self.tree.root_node(), &self.text);

        let root = self.tree.root_node();
        let unresolved = self
            .arena
            .get_mut()
            .settle(|anchor| find_anchor(root, anchor).is_some());

        debug!(
            target: "katachi::manipulation",
            "Re-synced {}: {} handles removed by edits, {} unresolved, {} diagnostics",
            self.name,
            invalidated_by_edits,
            unresolved,
            self.diagnostics.len()
        );
        Ok(())
    }
}

impl SourceFile {
    /// Remove this file's text for `nodes`; see [`remove_nodes`].
    pub fn remove_nodes<N: AstNode>(&mut self, nodes: &[N]) -> MorphResult<()> {
        let ids: Vec<NodeId> = nodes.iter().map(AstNode::id).collect();
        remove_nodes(self, &ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::AnyNode;

    fn file(text: &str) -> SourceFile {
        SourceFile::from_text("test.ts", text).unwrap()
    }

    fn statements(file: &SourceFile) -> Vec<AnyNode> {
        file.root().children(file).unwrap()
    }

    #[test]
    fn test_remove_statement_takes_its_line() {
        let mut file = file("class A {}\nclass B {}\nclass C {}\n");
        let [a, b, c] = statements(&file)[..] else {
            panic!("expected three statements");
        };
        file.remove_nodes(&[b]).unwrap();
        assert_eq!(file.text(), "class A {}\nclass C {}\n");
        assert!(!b.is_valid(&file));
        assert_eq!(a.text(&file).unwrap(), "class A {}");
        assert_eq!(c.text(&file).unwrap(), "class C {}");
        assert_eq!(file.edit_count(), 1);
    }

    #[test]
    fn test_remove_multiple_statements_merges_spans() {
        let mut file = file("let a = 1;\nlet b = 2;\nlet c = 3;\n");
        let all = statements(&file);
        file.remove_nodes(&[all[0], all[1]]).unwrap();
        assert_eq!(file.text(), "let c = 3;\n");
        assert_eq!(file.edit_count(), 1);
        assert!(all[2].is_valid(&file));
    }

    #[test]
    fn test_insert_before_node_shifts_it() {
        let mut file = file("class A {}\n");
        let class = statements(&file)[0];
        insert_text(&mut file, 0, "const x = 1;\n").unwrap();
        assert_eq!(file.text(), "const x = 1;\nclass A {}\n");
        assert_eq!(class.start(&file).unwrap(), 13);
        assert_eq!(class.text(&file).unwrap(), "class A {}");
    }

    #[test]
    fn test_insert_out_of_bounds_is_rejected() {
        let mut file = file("class A {}");
        assert!(matches!(
            insert_text(&mut file, 99, "x"),
            Err(MorphError::InvalidOperation { .. })
        ));
        assert_eq!(file.edit_count(), 0);
    }

    #[test]
    fn test_replace_text_keeps_untouched_nodes() {
        let mut file = file("class A {}\nlet x = 1;\n");
        let class = statements(&file)[0];
        file.replace_text("class A {}\nlet x = 22;\n").unwrap();
        assert!(class.is_valid(&file));
        assert_eq!(class.text(&file).unwrap(), "class A {}");
    }

    #[test]
    fn test_replace_identical_text_is_a_noop() {
        let mut file = file("class A {}\n");
        file.replace_text("class A {}\n").unwrap();
        assert_eq!(file.edit_count(), 0);
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut file = file("class A {}\n");
        let root = file.root();
        assert!(matches!(
            file.remove_nodes(&[root]),
            Err(MorphError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_full_reparse_strategy() {
        let settings = crate::config::Settings {
            reparse: ReparseStrategy::Full,
            ..Default::default()
        };
        let mut file = SourceFile::new("test.ts", "class A {}\nclass B {}\n", settings).unwrap();
        let b = statements(&file)[1];
        insert_text(&mut file, 0, "export ").unwrap();
        assert_eq!(b.text(&file).unwrap(), "class B {}");
        assert_eq!(b.start(&file).unwrap(), 18);
    }
}
