//! Generational storage behind node handles.
//!
//! A slot remembers where its node sits in the text (an [`Anchor`]). Edits
//! move anchors the same way they move text; a slot whose text was removed
//! is vacated and its generation bumped, so every handle still pointing at
//! it fails fast instead of reading whatever node lives there next.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::{trace, warn};
use tree_sitter::Node;

use super::NodeId;
use crate::error::{MorphError, MorphResult};
use crate::syntax::SyntaxKind;
use crate::text::{TextEdit, adjust_span_for_edit};

/// Position of a node in the current text, plus its kind.
///
/// The kind takes part in the key so nested nodes sharing one range
/// (an expression statement and its call expression) stay distinct.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub(crate) struct Anchor {
    pub start: usize,
    pub end: usize,
    pub kind: SyntaxKind,
}

impl Anchor {
    pub fn of(node: Node) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
            kind: SyntaxKind::of(node),
        }
    }

    fn with_span(self, (start, end): (usize, usize)) -> Self {
        Self { start, end, ..self }
    }
}

/// Find the node an anchor designates in a tree.
///
/// Descends from `root` through the children containing the anchor's range
/// and returns the outermost node with exactly that range and kind.
pub(crate) fn find_anchor<'tree>(root: Node<'tree>, anchor: &Anchor) -> Option<Node<'tree>> {
    let mut node = root;
    loop {
        if node.start_byte() == anchor.start
            && node.end_byte() == anchor.end
            && SyntaxKind::of(node) == anchor.kind
        {
            return Some(node);
        }

        let next = {
            let mut cursor = node.walk();
            node.children(&mut cursor).find(|child| {
                child.start_byte() <= anchor.start && child.end_byte() >= anchor.end
            })
        };
        node = next?;
    }
}

enum SlotState {
    /// Slot 0: always the current root
    Root,
    Live(Anchor),
    /// Edited since the last re-sync; candidate anchors, most likely first
    Moving(Vec<Anchor>),
    Vacant,
}

struct Slot {
    generation: u32,
    state: SlotState,
}

/// Slot storage for the node handles of one source file.
pub(crate) struct NodeArena {
    slots: Vec<Slot>,
    entries: HashMap<Anchor, u32>,
    free: Vec<u32>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                state: SlotState::Root,
            }],
            entries: HashMap::new(),
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: self.slots[0].generation,
        }
    }

    /// Get or create the handle for an anchor.
    ///
    /// Same anchor always returns the same handle while the node lives.
    pub fn get_or_create(&mut self, anchor: Anchor) -> NodeId {
        if let Some(&index) = self.entries.get(&anchor) {
            return NodeId {
                index,
                generation: self.slots[index as usize].generation,
            };
        }

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].state = SlotState::Live(anchor);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Live(anchor),
                });
                (self.slots.len() - 1) as u32
            }
        };
        self.entries.insert(anchor, index);
        NodeId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Anchor of a live handle; `None` for the root.
    pub fn anchor(&self, id: NodeId) -> MorphResult<Option<Anchor>> {
        let slot = self
            .slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .ok_or(MorphError::InvalidNode {
                index: id.index,
                generation: id.generation,
            })?;
        match &slot.state {
            SlotState::Root => Ok(None),
            SlotState::Live(anchor) => Ok(Some(*anchor)),
            // Handles are only read between edits, after re-sync
            SlotState::Moving(_) | SlotState::Vacant => Err(MorphError::InvalidNode {
                index: id.index,
                generation: id.generation,
            }),
        }
    }

    pub fn is_valid(&self, id: NodeId) -> bool {
        self.anchor(id).is_ok()
    }

    /// Number of live non-root handles.
    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.state, SlotState::Live(_) | SlotState::Moving(_)))
            .count()
    }

    /// Move every anchor through an edit.
    ///
    /// Nodes whose text the edit removed are invalidated immediately; the
    /// others become candidates until [`NodeArena::settle`] checks them
    /// against the reparsed tree. Returns the number of invalidated slots.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> usize {
        self.entries.clear();
        let mut invalidated = 0;

        for index in 1..self.slots.len() {
            let candidates = match std::mem::replace(&mut self.slots[index].state, SlotState::Vacant)
            {
                SlotState::Live(anchor) => vec![anchor],
                SlotState::Moving(candidates) => candidates,
                state @ (SlotState::Root | SlotState::Vacant) => {
                    self.slots[index].state = state;
                    continue;
                }
            };

            let mut moved: Vec<Anchor> = Vec::with_capacity(candidates.len());
            for anchor in candidates {
                for span in adjust_span_for_edit((anchor.start, anchor.end), edit) {
                    let next = anchor.with_span(span);
                    if !moved.contains(&next) {
                        moved.push(next);
                    }
                }
            }

            if moved.is_empty() {
                self.vacate(index);
                invalidated += 1;
            } else {
                self.slots[index].state = SlotState::Moving(moved);
            }
        }

        invalidated
    }

    /// Pin every moving slot to the first candidate the new tree contains.
    ///
    /// Slots with no surviving candidate are invalidated. Returns the number
    /// of invalidated slots.
    pub fn settle(&mut self, resolves: impl Fn(&Anchor) -> bool) -> usize {
        self.entries.clear();
        let mut invalidated = 0;

        for index in 1..self.slots.len() {
            match std::mem::replace(&mut self.slots[index].state, SlotState::Vacant) {
                SlotState::Moving(candidates) => {
                    let Some(anchor) = candidates.into_iter().find(|anchor| resolves(anchor))
                    else {
                        trace!(
                            target: "katachi::node_arena",
                            "Slot {} has no matching node after re-sync",
                            index
                        );
                        self.vacate(index);
                        invalidated += 1;
                        continue;
                    };
                    self.claim(index, anchor, &mut invalidated);
                }
                SlotState::Live(anchor) => self.claim(index, anchor, &mut invalidated),
                state => self.slots[index].state = state,
            }
        }

        invalidated
    }

    fn claim(&mut self, index: usize, anchor: Anchor, invalidated: &mut usize) {
        match self.entries.entry(anchor) {
            Entry::Vacant(entry) => {
                entry.insert(index as u32);
                self.slots[index].state = SlotState::Live(anchor);
            }
            Entry::Occupied(_) => {
                // Two nodes collapsed onto one position: first slot wins
                warn!(
                    target: "katachi::node_arena",
                    "Anchor collision after edit - handle dropped: slot={}, start={}, end={}, kind={:?}",
                    index, anchor.start, anchor.end, anchor.kind
                );
                self.vacate(index);
                *invalidated += 1;
            }
        }
    }

    fn vacate(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        slot.state = SlotState::Vacant;
        self.free.push(index as u32);
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(start: usize, end: usize, kind: SyntaxKind) -> Anchor {
        Anchor { start, end, kind }
    }

    #[test]
    fn test_same_anchor_returns_same_handle() {
        let mut arena = NodeArena::new();
        let a = arena.get_or_create(anchor(0, 12, SyntaxKind::ClassDeclaration));
        let b = arena.get_or_create(anchor(0, 12, SyntaxKind::ClassDeclaration));
        assert_eq!(a, b);
    }

    #[test]
    fn test_kind_distinguishes_handles() {
        let mut arena = NodeArena::new();
        let statement = arena.get_or_create(anchor(0, 9, SyntaxKind::ExpressionStatement));
        let call = arena.get_or_create(anchor(0, 9, SyntaxKind::CallExpression));
        assert_ne!(statement, call);
    }

    #[test]
    fn test_root_has_no_anchor() {
        let arena = NodeArena::new();
        assert_eq!(arena.anchor(arena.root()).unwrap(), None);
    }

    #[test]
    fn test_deleted_node_is_invalidated() {
        let mut arena = NodeArena::new();
        let keyword = arena.get_or_create(anchor(0, 6, SyntaxKind::Other("export")));
        let class = arena.get_or_create(anchor(7, 19, SyntaxKind::ClassDeclaration));

        let invalidated = arena.apply_edit(&TextEdit::deletion(0, 7));
        assert_eq!(invalidated, 1);
        arena.settle(|_| true);

        assert!(!arena.is_valid(keyword));
        assert!(matches!(
            arena.anchor(keyword),
            Err(MorphError::InvalidNode { .. })
        ));
        assert_eq!(
            arena.anchor(class).unwrap(),
            Some(anchor(0, 12, SyntaxKind::ClassDeclaration))
        );
    }

    #[test]
    fn test_vacated_slot_reuse_does_not_revive_old_handle() {
        let mut arena = NodeArena::new();
        let old = arena.get_or_create(anchor(0, 3, SyntaxKind::Identifier));
        arena.apply_edit(&TextEdit::deletion(0, 3));
        arena.settle(|_| true);

        let new = arena.get_or_create(anchor(0, 3, SyntaxKind::Identifier));
        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert!(!arena.is_valid(old));
        assert!(arena.is_valid(new));
    }

    #[test]
    fn test_settle_prefers_first_resolving_candidate() {
        let mut arena = NodeArena::new();
        let class = arena.get_or_create(anchor(0, 12, SyntaxKind::ClassDeclaration));
        arena.apply_edit(&TextEdit::insertion(0, 9));

        // Only the grown span exists in the new tree
        arena.settle(|a| a.start == 0 && a.end == 21);
        assert_eq!(
            arena.anchor(class).unwrap(),
            Some(anchor(0, 21, SyntaxKind::ClassDeclaration))
        );
    }

    #[test]
    fn test_settle_invalidates_unresolved_slot() {
        let mut arena = NodeArena::new();
        let statement = arena.get_or_create(anchor(0, 19, SyntaxKind::ExportAssignment));
        arena.apply_edit(&TextEdit::deletion(0, 7));
        assert_eq!(arena.settle(|_| false), 1);
        assert!(!arena.is_valid(statement));
    }

    #[test]
    fn test_collision_keeps_first_slot() {
        let mut arena = NodeArena::new();
        let first = arena.get_or_create(anchor(0, 5, SyntaxKind::Identifier));
        let second = arena.get_or_create(anchor(0, 6, SyntaxKind::Identifier));
        arena.apply_edit(&TextEdit::insertion(20, 1));
        arena.settle(|_| true);
        assert!(arena.is_valid(first));
        assert!(arena.is_valid(second));

        arena.apply_edit(&TextEdit::deletion(5, 6));
        // second: (0, 6) contains (5, 6) -> (0, 5), colliding with first
        let invalidated = arena.settle(|_| true);
        assert_eq!(invalidated, 1);
        assert!(arena.is_valid(first));
        assert!(!arena.is_valid(second));
    }

    #[test]
    fn test_multiple_edits_compose_before_settle() {
        let mut arena = NodeArena::new();
        let class = arena.get_or_create(anchor(15, 27, SyntaxKind::ClassDeclaration));
        // Back-to-front: remove "default " then "export "
        arena.apply_edit(&TextEdit::deletion(7, 15));
        arena.apply_edit(&TextEdit::deletion(0, 7));
        arena.settle(|_| true);
        assert_eq!(
            arena.anchor(class).unwrap(),
            Some(anchor(0, 12, SyntaxKind::ClassDeclaration))
        );
    }
}
