use tree_sitter::InputEdit;

use super::PointMapper;

/// A single buffer edit in byte offsets.
///
/// `[start, old_end)` of the old text was replaced by `[start, new_end)` of
/// the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

/// Apply a signed delta to a byte position with overflow protection.
fn apply_delta(position: usize, delta: i64) -> usize {
    (position as i64).saturating_add(delta).max(0) as usize
}

impl TextEdit {
    pub fn insertion(at: usize, len: usize) -> Self {
        Self {
            start: at,
            old_end: at,
            new_end: at + len,
        }
    }

    pub fn deletion(start: usize, end: usize) -> Self {
        Self {
            start,
            old_end: end,
            new_end: start,
        }
    }

    /// Calculate the byte delta (positive for insertion, negative for deletion).
    pub fn delta(&self) -> i64 {
        self.new_end as i64 - self.old_end as i64
    }

    /// Zero-length edits insert content without deleting anything.
    pub fn is_insertion_only(&self) -> bool {
        self.start == self.old_end
    }

    /// Build the tree-sitter edit. `old` maps the text before the edit,
    /// `new` the text after it.
    pub fn to_input_edit(&self, old: &PointMapper, new: &PointMapper) -> InputEdit {
        InputEdit {
            start_byte: self.start,
            old_end_byte: self.old_end,
            new_end_byte: self.new_end,
            start_position: old.point(self.start),
            old_end_position: old.point(self.old_end),
            new_end_position: new.point(self.new_end),
        }
    }
}

/// Where a node's span may be found after an edit, most likely first.
///
/// An empty result means the span was removed by the edit and the node must
/// be invalidated:
/// - span fully inside a deletion, or partially overlapped by any edit
/// - span exactly replaced by an empty string
///
/// A span exactly replaced by new text keeps its start and takes the new
/// end. A pure insertion at the span start is ambiguous (the text may have
/// been put in front of the node or at the head of it), so both the shifted
/// and the grown span are offered.
pub fn adjust_span_for_edit(span: (usize, usize), edit: &TextEdit) -> Vec<(usize, usize)> {
    let (start, end) = span;
    let delta = edit.delta();
    let shifted = (apply_delta(start, delta), apply_delta(end, delta));
    let grown = (start, apply_delta(end, delta));

    if edit.is_insertion_only() {
        let at = edit.start;
        return if end < at {
            vec![span]
        } else if start > at {
            vec![shifted]
        } else if start == at {
            if start == end {
                vec![shifted]
            } else {
                vec![shifted, grown]
            }
        } else if end == at {
            // Appended right after the span
            vec![span, grown]
        } else {
            vec![grown]
        };
    }

    // Span ends before the edit starts
    if end <= edit.start {
        return vec![span];
    }

    // Span starts after the edited region
    if start >= edit.old_end {
        return vec![shifted];
    }

    // Span is exactly the replaced region
    if start == edit.start && end == edit.old_end {
        return if edit.new_end > edit.start {
            vec![(start, edit.new_end)]
        } else {
            Vec::new()
        };
    }

    // Span lies inside the replaced region
    if start >= edit.start && end <= edit.old_end {
        return Vec::new();
    }

    // Span contains the edit
    if start <= edit.start && end >= edit.old_end {
        let new_end = apply_delta(end, delta);
        // Guard: a collapsed range cannot anchor a node
        return if new_end > start {
            vec![(start, new_end)]
        } else {
            Vec::new()
        };
    }

    // Partial overlap: the node's text was torn apart
    Vec::new()
}
