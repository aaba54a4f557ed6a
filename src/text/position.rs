use line_index::{LineIndex, TextSize};
use tree_sitter::Point;

/// Maps byte offsets of one text snapshot to tree-sitter points.
///
/// Tree-sitter columns are byte based, which is exactly what
/// `line_index` reports, so no UTF-16 translation happens here.
pub struct PointMapper {
    index: LineIndex,
    len: usize,
}

impl PointMapper {
    pub fn new(text: &str) -> Self {
        Self {
            index: LineIndex::new(text),
            len: text.len(),
        }
    }

    /// Point for a byte offset; offsets past the end clamp to the end.
    pub fn point(&self, byte: usize) -> Point {
        let byte = byte.min(self.len);
        match self.index.try_line_col(TextSize::from(byte as u32)) {
            Some(line_col) => Point::new(line_col.line as usize, line_col.col as usize),
            None => Point::new(0, byte),
        }
    }
}
