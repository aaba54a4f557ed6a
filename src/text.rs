pub mod diff;
pub mod edits;
pub mod position;

pub use diff::merged_edit;
pub use edits::{TextEdit, adjust_span_for_edit};
pub use position::PointMapper;
