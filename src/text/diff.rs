use similar::{ChangeTag, TextDiff};

use super::TextEdit;

/// Reconstruct a single merged edit from a character-level diff.
///
/// Returns None if texts are identical (no edit needed).
/// Merges all changes into one edit: [first_change_start, last_change_end_old)
/// maps to [first_change_start, last_change_end_new).
pub fn merged_edit(old_text: &str, new_text: &str) -> Option<TextEdit> {
    if old_text == new_text {
        return None;
    }

    // NOTE: from_chars() for character-level diff (byte positions tracked via .len())
    // from_lines() would cause line-level granularity and over-invalidation
    let diff = TextDiff::from_chars(old_text, new_text);

    let mut first_change_start: Option<usize> = None;
    let mut last_old_end: usize = 0;
    let mut last_new_end: usize = 0;
    let mut old_byte = 0;
    let mut new_byte = 0;

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                old_byte += change.value().len();
                new_byte += change.value().len();
            }
            ChangeTag::Delete => {
                if first_change_start.is_none() {
                    first_change_start = Some(old_byte);
                }
                old_byte += change.value().len();
                last_old_end = old_byte;
                last_new_end = new_byte;
            }
            ChangeTag::Insert => {
                if first_change_start.is_none() {
                    first_change_start = Some(old_byte);
                }
                new_byte += change.value().len();
                last_old_end = old_byte;
                last_new_end = new_byte;
            }
        }
    }

    first_change_start.map(|start| TextEdit {
        start,
        old_end: last_old_end,
        new_end: last_new_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_have_no_edit() {
        assert_eq!(merged_edit("class A {}", "class A {}"), None);
    }

    #[test]
    fn test_single_insertion() {
        let edit = merged_edit("class A {}", "export class A {}").unwrap();
        assert_eq!(
            edit,
            TextEdit {
                start: 0,
                old_end: 0,
                new_end: 7
            }
        );
    }

    #[test]
    fn test_separate_changes_merge_into_one_span() {
        // "A" -> "B" at byte 6 and "1" -> "22" at byte 19
        let edit = merged_edit("class A {}\nlet x = 1;", "class B {}\nlet x = 22;").unwrap();
        assert_eq!(edit.start, 6);
        assert_eq!(edit.old_end, 20);
        assert_eq!(edit.new_end, 21);
    }
}
