//! Line numbering for diff output.
//!
//! [`reconcile`] walks the segments in order, keeping one counter for the old
//! text and one for the new, and emits a row per line. The result is a
//! unified view where every row carries the line number(s) it occupies.

use serde::Serialize;

use crate::segment::{ChangeKind, Segment};

/// One line of a unified diff with its position in each version.
///
/// `Added` rows have only `new_line`, `Removed` rows only `old_line`, and
/// `Equal` rows both. Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub kind: ChangeKind,
    pub content: String,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
}

impl DiffRow {
    pub fn equal(content: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: ChangeKind::Equal,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    pub fn added(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: ChangeKind::Added,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn removed(content: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: ChangeKind::Removed,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Single-character gutter marker: `+`, `-` or space.
    pub fn marker(&self) -> char {
        match self.kind {
            ChangeKind::Equal => ' ',
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
        }
    }
}

/// Assign old/new line numbers to every line of `segments`.
///
/// Output order follows segment order, and lines within a segment keep their
/// order. Each segment's trailing newline is dropped rather than producing
/// an empty row.
pub fn reconcile(segments: &[Segment]) -> Vec<DiffRow> {
    let mut rows = Vec::with_capacity(segments.iter().map(Segment::line_count).sum());
    let mut old_line = 1usize;
    let mut new_line = 1usize;

    for segment in segments {
        for line in segment.lines() {
            match segment.kind {
                ChangeKind::Added => {
                    rows.push(DiffRow::added(line, new_line));
                    new_line += 1;
                }
                ChangeKind::Removed => {
                    rows.push(DiffRow::removed(line, old_line));
                    old_line += 1;
                }
                ChangeKind::Equal => {
                    rows.push(DiffRow::equal(line, old_line, new_line));
                    old_line += 1;
                    new_line += 1;
                }
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::diff_lines;
    use proptest::prelude::*;

    #[test]
    fn replacement_rows_are_numbered() {
        let rows = reconcile(&diff_lines("a\nb\nc", "a\nx\nc"));
        assert_eq!(
            rows,
            vec![
                DiffRow::equal("a", 1, 1),
                DiffRow::removed("b", 2),
                DiffRow::added("x", 2),
                DiffRow::equal("c", 3, 3),
            ]
        );
    }

    #[test]
    fn insertion_shifts_new_numbers() {
        let rows = reconcile(&diff_lines("a\nb\n", "a\nnew\nb\n"));
        assert_eq!(
            rows,
            vec![
                DiffRow::equal("a", 1, 1),
                DiffRow::added("new", 2),
                DiffRow::equal("b", 2, 3),
            ]
        );
    }

    #[test]
    fn deletion_shifts_old_numbers() {
        let rows = reconcile(&diff_lines("a\ngone\nb\n", "a\nb\n"));
        assert_eq!(
            rows,
            vec![
                DiffRow::equal("a", 1, 1),
                DiffRow::removed("gone", 2),
                DiffRow::equal("b", 3, 2),
            ]
        );
    }

    #[test]
    fn blank_lines_are_kept() {
        let rows = reconcile(&diff_lines("", "a\n\nb\n"));
        let contents: Vec<_> = rows.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "", "b"]);
        assert_eq!(rows[2].new_line, Some(3));
    }

    #[test]
    fn no_segments_no_rows() {
        assert!(reconcile(&[]).is_empty());
    }

    #[test]
    fn markers() {
        assert_eq!(DiffRow::added("x", 1).marker(), '+');
        assert_eq!(DiffRow::removed("x", 1).marker(), '-');
        assert_eq!(DiffRow::equal("x", 1, 1).marker(), ' ');
    }

    #[test]
    fn rows_serialize_with_optional_numbers() {
        let json = serde_json::to_value(DiffRow::added("x", 4)).unwrap();
        assert_eq!(json["kind"], "added");
        assert_eq!(json["old_line"], serde_json::Value::Null);
        assert_eq!(json["new_line"], 4);
    }

    proptest! {
        #[test]
        fn self_diff_is_all_equal(lines in proptest::collection::vec("[a-c ]{0,3}", 0..15)) {
            let text = lines.join("\n");
            let rows = reconcile(&diff_lines(&text, &text));
            for (i, row) in rows.iter().enumerate() {
                prop_assert_eq!(row.kind, ChangeKind::Equal);
                prop_assert_eq!(row.old_line, row.new_line);
                prop_assert_eq!(row.old_line, Some(i + 1));
            }
        }

        #[test]
        fn row_numbers_follow_kind_and_count_up(
            old in proptest::collection::vec("[ab]{0,2}", 0..10),
            new in proptest::collection::vec("[ab]{0,2}", 0..10),
        ) {
            let old = old.join("\n");
            let new = new.join("\n");
            let rows = reconcile(&diff_lines(&old, &new));
            let mut expect_old = 1;
            let mut expect_new = 1;
            for row in &rows {
                match row.kind {
                    ChangeKind::Added => {
                        prop_assert_eq!(row.old_line, None);
                        prop_assert_eq!(row.new_line, Some(expect_new));
                        expect_new += 1;
                    }
                    ChangeKind::Removed => {
                        prop_assert_eq!(row.old_line, Some(expect_old));
                        prop_assert_eq!(row.new_line, None);
                        expect_old += 1;
                    }
                    ChangeKind::Equal => {
                        prop_assert_eq!(row.old_line, Some(expect_old));
                        prop_assert_eq!(row.new_line, Some(expect_new));
                        expect_old += 1;
                        expect_new += 1;
                    }
                }
            }
            prop_assert_eq!(expect_old - 1, old.lines().count());
            prop_assert_eq!(expect_new - 1, new.lines().count());
        }
    }
}
