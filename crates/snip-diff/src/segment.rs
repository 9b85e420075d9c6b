//! Line-level diff between two versions of a snippet.
//!
//! Uses the `similar` crate (Myers diff algorithm) over line sequences and
//! groups consecutive changes of the same kind into one [`Segment`].

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// How a run of lines differs between the old and new text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present in both.
    Equal,
    /// Only in the new text.
    Added,
    /// Only in the old text.
    Removed,
}

impl From<ChangeTag> for ChangeKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => Self::Equal,
            ChangeTag::Insert => Self::Added,
            ChangeTag::Delete => Self::Removed,
        }
    }
}

/// One or more consecutive lines of the same kind.
///
/// `value` keeps every line terminator, so concatenating the `Equal` and
/// `Removed` segments in order reproduces the old text exactly, and `Equal`
/// plus `Added` reproduces the new text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: ChangeKind,
    pub value: String,
}

impl Segment {
    /// The segment's lines without terminators.
    ///
    /// A single trailing newline does not produce an extra empty line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.value.lines()
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}

/// Compute the minimal line edit script turning `old` into `new`.
///
/// Deterministic: the same inputs always produce the same segments. An empty
/// `old` yields a single `Added` segment, an empty `new` a single `Removed`
/// segment, identical inputs a single `Equal` segment, and two empty inputs
/// no segments at all.
pub fn diff_lines(old: &str, new: &str) -> Vec<Segment> {
    let text_diff = TextDiff::from_lines(old, new);

    let mut segments: Vec<Segment> = Vec::new();
    for change in text_diff.iter_all_changes() {
        let kind = ChangeKind::from(change.tag());
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.value.push_str(change.value()),
            _ => segments.push(Segment {
                kind,
                value: change.value().to_string(),
            }),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rebuild(segments: &[Segment], keep: ChangeKind) -> String {
        segments
            .iter()
            .filter(|s| s.kind == ChangeKind::Equal || s.kind == keep)
            .map(|s| s.value.as_str())
            .collect()
    }

    #[test]
    fn identical_texts_are_one_equal_segment() {
        let text = "a\nb\nc\n";
        let segments = diff_lines(text, text);
        assert_eq!(
            segments,
            vec![Segment {
                kind: ChangeKind::Equal,
                value: text.into()
            }]
        );
    }

    #[test]
    fn empty_old_is_one_added_segment() {
        let new = "first\nsecond";
        let segments = diff_lines("", new);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, ChangeKind::Added);
        assert_eq!(segments[0].value, new);
    }

    #[test]
    fn empty_new_is_one_removed_segment() {
        let old = "first\nsecond\n";
        let segments = diff_lines(old, "");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, ChangeKind::Removed);
        assert_eq!(segments[0].value, old);
    }

    #[test]
    fn both_empty_is_no_segments() {
        assert!(diff_lines("", "").is_empty());
    }

    #[test]
    fn single_line_replacement() {
        let segments = diff_lines("a\nb\nc", "a\nx\nc");
        let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Equal,
                ChangeKind::Removed,
                ChangeKind::Added,
                ChangeKind::Equal
            ]
        );
        assert_eq!(segments[1].value, "b\n");
        assert_eq!(segments[2].value, "x\n");
        assert_eq!(segments[3].value, "c");
    }

    #[test]
    fn consecutive_lines_are_grouped() {
        let segments = diff_lines("keep\n", "keep\nn1\nn2\nn3\n");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].kind, ChangeKind::Added);
        assert_eq!(segments[1].line_count(), 3);
    }

    #[test]
    fn trailing_newline_adds_no_empty_line() {
        let segments = diff_lines("", "one\ntwo\n");
        let lines: Vec<_> = segments[0].lines().collect();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn segments_serialize_with_lowercase_kind() {
        let json = serde_json::to_string(&diff_lines("", "x\n")).unwrap();
        assert_eq!(json, r#"[{"kind":"added","value":"x\n"}]"#);
    }

    proptest! {
        #[test]
        fn segments_rebuild_both_inputs(
            old in proptest::collection::vec("[abc]{0,2}", 0..12),
            new in proptest::collection::vec("[abc]{0,2}", 0..12),
        ) {
            let old = old.join("\n");
            let new = new.join("\n");
            let segments = diff_lines(&old, &new);
            prop_assert_eq!(rebuild(&segments, ChangeKind::Removed), old);
            prop_assert_eq!(rebuild(&segments, ChangeKind::Added), new);
        }

        #[test]
        fn diff_is_deterministic(
            old in proptest::collection::vec("[ab]{0,2}", 0..10),
            new in proptest::collection::vec("[ab]{0,2}", 0..10),
        ) {
            let old = old.join("\n");
            let new = new.join("\n");
            prop_assert_eq!(diff_lines(&old, &new), diff_lines(&old, &new));
        }

        #[test]
        fn adjacent_segments_differ_in_kind(
            old in proptest::collection::vec("[ab]{0,2}", 0..10),
            new in proptest::collection::vec("[ab]{0,2}", 0..10),
        ) {
            let segments = diff_lines(&old.join("\n"), &new.join("\n"));
            for pair in segments.windows(2) {
                prop_assert_ne!(pair[0].kind, pair[1].kind);
            }
        }
    }
}
