//! Classic unified diff text, for terminals and patch files.

use similar::TextDiff;

/// Lines of unchanged context around each hunk.
pub const DEFAULT_CONTEXT: usize = 3;

/// Render a unified diff (`---`/`+++` header, `@@` hunks).
///
/// Returns an empty string when the texts are identical.
pub fn unified_patch(old: &str, new: &str, old_label: &str, new_label: &str, context: usize) -> String {
    if old == new {
        return String::new();
    }
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(context)
        .header(old_label, new_label)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_empty() {
        assert_eq!(unified_patch("a\n", "a\n", "v1", "v2", DEFAULT_CONTEXT), "");
    }

    #[test]
    fn patch_has_header_and_hunk() {
        let patch = unified_patch("a\nb\nc\n", "a\nx\nc\n", "v1", "v2", DEFAULT_CONTEXT);
        assert!(patch.starts_with("--- v1\n+++ v2\n"));
        assert!(patch.contains("@@ -1,3 +1,3 @@"));
        assert!(patch.contains("-b\n"));
        assert!(patch.contains("+x\n"));
        assert!(patch.contains(" a\n"));
    }

    #[test]
    fn context_radius_limits_hunk() {
        let old: String = (1..=20).map(|i| format!("{i}\n")).collect();
        let new = old.replace("10\n", "ten\n");
        let patch = unified_patch(&old, &new, "a", "b", 1);
        assert!(patch.contains("@@ -9,3 +9,3 @@"));
        assert!(!patch.contains(" 7\n"));
    }
}
