//! Highlighted diff rows.

use serde::Serialize;
use snip_lang::{highlight_line, resolve};
use snip_types::{Language, LanguageHint};

use crate::reconcile::{reconcile, DiffRow};
use crate::segment::{diff_lines, ChangeKind};

/// A numbered diff row with its highlighted HTML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    #[serde(flatten)]
    pub row: DiffRow,
    pub html: String,
}

/// A rendered comparison of two versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    /// Language every row was highlighted with.
    pub language: Language,
    pub rows: Vec<RenderedRow>,
}

impl VersionDiff {
    /// Returns `true` if the two versions have identical lines.
    pub fn is_unchanged(&self) -> bool {
        self.rows.iter().all(|r| r.row.kind == ChangeKind::Equal)
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    /// Number of removed lines.
    pub fn deletions(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.rows.iter().filter(|r| r.row.kind == kind).count()
    }
}

/// Highlight every row independently with `language`.
pub fn render_rows(rows: Vec<DiffRow>, language: Language) -> Vec<RenderedRow> {
    rows.into_iter()
        .map(|row| {
            let html = highlight_line(&row.content, language);
            RenderedRow { row, html }
        })
        .collect()
}

/// Diff `old` against `new` and render the rows.
///
/// The language is resolved once from the newer code and `hint` (the older
/// code when the newer one is blank) and applied to every row.
pub fn diff_versions(old: &str, new: &str, hint: &LanguageHint) -> VersionDiff {
    let source = if new.trim().is_empty() { old } else { new };
    let language = resolve(source, hint, None);
    let rows = reconcile(&diff_lines(old, new));
    tracing::trace!(%language, rows = rows.len(), "rendering version diff");
    VersionDiff {
        language,
        rows: render_rows(rows, language),
    }
}
