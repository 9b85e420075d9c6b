//! Read-side shapes returned by [`Snippets`](crate::Snippets).

use serde::Serialize;
use snip_diff::VersionDiff;
use snip_lang::Highlighted;
use snip_types::{Snippet, SnippetVersion};

/// A snippet with all of its versions in ascending order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnippetView {
    pub snippet: Snippet,
    pub versions: Vec<SnippetVersion>,
}

impl SnippetView {
    /// The newest version.
    pub fn latest(&self) -> Option<&SnippetVersion> {
        self.versions.last()
    }

    /// The version with number `number`.
    pub fn version(&self, number: u32) -> Option<&SnippetVersion> {
        self.versions.iter().find(|v| v.version == number)
    }
}

/// One version rendered as highlighted HTML.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedVersion {
    pub version: SnippetVersion,
    pub highlighted: Highlighted,
}

/// A highlighted diff between two versions of one snippet.
///
/// `from` is `None` when version 1 is compared against empty text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VersionComparison {
    pub from: Option<u32>,
    pub to: u32,
    #[serde(flatten)]
    pub diff: VersionDiff,
}
