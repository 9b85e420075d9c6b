//! Diff engine for snip.
//!
//! Turns two versions of a snippet into renderable rows:
//!
//! ```text
//! old, new --diff_lines--> [Segment] --reconcile--> [DiffRow] --render_rows--> [RenderedRow]
//! ```
//!
//! # Key Types
//!
//! - [`Segment`] / [`ChangeKind`] -- runs of equal, added or removed lines
//! - [`DiffRow`] -- one line with its old and new line numbers
//! - [`RenderedRow`] / [`VersionDiff`] -- highlighted rows plus summary counts
//!
//! All functions are pure and infallible.

pub mod patch;
pub mod reconcile;
pub mod render;
pub mod segment;

pub use patch::{unified_patch, DEFAULT_CONTEXT};
pub use reconcile::{reconcile, DiffRow};
pub use render::{diff_versions, render_rows, RenderedRow, VersionDiff};
pub use segment::{diff_lines, ChangeKind, Segment};
