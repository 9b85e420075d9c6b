//! Language detection and syntax highlighting.
//!
//! Everything here is a pure function over immutable inputs and never fails:
//! the worst case is an unhighlighted but correctly escaped rendering.
//!
//! # Key Items
//!
//! - [`GrammarRegistry`] -- process-wide, read-only table of grammars and
//!   detection signals, built once on first use
//! - [`detect`] -- filename, shebang, then statistical detection
//! - [`highlight`] / [`highlight_line`] -- class-annotated HTML rendering
//! - [`resolve`] -- the language a version will be rendered with

pub mod detect;
pub mod highlight;
pub mod registry;
mod signals;

pub use detect::{auto_detect, detect, detect_shebang};
pub use highlight::{highlight, highlight_line, resolve, Highlighted, CLASS_PREFIX};
pub use registry::{registry, GrammarRegistry};
