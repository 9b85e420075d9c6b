//! Language detection.
//!
//! Resolution order:
//!
//! 1. filename extension, through the alias table
//! 2. shebang interpreter on the first line
//! 3. `None` for empty or whitespace-only code
//! 4. statistical scoring over [`Language::AUTO_DETECT`], `PlainText` when
//!    nothing scores

use std::path::Path;

use snip_types::Language;

use crate::registry::registry;

/// Interpreter substrings checked against a shebang line, in priority order.
const SHEBANG_INTERPRETERS: &[(&[&str], Language)] = &[
    (&["python"], Language::Python),
    (&["node", "js"], Language::Javascript),
    (&["bash", "sh"], Language::Bash),
    (&["ruby"], Language::Ruby),
];

/// Decide which grammar `code` should be highlighted with.
///
/// Never fails. Returns `None` only when there is nothing to detect from.
pub fn detect(code: &str, filename: Option<&str>) -> Option<Language> {
    if let Some(language) = filename.and_then(detect_extension) {
        return Some(language);
    }
    if let Some(language) = detect_shebang(code) {
        return Some(language);
    }
    if code.trim().is_empty() {
        return None;
    }
    Some(auto_detect(code).unwrap_or(Language::PlainText))
}

/// Language named by the text after a filename's last dot, if the alias
/// table knows it. A name without a dot is looked up whole, so `sh` or `go`
/// on its own still resolves.
fn detect_extension(filename: &str) -> Option<Language> {
    let name = Path::new(filename).file_name()?.to_str()?;
    let extension = name.rsplit('.').next()?;
    Language::from_alias(extension)
}

/// Language named by a `#!` line; first matching interpreter wins.
pub fn detect_shebang(code: &str) -> Option<Language> {
    let first_line = code.lines().next()?;
    if !first_line.starts_with("#!") {
        return None;
    }
    SHEBANG_INTERPRETERS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| first_line.contains(needle)))
        .map(|(_, language)| *language)
}

/// Best-scoring grammar for `code`, or `None` when no grammar has evidence.
pub fn auto_detect(code: &str) -> Option<Language> {
    if code.trim().is_empty() {
        return None;
    }
    let (language, score) = registry().best_match(code, &Language::AUTO_DETECT)?;
    tracing::trace!(%language, score, "auto-detected language");
    Some(language)
}
