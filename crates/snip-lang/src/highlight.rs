//! HTML syntax highlighting.
//!
//! Output is a fragment of `<span class="hl-...">` elements (syntect's classed
//! generator, one class per scope atom) around HTML-escaped text. Styling is
//! left to the consumer's stylesheet.

use serde::Serialize;
use snip_types::{Language, LanguageHint};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::util::LinesWithEndings;
use thiserror::Error;

use crate::detect::{auto_detect, detect};
use crate::registry::registry;

/// Prefix on every CSS class emitted by the highlighter.
pub const CLASS_PREFIX: &str = "hl-";

/// Inputs larger than this are rendered as escaped plain text.
const MAX_HIGHLIGHT_BYTES: usize = 512 * 1024;

/// Inputs with more lines than this are rendered as escaped plain text.
const MAX_HIGHLIGHT_LINES: usize = 10_000;

/// A rendered code fragment and the language it was rendered as.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Highlighted {
    pub html: String,
    /// `None` only for blank input.
    pub language: Option<Language>,
}

impl Highlighted {
    fn empty() -> Self {
        Self {
            html: String::new(),
            language: None,
        }
    }

    fn plain(code: &str) -> Self {
        Self {
            html: escape(code),
            language: Some(Language::PlainText),
        }
    }
}

#[derive(Debug, Error)]
enum RenderError {
    #[error("no grammar registered for {0}")]
    NoGrammar(Language),

    #[error("input exceeds highlighting limits")]
    TooLarge,

    #[error("grammar failed to parse input: {0}")]
    Parse(#[from] syntect::Error),
}

/// Highlight a whole code string.
///
/// `Auto` resolves the language through [`detect`] using `code` and
/// `filename`. A named hint that neither the alias table nor the grammar
/// aliases know, or a grammar that fails, falls back to statistical
/// detection and finally to escaped plain text. Blank input yields empty HTML and no language. Never fails.
pub fn highlight(code: &str, hint: &LanguageHint, filename: Option<&str>) -> Highlighted {
    if code.trim().is_empty() {
        return Highlighted::empty();
    }

    let requested = match hint {
        LanguageHint::Auto => Some(detect(code, filename).unwrap_or(Language::PlainText)),
        LanguageHint::Named(name) => named_language(name),
    };

    if let Some(language) = requested {
        match render(code, language) {
            Ok(html) => {
                return Highlighted {
                    html,
                    language: Some(language),
                }
            }
            Err(RenderError::TooLarge) => return Highlighted::plain(code),
            Err(e) => tracing::debug!(%language, error = %e, "highlighting failed, auto-detecting"),
        }
    } else {
        tracing::debug!(hint = %hint, "unknown language hint, auto-detecting");
    }

    if let Some(language) = auto_detect(code) {
        match render(code, language) {
            Ok(html) => {
                return Highlighted {
                    html,
                    language: Some(language),
                }
            }
            Err(e) => tracing::warn!(%language, error = %e, "auto-detected grammar failed"),
        }
    }

    Highlighted::plain(code)
}

/// The language [`highlight`] would render `code` with, without rendering.
///
/// Used to pick one language for a whole version before its lines are
/// highlighted one at a time.
pub fn resolve(code: &str, hint: &LanguageHint, filename: Option<&str>) -> Language {
    let requested = match hint {
        LanguageHint::Auto => detect(code, filename),
        LanguageHint::Named(name) => named_language(name),
    };
    match requested {
        Some(language) if language == Language::PlainText || registry().supports(language) => {
            language
        }
        _ => auto_detect(code).unwrap_or(Language::PlainText),
    }
}

/// Language a named hint asks for: the alias table, then grammar aliases.
fn named_language(name: &str) -> Option<Language> {
    Language::from_alias(name).or_else(|| registry().language_for_name(name))
}

/// Highlight a single line as a self-contained unit.
///
/// No parser state carries over between calls, so constructs that span
/// lines (block comments, multi-line strings) are only colored on the line
/// that opens them. Whitespace is preserved. Never fails.
pub fn highlight_line(line: &str, language: Language) -> String {
    if line.trim().is_empty() {
        return escape(line);
    }
    let mut with_newline = String::with_capacity(line.len() + 1);
    with_newline.push_str(line);
    with_newline.push('\n');

    match render(&with_newline, language) {
        Ok(mut html) => {
            // The only newline in the output is the one appended above.
            if let Some(pos) = html.rfind('\n') {
                html.remove(pos);
            }
            html
        }
        Err(e) => {
            tracing::trace!(%language, error = %e, "line rendered as plain text");
            escape(line)
        }
    }
}

fn render(code: &str, language: Language) -> Result<String, RenderError> {
    if code.len() > MAX_HIGHLIGHT_BYTES || code.lines().count() > MAX_HIGHLIGHT_LINES {
        return Err(RenderError::TooLarge);
    }
    if language == Language::PlainText {
        return Ok(escape(code));
    }

    let registry = registry();
    let syntax = registry
        .syntax_for(language)
        .ok_or(RenderError::NoGrammar(language))?;
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        registry.syntax_set(),
        ClassStyle::SpacedPrefixed {
            prefix: CLASS_PREFIX,
        },
    );
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Text content of an HTML fragment with tags removed and entities decoded.
    fn text_of(html: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }
        html_escape::decode_html_entities(&out).into_owned()
    }

    #[test]
    fn blank_input_renders_nothing() {
        for code in ["", "   ", "\n\n", "\t \n"] {
            let out = highlight(code, &LanguageHint::Auto, None);
            assert_eq!(out.html, "");
            assert_eq!(out.language, None);
        }
    }

    #[test]
    fn explicit_language_is_used() {
        let out = highlight("let x = 1;", &LanguageHint::parse("js"), None);
        assert_eq!(out.language, Some(Language::Javascript));
        assert!(out.html.contains("<span class=\"hl-"));
        assert_eq!(text_of(&out.html), "let x = 1;");
    }

    #[test]
    fn html_alias_uses_markup_grammar() {
        let out = highlight("<div>hi</div>", &LanguageHint::parse("htm"), None);
        assert_eq!(out.language, Some(Language::Html));
        assert!(out.html.contains("hl-"));
        assert_eq!(text_of(&out.html), "<div>hi</div>");
    }

    #[test]
    fn auto_uses_filename() {
        let out = highlight("x = 1\n", &LanguageHint::Auto, Some("script.py"));
        assert_eq!(out.language, Some(Language::Python));
    }

    #[test]
    fn grammar_alias_hints_are_honored() {
        let code = "int x = 1;\n";
        for (hint, language) in [
            ("c++", Language::Cpp),
            ("c#", Language::Csharp),
            ("golang", Language::Go),
            ("zsh", Language::Bash),
        ] {
            let out = highlight(code, &LanguageHint::parse(hint), None);
            assert_eq!(out.language, Some(language), "hint {hint}");
            assert_eq!(resolve(code, &LanguageHint::parse(hint), None), language);
            assert_eq!(text_of(&out.html), code);
        }
    }

    #[test]
    fn unknown_hint_falls_back_to_detection() {
        let code = "fn main() {\n    let mut v = vec![1];\n    println!(\"{:?}\", v);\n}\n";
        let out = highlight(code, &LanguageHint::parse("klingon"), None);
        assert_eq!(out.language, Some(Language::Rust));
        assert_eq!(text_of(&out.html), code);
    }

    #[test]
    fn unknown_hint_and_no_evidence_is_plaintext() {
        let out = highlight("a < b & c", &LanguageHint::parse("klingon"), None);
        assert_eq!(out.language, Some(Language::PlainText));
        assert_eq!(out.html, "a &lt; b &amp; c");
    }

    #[test]
    fn plaintext_is_escaped_only() {
        let out = highlight("<script>", &LanguageHint::parse("plaintext"), None);
        assert_eq!(out.html, "&lt;script&gt;");
        assert_eq!(out.language, Some(Language::PlainText));
    }

    #[test]
    fn markup_in_code_is_escaped() {
        let out = highlight("if (a < b) { x = \"<b>\"; }", &LanguageHint::parse("javascript"), None);
        assert!(!out.html.contains("<b>"));
        assert_eq!(text_of(&out.html), "if (a < b) { x = \"<b>\"; }");
    }

    #[test]
    fn oversized_input_is_plain() {
        let code = "x = 1\n".repeat(MAX_HIGHLIGHT_LINES + 1);
        let out = highlight(&code, &LanguageHint::parse("python"), None);
        assert_eq!(out.language, Some(Language::PlainText));
        assert!(!out.html.contains("<span"));
    }

    #[test]
    fn resolve_matches_highlight() {
        assert_eq!(resolve("print(1)", &LanguageHint::parse("py"), None), Language::Python);
        assert_eq!(resolve("", &LanguageHint::Auto, None), Language::PlainText);
        assert_eq!(
            resolve("#!/bin/bash\necho hi", &LanguageHint::Auto, None),
            Language::Bash
        );
        assert_eq!(
            resolve("lorem ipsum", &LanguageHint::parse("klingon"), None),
            Language::PlainText
        );
    }

    #[test]
    fn line_highlight_has_no_newline() {
        let html = highlight_line("def f(x):", Language::Python);
        assert!(!html.contains('\n'));
        assert!(html.contains("hl-"));
        assert_eq!(text_of(&html), "def f(x):");
    }

    #[test]
    fn line_highlight_keeps_whitespace() {
        assert_eq!(highlight_line("    ", Language::Rust), "    ");
        assert_eq!(highlight_line("", Language::Rust), "");
    }

    #[test]
    fn line_highlight_plaintext() {
        assert_eq!(highlight_line("a && b", Language::PlainText), "a &amp;&amp; b");
    }

    proptest! {
        #[test]
        fn html_is_empty_iff_blank(code in "[ a-z\\n\\t(){};=<>&\"']{0,40}") {
            let out = highlight(&code, &LanguageHint::Auto, None);
            prop_assert_eq!(out.html.is_empty(), code.trim().is_empty());
        }

        #[test]
        fn highlighting_preserves_text(code in "[ a-z0-9\\n(){};=<>&\"']{1,60}") {
            let out = highlight(&code, &LanguageHint::parse("javascript"), None);
            if !code.trim().is_empty() {
                prop_assert_eq!(text_of(&out.html), code);
            }
        }
    }
}
