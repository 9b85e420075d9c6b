use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered highlighting grammar.
///
/// The set is closed: each variant has exactly one grammar behind it in the
/// highlighter's registry. `PlainText` is the terminal fallback and has no
/// grammar at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Python,
    Java,
    Cpp,
    Csharp,
    Php,
    Ruby,
    Go,
    Rust,
    Swift,
    Kotlin,
    Html,
    Css,
    Scss,
    Json,
    Sql,
    Bash,
    Yaml,
    Markdown,
    #[serde(rename = "plaintext")]
    PlainText,
}

impl Language {
    /// Selectable languages in display order.
    pub const ALL: [Language; 20] = [
        Self::Javascript,
        Self::Typescript,
        Self::Python,
        Self::Java,
        Self::Cpp,
        Self::Csharp,
        Self::Php,
        Self::Ruby,
        Self::Go,
        Self::Rust,
        Self::Swift,
        Self::Kotlin,
        Self::Html,
        Self::Css,
        Self::Scss,
        Self::Json,
        Self::Sql,
        Self::Bash,
        Self::Yaml,
        Self::Markdown,
    ];

    /// Candidates for statistical detection, highest priority first.
    pub const AUTO_DETECT: [Language; 20] = [
        Self::Javascript,
        Self::Python,
        Self::Java,
        Self::Cpp,
        Self::Csharp,
        Self::Php,
        Self::Ruby,
        Self::Go,
        Self::Rust,
        Self::Swift,
        Self::Typescript,
        Self::Kotlin,
        Self::Html,
        Self::Css,
        Self::Scss,
        Self::Json,
        Self::Sql,
        Self::Bash,
        Self::Yaml,
        Self::Markdown,
    ];

    /// Canonical identifier, as stored in records and accepted over the wire.
    pub fn id(self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Csharp => "csharp",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Html => "html",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Json => "json",
            Self::Sql => "sql",
            Self::Bash => "bash",
            Self::Yaml => "yaml",
            Self::Markdown => "markdown",
            Self::PlainText => "plaintext",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Javascript => "JavaScript",
            Self::Typescript => "TypeScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::Csharp => "C#",
            Self::Php => "PHP",
            Self::Ruby => "Ruby",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Swift => "Swift",
            Self::Kotlin => "Kotlin",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Scss => "SCSS",
            Self::Json => "JSON",
            Self::Sql => "SQL",
            Self::Bash => "Bash",
            Self::Yaml => "YAML",
            Self::Markdown => "Markdown",
            Self::PlainText => "Plain Text",
        }
    }

    /// Resolve a language id, file extension or alias. Case-insensitive.
    ///
    /// Aliases are many-to-one: `js` and `jsx` both name JavaScript,
    /// `htm` and `html` both name HTML, and so on.
    pub fn from_alias(alias: &str) -> Option<Self> {
        let alias = alias.trim().to_ascii_lowercase();
        let language = match alias.as_str() {
            "javascript" | "js" | "jsx" => Self::Javascript,
            "typescript" | "ts" | "tsx" => Self::Typescript,
            "python" | "py" => Self::Python,
            "java" => Self::Java,
            "cpp" => Self::Cpp,
            "csharp" => Self::Csharp,
            "php" => Self::Php,
            "ruby" | "rb" => Self::Ruby,
            "go" => Self::Go,
            "rust" | "rs" => Self::Rust,
            "swift" => Self::Swift,
            "kotlin" | "kt" => Self::Kotlin,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "scss" | "sass" => Self::Scss,
            "json" => Self::Json,
            "sql" => Self::Sql,
            "bash" | "sh" => Self::Bash,
            "yaml" | "yml" => Self::Yaml,
            "markdown" | "md" => Self::Markdown,
            "plaintext" => Self::PlainText,
            _ => return None,
        };
        Some(language)
    }

    /// Label for an arbitrary stored id, `"Unknown"` when it names nothing.
    pub fn label_for(id: &str) -> &'static str {
        Self::from_alias(id).map_or("Unknown", Self::label)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The language an author picked for a version.
///
/// Stored and transmitted as a plain string: `"auto"` means "detect from the
/// code", anything else is kept verbatim. A named hint is not required to
/// name a registered grammar; the highlighter falls back to detection when it
/// does not.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageHint {
    #[default]
    Auto,
    Named(String),
}

impl LanguageHint {
    pub const AUTO: &'static str = "auto";

    /// Build a hint from user input. Blank input and `"auto"` mean [`LanguageHint::Auto`].
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::AUTO) {
            Self::Auto
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The registered grammar this hint names, if any.
    pub fn language(&self) -> Option<Language> {
        match self {
            Self::Auto => None,
            Self::Named(name) => Language::from_alias(name),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => Self::AUTO,
            Self::Named(name) => name,
        }
    }
}

impl From<Language> for LanguageHint {
    fn from(language: Language) -> Self {
        Self::Named(language.id().to_string())
    }
}

impl From<String> for LanguageHint {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<LanguageHint> for String {
    fn from(hint: LanguageHint) -> Self {
        match hint {
            LanguageHint::Auto => LanguageHint::AUTO.to_string(),
            LanguageHint::Named(name) => name,
        }
    }
}

impl fmt::Display for LanguageHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_many_to_one() {
        assert_eq!(Language::from_alias("js"), Some(Language::Javascript));
        assert_eq!(Language::from_alias("jsx"), Some(Language::Javascript));
        assert_eq!(Language::from_alias("yml"), Some(Language::Yaml));
        assert_eq!(Language::from_alias("yaml"), Some(Language::Yaml));
        assert_eq!(Language::from_alias("htm"), Some(Language::Html));
        assert_eq!(Language::from_alias("html"), Some(Language::Html));
        assert_eq!(Language::from_alias("sass"), Some(Language::Scss));
        assert_eq!(Language::from_alias("sh"), Some(Language::Bash));
    }

    #[test]
    fn alias_lookup_ignores_case() {
        assert_eq!(Language::from_alias("PY"), Some(Language::Python));
        assert_eq!(Language::from_alias(" Rust "), Some(Language::Rust));
        assert_eq!(Language::from_alias("cobol"), None);
    }

    #[test]
    fn every_id_resolves_to_itself() {
        for lang in Language::ALL {
            assert_eq!(Language::from_alias(lang.id()), Some(lang));
        }
        assert_eq!(Language::from_alias("plaintext"), Some(Language::PlainText));
    }

    #[test]
    fn auto_detect_covers_all_grammars() {
        let mut a = Language::ALL.to_vec();
        let mut b = Language::AUTO_DETECT.to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn labels() {
        assert_eq!(Language::Cpp.label(), "C++");
        assert_eq!(Language::label_for("csharp"), "C#");
        assert_eq!(Language::label_for("yml"), "YAML");
        assert_eq!(Language::label_for("brainfuck"), "Unknown");
    }

    #[test]
    fn language_serde_uses_ids() {
        assert_eq!(serde_json::to_string(&Language::Csharp).unwrap(), "\"csharp\"");
        assert_eq!(serde_json::to_string(&Language::PlainText).unwrap(), "\"plaintext\"");
        let parsed: Language = serde_json::from_str("\"typescript\"").unwrap();
        assert_eq!(parsed, Language::Typescript);
    }

    #[test]
    fn hint_parse() {
        assert_eq!(LanguageHint::parse("auto"), LanguageHint::Auto);
        assert_eq!(LanguageHint::parse("AUTO"), LanguageHint::Auto);
        assert_eq!(LanguageHint::parse("  "), LanguageHint::Auto);
        assert_eq!(
            LanguageHint::parse("python"),
            LanguageHint::Named("python".into())
        );
    }

    #[test]
    fn hint_keeps_unknown_names() {
        let hint = LanguageHint::parse("elixir");
        assert_eq!(hint.as_str(), "elixir");
        assert_eq!(hint.language(), None);
        assert_eq!(LanguageHint::parse("rs").language(), Some(Language::Rust));
    }

    #[test]
    fn hint_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&LanguageHint::Auto).unwrap(), "\"auto\"");
        let hint: LanguageHint = serde_json::from_str("\"go\"").unwrap();
        assert_eq!(hint, LanguageHint::Named("go".into()));
        let hint: LanguageHint = serde_json::from_str("\"auto\"").unwrap();
        assert!(hint.is_auto());
    }

    #[test]
    fn hint_from_language() {
        let hint = LanguageHint::from(Language::Kotlin);
        assert_eq!(hint.to_string(), "kotlin");
    }
}
