//! The process-wide grammar registry.
//!
//! Built once on first use and read-only afterwards. It owns the syntect
//! [`SyntaxSet`] (two-face's extended grammar bundle), the fixed mapping from
//! [`Language`] to the grammar that renders it, and the compiled detection
//! signals.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use snip_types::Language;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::signals::SIGNALS;

/// Matches of a single signal beyond this count add nothing to a score.
const MAX_MATCHES_PER_SIGNAL: usize = 3;

static REGISTRY: OnceLock<GrammarRegistry> = OnceLock::new();

/// The shared registry. Initialized on first call.
pub fn registry() -> &'static GrammarRegistry {
    REGISTRY.get_or_init(GrammarRegistry::build)
}

struct Signal {
    pattern: Regex,
    weight: u32,
}

/// Grammar lookup table and detection model.
pub struct GrammarRegistry {
    syntax_set: SyntaxSet,
    /// Language -> syntect syntax name. Languages without an entry have no
    /// grammar in the bundle and always fall back.
    grammars: HashMap<Language, String>,
    signals: Vec<(Language, Vec<Signal>)>,
}

impl GrammarRegistry {
    fn build() -> Self {
        let syntax_set = two_face::syntax::extra_newlines();

        let mut grammars = HashMap::new();
        for language in Language::ALL {
            let found = syntax_tokens(language)
                .iter()
                .find_map(|token| syntax_set.find_syntax_by_token(token));
            match found {
                Some(syntax) => {
                    grammars.insert(language, syntax.name.clone());
                }
                None => tracing::warn!(%language, "no grammar bundled for language"),
            }
        }

        let signals = SIGNALS
            .iter()
            .map(|(language, patterns)| {
                let compiled = patterns
                    .iter()
                    .filter_map(|(pattern, weight)| match Regex::new(pattern) {
                        Ok(pattern) => Some(Signal {
                            pattern,
                            weight: *weight,
                        }),
                        Err(e) => {
                            tracing::warn!(%language, error = %e, "skipping invalid detection signal");
                            None
                        }
                    })
                    .collect();
                (*language, compiled)
            })
            .collect();

        tracing::debug!(grammars = grammars.len(), "grammar registry initialized");

        Self {
            syntax_set,
            grammars,
            signals,
        }
    }

    pub fn syntax_set(&self) -> &SyntaxSet {
        &self.syntax_set
    }

    /// The grammar that renders `language`, if one is bundled.
    pub fn syntax_for(&self, language: Language) -> Option<&SyntaxReference> {
        let name = self.grammars.get(&language)?;
        self.syntax_set.find_syntax_by_name(name)
    }

    /// Whether `language` has a grammar in this registry.
    pub fn supports(&self, language: Language) -> bool {
        self.grammars.contains_key(&language)
    }

    /// Language for a hint the alias table does not know.
    ///
    /// Tries the highlighting aliases authors commonly type (`c++`, `golang`,
    /// `zsh`), then the bundled grammars' own names and file extensions.
    pub fn language_for_name(&self, name: &str) -> Option<Language> {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }
        if let Some(language) = grammar_alias(&name) {
            return Some(language);
        }
        let syntax = self.syntax_set.find_syntax_by_token(&name)?;
        Language::ALL
            .into_iter()
            .find(|language| self.grammars.get(language) == Some(&syntax.name))
    }

    /// Detection score of `code` for `language`. Zero means "no evidence".
    pub fn score(&self, code: &str, language: Language) -> u32 {
        self.signals
            .iter()
            .find(|(candidate, _)| *candidate == language)
            .map_or(0, |(_, signals)| score_signals(signals, code))
    }

    /// Highest-scoring language among `candidates`; earlier candidates win ties.
    pub fn best_match(&self, code: &str, candidates: &[Language]) -> Option<(Language, u32)> {
        let mut best: Option<(Language, u32)> = None;
        for &candidate in candidates {
            let score = self.score(code, candidate);
            if score == 0 {
                continue;
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best
    }
}

impl std::fmt::Debug for GrammarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarRegistry")
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .field("grammars", &self.grammars.len())
            .finish()
    }
}

fn score_signals(signals: &[Signal], code: &str) -> u32 {
    signals
        .iter()
        .map(|signal| {
            let hits = signal
                .pattern
                .find_iter(code)
                .take(MAX_MATCHES_PER_SIGNAL)
                .count() as u32;
            hits * signal.weight
        })
        .sum()
}

/// Highlighting aliases beyond the alias table, keyed lowercase.
fn grammar_alias(name: &str) -> Option<Language> {
    let language = match name {
        "mjs" | "cjs" => Language::Javascript,
        "mts" | "cts" => Language::Typescript,
        "py3" | "gyp" | "ipython" => Language::Python,
        "jsp" => Language::Java,
        "c++" | "cc" | "cxx" | "hpp" | "hh" | "hxx" | "h++" => Language::Cpp,
        "cs" | "c#" => Language::Csharp,
        "gemspec" | "podspec" | "irb" => Language::Ruby,
        "golang" => Language::Go,
        "kts" => Language::Kotlin,
        "xhtml" | "xml" | "svg" => Language::Html,
        "jsonc" => Language::Json,
        "shell" | "zsh" | "console" | "shellsession" => Language::Bash,
        "mkd" | "mkdown" => Language::Markdown,
        _ => return None,
    };
    Some(language)
}

/// syntect lookup tokens per language, most specific first.
fn syntax_tokens(language: Language) -> &'static [&'static str] {
    match language {
        Language::Javascript => &["js", "javascript"],
        Language::Typescript => &["ts", "typescript", "js"],
        Language::Python => &["py", "python"],
        Language::Java => &["java"],
        Language::Cpp => &["cpp", "c++"],
        Language::Csharp => &["cs", "c#"],
        Language::Php => &["php"],
        Language::Ruby => &["rb", "ruby"],
        Language::Go => &["go"],
        Language::Rust => &["rs", "rust"],
        Language::Swift => &["swift"],
        Language::Kotlin => &["kt", "kotlin", "java"],
        Language::Html => &["html", "htm", "xml"],
        Language::Css => &["css"],
        Language::Scss => &["scss", "sass", "css"],
        Language::Json => &["json"],
        Language::Sql => &["sql"],
        Language::Bash => &["sh", "bash"],
        Language::Yaml => &["yaml", "yml"],
        Language::Markdown => &["md", "markdown"],
        Language::PlainText => &[],
    }
}
