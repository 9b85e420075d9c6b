//! Weighted detection signals per grammar.
//!
//! Each entry is a regular expression and the weight one match contributes.
//! Matches of a single signal are capped (see `registry`), so one repeated
//! keyword cannot drown out the shape of the rest of the snippet.

use snip_types::Language;

pub(crate) type SignalTable = &'static [(Language, &'static [(&'static str, u32)])];

pub(crate) const SIGNALS: SignalTable = &[
    (
        Language::Javascript,
        &[
            (r"\bconst\s+\w+\s*=", 2),
            (r"\blet\s+\w+\s*=", 2),
            (r"\bfunction\s*\w*\s*\(", 3),
            (r"=>", 2),
            (r"console\.(log|error|warn)\(", 5),
            (r"\brequire\(['\x22]", 3),
            (r"\b(document|window)\.\w+", 3),
            (r"===|!==", 3),
            (r"\bexport\s+default\b", 3),
        ],
    ),
    (
        Language::Python,
        &[
            (r"(?m)^\s*def\s+\w+\s*\(.*\)\s*(->\s*[\w\[\], ]+)?:", 5),
            (r"(?m)^\s*from\s+[\w.]+\s+import\s+", 5),
            (r"(?m)^\s*import\s+[\w.]+(\s+as\s+\w+)?\s*$", 2),
            (r"\bprint\(", 2),
            (r"\bself\.\w+", 2),
            (r"(?m)^\s*elif\s+.*:\s*$", 4),
            (r"\b(None|True|False)\b", 1),
            (r"__\w+__", 3),
            (r"(?m)^\s*(if|for|while|with|class)\b.*:\s*$", 2),
        ],
    ),
    (
        Language::Java,
        &[
            (r"\bpublic\s+(static\s+)?(final\s+)?class\s+\w+", 3),
            (r"System\.out\.print", 6),
            (r"public\s+static\s+void\s+main", 6),
            (r"(?m)^\s*import\s+java\.", 5),
            (r"@Override\b", 4),
            (r"\bString\[\]", 3),
            (r"(?m)^\s*package\s+[\w.]+;", 4),
            (r"\b(private|protected|public)\s+\w+(<[\w, ]+>)?\s+\w+\s*\(", 2),
        ],
    ),
    (
        Language::Cpp,
        &[
            (r"#include\s*[<\x22][\w./]+[>\x22]", 5),
            (r"\bstd::", 5),
            (r"\bcout\s*<<|\bcin\s*>>", 5),
            (r"\btemplate\s*<", 4),
            (r"\bint\s+main\s*\(", 3),
            (r"\bnullptr\b", 4),
            (r"(?m)^\s*#define\s+\w+", 3),
        ],
    ),
    (
        Language::Csharp,
        &[
            (r"(?m)^\s*using\s+System(\.\w+)*;", 6),
            (r"\bnamespace\s+[\w.]+", 3),
            (r"Console\.Write(Line)?\(", 6),
            (r"\{\s*get;\s*(set;)?\s*\}", 5),
            (r"\bstatic\s+void\s+Main\s*\(", 5),
            (r"\bvar\s+\w+\s*=\s*new\b", 2),
        ],
    ),
    (
        Language::Php,
        &[
            (r"<\?php", 10),
            (r"\$\w+\s*=[^=]", 3),
            (r"\becho\s+[\x22'$]", 3),
            (r"\$this->", 5),
            (r"\bfunction\s+\w+\s*\(\s*\$", 4),
        ],
    ),
    (
        Language::Ruby,
        &[
            (r"(?m)^\s*def\s+[\w.]+[?!]?\s*(\([^)]*\))?\s*$", 3),
            (r"(?m)^\s*end\s*$", 3),
            (r"\bputs\s", 4),
            (r"\battr_(accessor|reader|writer)\b", 5),
            (r"(?m)^\s*require\s+['\x22]", 3),
            (r"\.each\s+do\s*\|", 5),
            (r"(?m)^\s*class\s+\w+\s*<\s*\w+", 4),
            (r"\bnil\b", 2),
            (r"\bdo\s*\|\w+(,\s*\w+)*\|", 3),
        ],
    ),
    (
        Language::Go,
        &[
            (r"(?m)^package\s+\w+\s*$", 5),
            (r"\bfunc\s+(\(\w+\s+\*?\w+\)\s*)?\w+\s*\(", 4),
            (r":=", 3),
            (r"\bfmt\.\w+\(", 5),
            (r"(?m)^import\s+\(", 4),
            (r"\bgo\s+func\b|\bchan\s+\w+", 3),
            (r"\bif\s+err\s*!=\s*nil\b", 6),
        ],
    ),
    (
        Language::Rust,
        &[
            (r"\bfn\s+\w+(<[^>]*>)?\s*\(", 4),
            (r"\blet\s+mut\s+", 5),
            (r"(?m)^\s*impl\b", 3),
            (r"\b(println|format|vec|panic|assert_eq)!", 5),
            (r"&mut\s|&self\b", 4),
            (r"(?m)^\s*use\s+\w+(::\w+)+", 4),
            (r"\bpub(\(crate\))?\s+(fn|struct|enum|trait|mod)\b", 4),
            (r"\bmatch\s+\w+\s*\{", 2),
            (r"\w+::new\(", 2),
        ],
    ),
    (
        Language::Swift,
        &[
            (r"(?m)^\s*import\s+(UIKit|Foundation|SwiftUI)\s*$", 8),
            (r"\bguard\s+let\b", 6),
            (r"\bfunc\s+\w+\s*\([^)]*\)\s*->\s*\w+", 3),
            (r"\bvar\s+\w+\s*:\s*[A-Z]\w*", 2),
            (r"\bif\s+let\s+\w+\s*=", 3),
            (r"\\\(\w+", 4),
            (r"\bstruct\s+\w+\s*:\s*View\b", 6),
        ],
    ),
    (
        Language::Typescript,
        &[
            (r":\s*(string|number|boolean|any|void|unknown|never)\b", 4),
            (r"\binterface\s+\w+\s*\{", 3),
            (r"\btype\s+\w+\s*=", 3),
            (r"\b(public|private|protected|readonly)\s+\w+\s*:", 3),
            (r"\bas\s+(string|number|const)\b", 3),
            (r"\bimport\s+.+\s+from\s+['\x22]", 1),
            (r"\benum\s+\w+\s*\{", 2),
        ],
    ),
    (
        Language::Kotlin,
        &[
            (r"\bfun\s+\w+\s*\(", 5),
            (r"\bval\s+\w+\s*(:\s*\w+)?\s*=", 4),
            (r"\bdata\s+class\b", 6),
            (r"\bwhen\s*\(", 3),
            (r"\bcompanion\s+object\b", 6),
            (r"(?m)^\s*package\s+[\w.]+\s*$", 2),
        ],
    ),
    (
        Language::Html,
        &[
            (r"(?i)<!DOCTYPE\s+html", 10),
            (
                r"(?i)</?(html|head|body|div|span|p|a|ul|ol|li|script|style|table|tr|td|h[1-6]|form|input|button)\b[^>]*>",
                2,
            ),
            (r"<\w+(\s+[\w-]+=\x22[^\x22]*\x22)+\s*/?>", 2),
            (r"</\w+>", 1),
            (r"<!--", 2),
        ],
    ),
    (
        Language::Css,
        &[
            (r"(?m)^\s*[.#]?[\w-]+(\s*[,>+~ ]\s*[.#]?[\w-]+)*\s*\{\s*$", 1),
            (r"(?m)^\s*[\w-]+\s*:\s*[^;{}]+;\s*$", 2),
            (r"\b\d+(px|em|rem|vh|vw)\b", 3),
            (r"#[0-9a-fA-F]{3,6}\b", 2),
            (r"@media\b|@import\b|@font-face\b", 4),
            (r"(?m)^\s*(color|margin|padding|display|font-size|background)\s*:", 3),
        ],
    ),
    (
        Language::Scss,
        &[
            (r"(?m)^\s*\$[\w-]+\s*:", 4),
            (r"@mixin\b|@include\b|@extend\b", 6),
            (r"&:(hover|focus|active)|&\.", 5),
            (r"#\{\$[\w-]+\}", 6),
        ],
    ),
    (
        Language::Json,
        &[
            (r"\x22[\w$-]+\x22\s*:\s*(\x22|-?\d|\{|\[|true\b|false\b|null\b)", 3),
            (r"(?s)\A\s*[\{\[].*[\}\]]\s*\z", 2),
        ],
    ),
    (
        Language::Sql,
        &[
            (r"(?is)\bSELECT\b.+\bFROM\b", 6),
            (r"(?i)\bINSERT\s+INTO\b", 6),
            (r"(?i)\bCREATE\s+(TABLE|INDEX|VIEW)\b", 6),
            (r"(?i)\bUPDATE\s+\w+\s+SET\b", 6),
            (r"(?i)\bDELETE\s+FROM\b", 6),
            (r"(?i)\bWHERE\b", 2),
            (r"(?i)\b(INNER|LEFT|RIGHT)?\s*JOIN\b", 2),
        ],
    ),
    (
        Language::Bash,
        &[
            (r"(?m)^\s*(echo|export|cd|ls|grep|sudo|apt(-get)?|chmod|mkdir|rm|cp|mv)\s", 3),
            (r"(?m)^\s*if\s+\[\[?\s", 5),
            (r"(?m)^\s*fi\s*$", 5),
            (r"(?m)^\s*(done|esac)\s*$", 4),
            (r"\|\s*(grep|awk|sed|xargs|sort|uniq)\b", 4),
            (r"\$\{\w+\}|\$\(\w+", 2),
        ],
    ),
    (
        Language::Yaml,
        &[
            (r"(?m)^[\w-]+:\s*$", 2),
            (r"(?m)^\s*[\w-]+:\s+[^\s{(].*$", 1),
            (r"(?m)^\s*-\s+[\w-]+:\s", 3),
            (r"(?m)^---\s*$", 3),
        ],
    ),
    (
        Language::Markdown,
        &[
            (r"(?m)^#{1,6}\s+\S", 2),
            (r"\[[^\]]+\]\([^)]+\)", 5),
            (r"(?m)^```", 5),
            (r"\*\*[^*\n]+\*\*", 3),
            (r"(?m)^>\s", 2),
            (r"(?m)^\s*\d+\.\s+\S", 1),
        ],
    ),
];
