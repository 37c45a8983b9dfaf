#![warn(missing_docs)]
//! `tedit-lang` - data-driven language configuration for the tedit editor core.
//!
//! This crate intentionally stays lightweight and does **not** depend on the document
//! store or the tokenizer. It provides three things:
//!
//! - [`Language`]: the set of supported languages plus filename-based detection,
//! - [`LexRules`]: one static lexical rule table per language (comment markers,
//!   quote characters, directive prefix, identifier shape),
//! - [`KeywordTable`]: the identifier → [`KeywordClass`] mapping for a language,
//!   built once per buffer and rebuilt only when the buffer's language changes.
//!
//! Adding a language means adding a rule table and keyword lists, not extending a
//! conditional chain in the scanner.

mod keywords;

use std::collections::HashMap;

/// A language supported by the syntax tokenizer.
///
/// `Plain` is the fallback for unrecognized files: no comments, no keywords,
/// every token is default-styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// No syntax rules; every character is default text.
    #[default]
    Plain,
    /// C and C++ sources and headers.
    CFamily,
    /// OpenGL shading language.
    Glsl,
    /// GNU makefiles.
    Makefile,
    /// CMake listfiles.
    CMake,
    /// GNU assembler sources (AT&T syntax).
    Assembly,
    /// GNU linker scripts.
    LinkerScript,
}

impl Language {
    /// Detect the language from a file name or path.
    ///
    /// Matching is case-insensitive and considers both whole file names
    /// (`Makefile`, `CMakeLists.txt`) and extensions.
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let lower = name.to_ascii_lowercase();

        match lower.as_str() {
            "makefile" | "gnumakefile" => return Language::Makefile,
            "cmakelists.txt" => return Language::CMake,
            _ => {}
        }

        let Some(ext) = lower.rsplit_once('.').map(|(_, ext)| ext) else {
            return Language::Plain;
        };
        match ext {
            "c" | "h" | "cpp" | "hpp" | "cxx" => Language::CFamily,
            "glsl" | "vert" | "frag" => Language::Glsl,
            "s" | "asm" => Language::Assembly,
            "ld" => Language::LinkerScript,
            "mk" => Language::Makefile,
            "cmake" => Language::CMake,
            _ => Language::Plain,
        }
    }

    /// The lexical rule table for this language.
    pub fn rules(self) -> &'static LexRules {
        match self {
            Language::Plain => &PLAIN_RULES,
            Language::CFamily => &C_RULES,
            Language::Glsl => &C_RULES,
            Language::Makefile => &MAKE_RULES,
            Language::CMake => &CMAKE_RULES,
            Language::Assembly => &ASM_RULES,
            Language::LinkerScript => &LD_RULES,
        }
    }
}

/// Color/semantic class a keyword-table entry maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Ordinary language keyword (e.g. `while`, `mov`, `add_executable`).
    Keyword,
    /// Register or well-known variable (e.g. `%rax`, make's `CFLAGS`).
    Register,
    /// Preprocessor or assembler directive (e.g. `.text`, make's `ifeq`).
    Directive,
}

/// Static lexical rules for one language.
///
/// The tokenizer consults this table instead of branching on [`Language`];
/// every field is data, never behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexRules {
    /// Marker that comments out the rest of the line (e.g. `//`, `#`).
    pub line_comment: Option<&'static str>,
    /// Block comment delimiters (e.g. `("/*", "*/")`). Block comments may
    /// span lines; the tokenizer threads that state between lines.
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Quote characters opening string/char literals with backslash escapes.
    pub quotes: &'static [char],
    /// When the first non-blank character of a line equals this, the line is
    /// tokenized as a directive line (e.g. `#` for the C preprocessor).
    pub directive_prefix: Option<char>,
    /// Characters accepted as trailing numeric-literal suffixes
    /// (case-insensitive; e.g. `u`, `l`, `f` for C).
    pub number_suffixes: &'static [char],
    /// Extra characters that may start an identifier beyond ASCII letters
    /// and `_` (e.g. `%` and `.` for assembly registers and directives).
    pub ident_extra_start: &'static [char],
    /// Extra characters that may continue an identifier beyond ASCII
    /// alphanumerics and `_`.
    pub ident_extra_continue: &'static [char],
    /// Whether keyword lookup folds case (CMake commands are case-insensitive).
    pub case_folded_keywords: bool,
}

impl LexRules {
    /// Returns `true` if `ch` may start an identifier under these rules.
    pub fn is_ident_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_' || self.ident_extra_start.contains(&ch)
    }

    /// Returns `true` if `ch` may continue an identifier under these rules.
    pub fn is_ident_continue(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || self.ident_extra_continue.contains(&ch)
    }
}

static PLAIN_RULES: LexRules = LexRules {
    line_comment: None,
    block_comment: None,
    quotes: &[],
    directive_prefix: None,
    number_suffixes: &[],
    ident_extra_start: &[],
    ident_extra_continue: &[],
    case_folded_keywords: false,
};

static C_RULES: LexRules = LexRules {
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\''],
    directive_prefix: Some('#'),
    number_suffixes: &['u', 'l', 'f'],
    ident_extra_start: &[],
    ident_extra_continue: &[],
    case_folded_keywords: false,
};

static MAKE_RULES: LexRules = LexRules {
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"', '\''],
    directive_prefix: None,
    number_suffixes: &[],
    ident_extra_start: &[],
    ident_extra_continue: &[],
    case_folded_keywords: false,
};

static CMAKE_RULES: LexRules = LexRules {
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"'],
    directive_prefix: None,
    number_suffixes: &[],
    ident_extra_start: &[],
    ident_extra_continue: &[],
    case_folded_keywords: true,
};

static ASM_RULES: LexRules = LexRules {
    line_comment: Some("#"),
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\''],
    directive_prefix: None,
    number_suffixes: &[],
    ident_extra_start: &['%', '.'],
    ident_extra_continue: &[],
    case_folded_keywords: false,
};

static LD_RULES: LexRules = LexRules {
    line_comment: None,
    block_comment: Some(("/*", "*/")),
    quotes: &['"'],
    directive_prefix: None,
    number_suffixes: &[],
    ident_extra_start: &['.'],
    ident_extra_continue: &['.'],
    case_folded_keywords: false,
};

/// Identifier → [`KeywordClass`] mapping for one language.
///
/// Built once per buffer when the language is chosen; lookup honors the
/// language's case-folding rule.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    map: HashMap<String, KeywordClass>,
    case_folded: bool,
}

impl KeywordTable {
    /// Build the keyword table for `language`.
    pub fn for_language(language: Language) -> Self {
        let mut map = HashMap::new();
        let mut add = |words: &[&str], class: KeywordClass| {
            for word in words {
                map.insert((*word).to_string(), class);
            }
        };

        match language {
            Language::Plain => {}
            Language::CFamily => {
                add(keywords::C_KEYWORDS, KeywordClass::Keyword);
            }
            Language::Glsl => {
                add(keywords::C_KEYWORDS, KeywordClass::Keyword);
                add(keywords::GLSL_KEYWORDS, KeywordClass::Keyword);
            }
            Language::CMake => {
                add(keywords::CMAKE_KEYWORDS, KeywordClass::Keyword);
            }
            Language::Assembly => {
                add(keywords::ASM_INSTRUCTIONS, KeywordClass::Keyword);
                add(keywords::ASM_DIRECTIVES, KeywordClass::Directive);
                for reg in keywords::ASM_REGISTERS {
                    map.insert(format!("%{reg}"), KeywordClass::Register);
                }
            }
            Language::Makefile => {
                add(keywords::MAKE_DIRECTIVES, KeywordClass::Directive);
                add(keywords::MAKE_VARIABLES, KeywordClass::Register);
            }
            Language::LinkerScript => {
                add(keywords::LD_COMMANDS, KeywordClass::Directive);
                add(keywords::LD_FUNCTIONS, KeywordClass::Keyword);
            }
        }

        Self {
            map,
            case_folded: language.rules().case_folded_keywords,
        }
    }

    /// Classify an identifier, folding case when the language calls for it.
    pub fn classify(&self, word: &str) -> Option<KeywordClass> {
        if self.case_folded {
            self.map.get(&word.to_ascii_lowercase()).copied()
        } else {
            self.map.get(word).copied()
        }
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
