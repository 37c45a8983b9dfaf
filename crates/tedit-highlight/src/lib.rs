//! # tedit-highlight
//!
//! Per-line lexical tokenizer for the tedit editor core. A [`Highlighter`]
//! splits one line of text into [`SyntaxToken`] slices tagged with a
//! [`TokenClass`], driven entirely by the language's
//! [`LexRules`](tedit_lang::LexRules) table and
//! [`KeywordTable`](tedit_lang::KeywordTable).
//!
//! Two guarantees hold for every input, in every language:
//!
//! - **lossless**: concatenating a line's token texts reproduces the line
//!   byte-for-byte; unrecognized characters degrade to single-character
//!   default tokens rather than being skipped,
//! - **deterministic**: identical `(line, carry_in, language)` inputs yield
//!   identical tokens and carry-out.
//!
//! Block comments may span lines, so adjacent lines are coupled by a carry
//! flag ("still inside an unterminated block comment").
//! [`Highlighter::highlight_all`] threads it through a full left-to-right
//! pass from the document start; there is no per-line cache, the prefix is
//! recomputed on each full pass.
//!
//! ```rust
//! use tedit_highlight::{Highlighter, TokenClass};
//! use tedit_lang::Language;
//!
//! let hl = Highlighter::new(Language::CFamily);
//! let (tokens, carry) = hl.tokenize_line("int x = 0xFF;", false);
//! assert_eq!(tokens[0].text, "int");
//! assert_eq!(tokens[0].class, TokenClass::Keyword);
//! assert!(!carry);
//! ```

#![warn(missing_docs)]

use bitflags::bitflags;
use tedit_lang::{KeywordClass, KeywordTable, Language};

/// Color class assigned to one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Plain text, operators, punctuation, whitespace.
    Default,
    /// Language keyword.
    Keyword,
    /// Register or well-known builtin variable.
    Register,
    /// Preprocessor or assembler directive.
    Directive,
    /// Line or block comment.
    Comment,
    /// String or character literal (delimiters included).
    String,
    /// Numeric literal, including prefix and unit suffixes.
    Number,
}

bitflags! {
    /// Style hints a renderer applies on top of the color class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenFlags: u8 {
        /// Render bold.
        const BOLD = 1 << 0;
        /// Render italic.
        const ITALIC = 1 << 1;
    }
}

impl TokenClass {
    /// Default style flags for this class.
    pub fn flags(self) -> TokenFlags {
        match self {
            TokenClass::Keyword | TokenClass::Directive => TokenFlags::BOLD,
            TokenClass::Comment => TokenFlags::ITALIC,
            _ => TokenFlags::empty(),
        }
    }
}

/// One contiguous slice of a line, tagged for rendering.
///
/// Tokens borrow from the input line and are not persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken<'a> {
    /// The slice of the input line this token covers.
    pub text: &'a str,
    /// Color class.
    pub class: TokenClass,
    /// Style hints.
    pub flags: TokenFlags,
}

impl<'a> SyntaxToken<'a> {
    fn new(text: &'a str, class: TokenClass) -> Self {
        Self {
            text,
            class,
            flags: class.flags(),
        }
    }
}

/// Per-buffer tokenizer: a language selector plus its keyword table.
///
/// The keyword table is built once and rebuilt only when the language
/// changes, not per line.
#[derive(Debug, Clone)]
pub struct Highlighter {
    language: Language,
    keywords: KeywordTable,
}

impl Highlighter {
    /// Create a highlighter for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            keywords: KeywordTable::for_language(language),
        }
    }

    /// The current language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch languages, rebuilding the keyword table if needed.
    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.keywords = KeywordTable::for_language(language);
        }
    }

    /// Tokenize one line.
    ///
    /// `carry_in` says whether the line starts inside an unterminated block
    /// comment; the returned flag says whether it ends inside one. Scanning
    /// is a single left-to-right pass with at most one character of
    /// lookahead. Never fails; an empty line yields no tokens and passes
    /// the carry flag through.
    pub fn tokenize_line<'a>(&self, line: &'a str, carry_in: bool) -> (Vec<SyntaxToken<'a>>, bool) {
        let rules = self.language.rules();
        let mut tokens = Vec::new();
        if line.is_empty() {
            return (tokens, carry_in);
        }

        let chars: Vec<(usize, char)> = line.char_indices().collect();
        let n = chars.len();
        let byte_at = |idx: usize| chars.get(idx).map_or(line.len(), |(b, _)| *b);
        let slice = |from: usize, to: usize| &line[byte_at(from)..byte_at(to)];

        let mut i = 0;
        let mut carry = carry_in;

        if carry {
            let Some((_, close)) = rules.block_comment else {
                tokens.push(SyntaxToken::new(line, TokenClass::Comment));
                return (tokens, true);
            };
            match line.find(close) {
                Some(pos) => {
                    let end_byte = pos + close.len();
                    tokens.push(SyntaxToken::new(&line[..end_byte], TokenClass::Comment));
                    carry = false;
                    i = chars.partition_point(|(b, _)| *b < end_byte);
                }
                None => {
                    tokens.push(SyntaxToken::new(line, TokenClass::Comment));
                    return (tokens, true);
                }
            }
        }

        // Directive lines are recognized from column one only, never after
        // a resumed block comment.
        if !carry_in
            && let Some(prefix) = rules.directive_prefix
            && let Some(first) = chars.iter().position(|(_, c)| *c != ' ' && *c != '\t')
            && chars[first].1 == prefix
        {
            self.tokenize_directive_line(line, &chars, first, prefix, &mut tokens);
            return (tokens, false);
        }

        while i < n {
            let (byte_i, ch) = chars[i];
            let rest = &line[byte_i..];

            if let Some(marker) = rules.line_comment
                && rest.starts_with(marker)
            {
                tokens.push(SyntaxToken::new(rest, TokenClass::Comment));
                return (tokens, carry);
            }

            if let Some((open, close)) = rules.block_comment
                && rest.starts_with(open)
            {
                match rest[open.len()..].find(close) {
                    Some(pos) => {
                        let end_byte = byte_i + open.len() + pos + close.len();
                        tokens.push(SyntaxToken::new(
                            &line[byte_i..end_byte],
                            TokenClass::Comment,
                        ));
                        i = chars.partition_point(|(b, _)| *b < end_byte);
                    }
                    None => {
                        tokens.push(SyntaxToken::new(rest, TokenClass::Comment));
                        return (tokens, true);
                    }
                }
                continue;
            }

            if ch == ' ' || ch == '\t' {
                let start = i;
                while i < n && matches!(chars[i].1, ' ' | '\t') {
                    i += 1;
                }
                tokens.push(SyntaxToken::new(slice(start, i), TokenClass::Default));
                continue;
            }

            if rules.quotes.contains(&ch) {
                let start = i;
                i += 1;
                while i < n {
                    if chars[i].1 == '\\' {
                        i += 2; // skip the escaped character
                        continue;
                    }
                    if chars[i].1 == ch {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                i = i.min(n);
                tokens.push(SyntaxToken::new(slice(start, i), TokenClass::String));
                continue;
            }

            let dot_number =
                ch == '.' && i + 1 < n && chars[i + 1].1.is_ascii_digit();
            if ch.is_ascii_digit() || dot_number {
                let start = i;
                let second = chars.get(i + 1).map(|(_, c)| *c);
                if ch == '0' && matches!(second, Some('x') | Some('X')) {
                    i += 2;
                    while i < n && chars[i].1.is_ascii_hexdigit() {
                        i += 1;
                    }
                } else if ch == '0' && matches!(second, Some('b') | Some('B')) {
                    i += 2;
                    while i < n && matches!(chars[i].1, '0' | '1') {
                        i += 1;
                    }
                } else {
                    while i < n && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                        i += 1;
                    }
                }
                while i < n
                    && rules
                        .number_suffixes
                        .contains(&chars[i].1.to_ascii_lowercase())
                {
                    i += 1;
                }
                tokens.push(SyntaxToken::new(slice(start, i), TokenClass::Number));
                continue;
            }

            if rules.is_ident_start(ch) {
                let start = i;
                i += 1;
                while i < n && rules.is_ident_continue(chars[i].1) {
                    i += 1;
                }
                let word = slice(start, i);
                let class = match self.keywords.classify(word) {
                    Some(KeywordClass::Keyword) => TokenClass::Keyword,
                    Some(KeywordClass::Register) => TokenClass::Register,
                    Some(KeywordClass::Directive) => TokenClass::Directive,
                    None => TokenClass::Default,
                };
                tokens.push(SyntaxToken::new(word, class));
                continue;
            }

            tokens.push(SyntaxToken::new(slice(i, i + 1), TokenClass::Default));
            i += 1;
        }

        (tokens, carry)
    }

    /// Tokenize a whole document in one pass, threading the block-comment
    /// carry state from the start.
    pub fn highlight_all<'a, I>(&self, lines: I) -> Vec<Vec<SyntaxToken<'a>>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut carry = false;
        lines
            .into_iter()
            .map(|line| {
                let (tokens, carry_out) = self.tokenize_line(line, carry);
                carry = carry_out;
                tokens
            })
            .collect()
    }

    /// Directive-line form: the directive word, an optional quoted or
    /// angle-bracketed reference after an `include`-style directive, and
    /// everything else as default text.
    fn tokenize_directive_line<'a>(
        &self,
        line: &'a str,
        chars: &[(usize, char)],
        first: usize,
        prefix: char,
        tokens: &mut Vec<SyntaxToken<'a>>,
    ) {
        let n = chars.len();
        let byte_at = |idx: usize| chars.get(idx).map_or(line.len(), |(b, _)| *b);
        let slice = |from: usize, to: usize| &line[byte_at(from)..byte_at(to)];

        if first > 0 {
            tokens.push(SyntaxToken::new(slice(0, first), TokenClass::Default));
        }

        let mut end = first;
        while end < n && !chars[end].1.is_whitespace() {
            end += 1;
        }
        let directive = slice(first, end);
        tokens.push(SyntaxToken::new(directive, TokenClass::Directive));
        let mut i = end;

        if directive.strip_prefix(prefix) == Some("include")
            && let Some(open) = chars[i..]
                .iter()
                .position(|(_, c)| matches!(c, '<' | '"'))
                .map(|p| p + i)
        {
            let close_char = if chars[open].1 == '<' { '>' } else { '"' };
            if let Some(close) = chars[open + 1..]
                .iter()
                .position(|(_, c)| *c == close_char)
                .map(|p| p + open + 1)
            {
                if open > i {
                    tokens.push(SyntaxToken::new(slice(i, open), TokenClass::Default));
                }
                tokens.push(SyntaxToken::new(slice(open, close + 1), TokenClass::String));
                i = close + 1;
            }
        }

        if i < n {
            tokens.push(SyntaxToken::new(slice(i, n), TokenClass::Default));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[SyntaxToken<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text).collect()
    }

    fn classes(tokens: &[SyntaxToken<'_>]) -> Vec<TokenClass> {
        tokens.iter().map(|t| t.class).collect()
    }

    #[test]
    fn test_line_comment_swallows_rest() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, carry) = hl.tokenize_line("  // comment", false);
        assert_eq!(texts(&tokens), vec!["  ", "// comment"]);
        assert_eq!(
            classes(&tokens),
            vec![TokenClass::Default, TokenClass::Comment]
        );
        assert!(!carry);
    }

    #[test]
    fn test_block_comment_carries_across_lines() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, carry) = hl.tokenize_line("/* start", false);
        assert_eq!(texts(&tokens), vec!["/* start"]);
        assert_eq!(tokens[0].class, TokenClass::Comment);
        assert!(carry);

        let (tokens, carry) = hl.tokenize_line("end */ int x;", true);
        assert_eq!(texts(&tokens), vec!["end */", " ", "int", " ", "x", ";"]);
        assert_eq!(tokens[0].class, TokenClass::Comment);
        assert_eq!(tokens[2].class, TokenClass::Keyword);
        assert!(!carry);
    }

    #[test]
    fn test_block_comment_closed_inline() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, carry) = hl.tokenize_line("a /* b */ c", false);
        assert_eq!(texts(&tokens), vec!["a", " ", "/* b */", " ", "c"]);
        assert!(!carry);
    }

    #[test]
    fn test_empty_line_passes_carry_through() {
        let hl = Highlighter::new(Language::CFamily);
        assert_eq!(hl.tokenize_line("", true), (vec![], true));
        assert_eq!(hl.tokenize_line("", false), (vec![], false));
    }

    #[test]
    fn test_include_directive_reference() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, _) = hl.tokenize_line("#include <stdio.h>", false);
        assert_eq!(texts(&tokens), vec!["#include", " ", "<stdio.h>"]);
        assert_eq!(
            classes(&tokens),
            vec![TokenClass::Directive, TokenClass::Default, TokenClass::String]
        );

        let (tokens, _) = hl.tokenize_line("  #include \"local.h\" // x", false);
        assert_eq!(
            texts(&tokens),
            vec!["  ", "#include", " ", "\"local.h\"", " // x"]
        );
    }

    #[test]
    fn test_directive_without_reference_stays_lossless() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, _) = hl.tokenize_line("#include <unterminated", false);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, "#include <unterminated");

        let (tokens, _) = hl.tokenize_line("#define MAX 10", false);
        assert_eq!(texts(&tokens), vec!["#define", " MAX 10"]);
        assert_eq!(tokens[0].class, TokenClass::Directive);
    }

    #[test]
    fn test_hash_is_comment_not_directive_in_makefiles() {
        let hl = Highlighter::new(Language::Makefile);
        let (tokens, _) = hl.tokenize_line("# comment, not a directive", false);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].class, TokenClass::Comment);
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, _) = hl.tokenize_line(r#"s = "a\"b";"#, false);
        assert_eq!(texts(&tokens), vec!["s", " ", "=", " ", r#""a\"b""#, ";"]);
        assert_eq!(tokens[4].class, TokenClass::String);
    }

    #[test]
    fn test_unterminated_string_runs_to_eol() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, carry) = hl.tokenize_line("x = \"open", false);
        assert_eq!(texts(&tokens), vec!["x", " ", "=", " ", "\"open"]);
        assert!(!carry);
    }

    #[test]
    fn test_number_forms() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, _) = hl.tokenize_line("0xFFul 0b101 3.14f .5 x2", false);
        let numbers: Vec<&str> = tokens
            .iter()
            .filter(|t| t.class == TokenClass::Number)
            .map(|t| t.text)
            .collect();
        assert_eq!(numbers, vec!["0xFFul", "0b101", "3.14f", ".5"]);
        // x2 is an identifier, not a number.
        assert!(tokens.iter().any(|t| t.text == "x2" && t.class == TokenClass::Default));
    }

    #[test]
    fn test_keyword_flags_are_bold() {
        let hl = Highlighter::new(Language::CFamily);
        let (tokens, _) = hl.tokenize_line("while", false);
        assert_eq!(tokens[0].class, TokenClass::Keyword);
        assert!(tokens[0].flags.contains(TokenFlags::BOLD));
    }

    #[test]
    fn test_assembly_registers_and_directives() {
        let hl = Highlighter::new(Language::Assembly);
        let (tokens, _) = hl.tokenize_line("mov %rax, %rbx", false);
        assert_eq!(tokens[0].class, TokenClass::Keyword);
        assert_eq!(tokens[2].class, TokenClass::Register);
        assert_eq!(tokens[2].text, "%rax");

        let (tokens, _) = hl.tokenize_line(".text", false);
        assert_eq!(tokens[0].class, TokenClass::Directive);
    }

    #[test]
    fn test_cmake_case_folded_keywords() {
        let hl = Highlighter::new(Language::CMake);
        let (tokens, _) = hl.tokenize_line("ADD_EXECUTABLE(app main.c)", false);
        assert_eq!(tokens[0].class, TokenClass::Keyword);
    }

    #[test]
    fn test_plain_language_is_all_default() {
        let hl = Highlighter::new(Language::Plain);
        let (tokens, carry) = hl.tokenize_line("int x = \"y\"; // z", false);
        assert!(tokens.iter().all(|t| t.class == TokenClass::Default));
        assert!(!carry);
    }

    #[test]
    fn test_set_language_rebuilds_table() {
        let mut hl = Highlighter::new(Language::Plain);
        hl.set_language(Language::CFamily);
        let (tokens, _) = hl.tokenize_line("return", false);
        assert_eq!(tokens[0].class, TokenClass::Keyword);
    }

    #[test]
    fn test_highlight_all_threads_carry() {
        let hl = Highlighter::new(Language::CFamily);
        let all = hl.highlight_all(["int a;", "/* one", "two", "three */ b;"]);
        assert_eq!(all[0][0].class, TokenClass::Keyword);
        assert_eq!(all[1][0].class, TokenClass::Comment);
        assert_eq!(all[2][0].class, TokenClass::Comment);
        assert_eq!(all[3][0].class, TokenClass::Comment);
        assert_eq!(all[3][0].text, "three */");
    }

    #[test]
    fn test_multibyte_text_stays_lossless() {
        let hl = Highlighter::new(Language::CFamily);
        let line = "int naïve = \"héllo\"; // ◆";
        let (tokens, _) = hl.tokenize_line(line, false);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, line);
    }
}
