//! Search & Replace
//!
//! Find/replace over the line store. Plain queries are escaped and compiled
//! through the same [`regex`] path as regex queries, so both share matching
//! and option handling. `find_next` scans forward from the cursor and wraps
//! past the document end; a hit becomes the active selection with the cursor
//! at the match end, so repeated searches walk all occurrences.
//!
//! Matches never span line boundaries; patterns are applied per line.

use regex::{NoExpand, Regex, RegexBuilder};

use crate::buffer::{EditBuffer, EditError, byte_of};

/// Search behavior options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// Match case exactly. Off by default.
    pub case_sensitive: bool,
    /// Only match at word boundaries.
    pub whole_word: bool,
    /// Treat the query as a regular expression instead of literal text.
    pub regex: bool,
}

fn compile(query: &str, options: &SearchOptions) -> Result<Regex, EditError> {
    let mut pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };
    if options.whole_word {
        pattern = format!(r"\b(?:{pattern})\b");
    }
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()?;
    Ok(regex)
}

/// 1-based character column of a byte offset within `text`.
fn col_of(text: &str, byte: usize) -> usize {
    text[..byte].chars().count() + 1
}

impl EditBuffer {
    /// Find the next occurrence of `query` at or after the cursor, wrapping
    /// past the document end. A hit is selected with the cursor at its end
    /// (so the next call continues past it) and `true` is returned.
    pub fn find_next(&mut self, query: &str, options: &SearchOptions) -> Result<bool, EditError> {
        if query.is_empty() {
            return Ok(false);
        }
        let regex = compile(query, options)?;

        let total = self.document().line_count();
        let mut line = self.cursor().line;
        let mut line_num = self.cursor().line_num;
        let mut from_col = self.cursor().col;

        // One extra pass over the start line covers the wrapped-around head.
        for _ in 0..=total {
            let text = self.document().text(line);
            let from_byte = byte_of(text, from_col);
            if let Some(found) = regex.find_at(text, from_byte)
                && found.start() < found.end()
            {
                let start_col = col_of(text, found.start());
                let end_col = col_of(text, found.end());
                self.select_range(line, line_num, start_col, end_col);
                return Ok(true);
            }
            match self.document().next(line) {
                Some(next) => {
                    line = next;
                    line_num += 1;
                }
                None => {
                    line = self.document().head();
                    line_num = 1;
                }
            }
            from_col = 1;
        }
        Ok(false)
    }

    /// Replace the selection if it exactly matches `query`, then find the
    /// next occurrence. Returns whether a next occurrence is selected.
    pub fn replace_current(
        &mut self,
        query: &str,
        replacement: &str,
        options: &SearchOptions,
    ) -> Result<bool, EditError> {
        let regex = compile(query, options)?;

        let selected = self.copy_selection();
        if let [fragment] = selected.as_slice()
            && regex
                .find(fragment)
                .is_some_and(|m| m.start() == 0 && m.end() == fragment.len())
        {
            self.record_undo();
            self.replace_selected_fragment(replacement);
        }
        self.find_next(query, options)
    }

    /// Replace every occurrence of `query` in the document as one undoable
    /// edit. Returns the number of replacements; zero leaves the buffer
    /// (including its history) untouched.
    pub fn replace_all(
        &mut self,
        query: &str,
        replacement: &str,
        options: &SearchOptions,
    ) -> Result<usize, EditError> {
        if query.is_empty() {
            return Ok(0);
        }
        let regex = compile(query, options)?;

        let ids: Vec<_> = self.document().iter().map(|(id, _)| id).collect();
        let count: usize = ids
            .iter()
            .map(|id| regex.find_iter(self.document().text(*id)).count())
            .sum();
        if count == 0 {
            return Ok(0);
        }

        self.record_undo();
        self.clear_selection();
        for id in ids {
            let text = self.document().text(id);
            let replaced = if options.regex {
                regex.replace_all(text, replacement)
            } else {
                regex.replace_all(text, NoExpand(replacement))
            };
            if let std::borrow::Cow::Owned(new_text) = replaced {
                *self.document_mut_text(id) = new_text;
            }
        }
        self.finish_bulk_edit();
        Ok(count)
    }
}
