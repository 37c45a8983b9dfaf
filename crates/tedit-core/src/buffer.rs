//! Edit Buffer
//!
//! [`EditBuffer`] aggregates the editing components for one open document:
//!
//! - **Document**: the line store,
//! - **Cursor & Viewport**: active position and visible window,
//! - **Selection**: optional anchor; per-line ranges are derived on demand,
//! - **History**: bounded whole-document undo/redo snapshots,
//! - **Language**: selector for comment-aware operations.
//!
//! Every mutating operation records an undo snapshot before touching the
//! document and reconciles the viewport afterwards; pure navigation and
//! selection extension do neither. Operations either fully apply or fully
//! no-op; boundary cases (backspace at document start, empty undo stack)
//! are silent no-ops.
//!
//! # Example
//!
//! ```rust
//! use tedit_core::{EditBuffer, EditorConfig};
//!
//! let mut buffer = EditBuffer::from_text("fn main() {\n}\n", 24, 80);
//! buffer.move_line_end();
//! buffer.split_line(&EditorConfig::default());
//! assert_eq!(buffer.document().line_count(), 3);
//! buffer.undo();
//! assert_eq!(buffer.document().line_count(), 2);
//! ```

use tedit_lang::Language;
use thiserror::Error;

use crate::document::{Document, LineId};
use crate::history::{History, Snapshot};
use crate::selection::{Anchor, SelectionSpan, normalize, spans};
use crate::view::{Cursor, Viewport, char_len, reconcile};

/// Session-level editing options, passed to the operations that need them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Copy the split line's indentation on Enter, plus one indent unit
    /// after an opening brace.
    pub smart_indent: bool,
    /// Width of one indent unit in spaces.
    pub indent_width: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            smart_indent: true,
            indent_width: 4,
        }
    }
}

/// Editing error type.
#[derive(Debug, Clone, Error)]
pub enum EditError {
    /// A navigation target referenced a line the document does not have.
    #[error("line {requested} is out of range (document has {total} lines)")]
    LineOutOfRange {
        /// The requested 1-based line number.
        requested: usize,
        /// Total lines in the document.
        total: usize,
    },
    /// A search pattern failed to compile.
    #[error("invalid search pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// One open document's full editing state.
pub struct EditBuffer {
    doc: Document,
    cursor: Cursor,
    view: Viewport,
    anchor: Option<Anchor>,
    history: History,
    language: Language,
    insert_mode: bool,
    dirty: bool,
}

impl EditBuffer {
    /// Create an empty buffer with the given window geometry.
    pub fn new(page_height: usize, page_width: usize) -> Self {
        Self::from_text("", page_height, page_width)
    }

    /// Create a buffer from raw text (line terminators already normalized).
    pub fn from_text(text: &str, page_height: usize, page_width: usize) -> Self {
        let mut doc = Document::new();
        doc.load(text);
        let cursor = Cursor::at_start(&doc);
        let view = Viewport::new(&doc, page_height, page_width);
        Self {
            doc,
            cursor,
            view,
            anchor: None,
            history: History::default(),
            language: Language::Plain,
            insert_mode: true,
            dirty: false,
        }
    }

    /// Replace all content, resetting cursor, viewport, selection, history
    /// and the dirty flag. Load failure recovery is the caller substituting
    /// an empty string.
    pub fn load(&mut self, text: &str) {
        self.doc.load(text);
        self.cursor = Cursor::at_start(&self.doc);
        self.view.first_visible = self.doc.head();
        self.view.first_visible_num = 1;
        self.view.scroll_offset = 1;
        self.view.screen_row = 0;
        self.anchor = None;
        self.history = History::default();
        self.dirty = false;
    }

    /// The line store.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The cursor position.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The visible window.
    pub fn viewport(&self) -> &Viewport {
        &self.view
    }

    /// The buffer's language selector.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Set the buffer's language (chosen from the filename by the host).
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Whether the buffer has unsaved modifications.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Toggle between insert and overwrite mode.
    pub fn toggle_insert_mode(&mut self) {
        self.insert_mode = !self.insert_mode;
    }

    /// Whether typing inserts (`true`) or overwrites (`false`).
    pub fn insert_mode(&self) -> bool {
        self.insert_mode
    }

    /// Update the window geometry (terminal resize) and reconcile.
    pub fn resize(&mut self, page_height: usize, page_width: usize) {
        self.view.page_height = page_height;
        self.view.page_width = page_width;
        self.reconcile();
    }

    /// Full document text in on-disk form (trailing newline).
    pub fn to_text(&self) -> String {
        self.doc.to_text()
    }

    // --- Selection ---

    /// Fix the anchor at the cursor if no selection is in progress.
    /// The first extending action calls this before moving the cursor.
    pub fn begin_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(Anchor::at_cursor(&self.cursor));
        }
    }

    /// Drop the selection anchor. No-op if nothing was selected.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Whether a selection is active.
    pub fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    /// Normalized per-line selection ranges, empty when inactive.
    pub fn selection_spans(&self) -> Vec<SelectionSpan> {
        match &self.anchor {
            Some(anchor) => spans(&self.doc, anchor, &self.cursor),
            None => Vec::new(),
        }
    }

    /// Delete the selected range, positioning the cursor at its start.
    /// Records an undo point first; no-op when nothing is selected.
    pub fn delete_selection(&mut self) {
        if self.anchor.is_none() {
            return;
        }
        self.record_undo();
        self.delete_selection_inner();
        self.heal_viewport();
        self.reconcile();
    }

    /// Line-text fragments spanning the normalized selection, for the
    /// clipboard collaborator. Empty when nothing is selected.
    pub fn copy_selection(&self) -> Vec<String> {
        let Some(anchor) = &self.anchor else {
            return Vec::new();
        };
        spans(&self.doc, anchor, &self.cursor)
            .iter()
            .map(|span| {
                let text = self.doc.text(span.line);
                let start = byte_of(text, span.start_col);
                let end = byte_of(text, span.end_col);
                text[start..end].to_string()
            })
            .collect()
    }

    /// Copy the selection and delete it.
    pub fn cut_selection(&mut self) -> Vec<String> {
        let fragments = self.copy_selection();
        self.delete_selection();
        fragments
    }

    /// Splice clipboard fragments at the cursor, replacing an active
    /// selection first. One fragment is inserted inline; further fragments
    /// become new lines, with the text after the cursor re-attached to the
    /// last one.
    pub fn paste(&mut self, fragments: &[String]) {
        if fragments.is_empty() {
            return;
        }
        self.record_undo();
        if self.anchor.is_some() {
            self.delete_selection_inner();
            self.heal_viewport();
        }

        let text = self.doc.text_mut(self.cursor.line);
        let split = byte_of(text, self.cursor.col);
        let remainder = text.split_off(split);
        text.push_str(&fragments[0]);

        if fragments.len() == 1 {
            self.cursor.col = char_len(self.doc.text(self.cursor.line)) + 1;
            self.doc.text_mut(self.cursor.line).push_str(&remainder);
        } else {
            let mut last = self.cursor.line;
            for (i, fragment) in fragments.iter().enumerate().skip(1) {
                let mut line = fragment.clone();
                if i == fragments.len() - 1 {
                    self.cursor.col = char_len(&line) + 1;
                    line.push_str(&remainder);
                }
                last = self.doc.insert_after(last, line);
                self.cursor.line_num += 1;
            }
            self.cursor.line = last;
        }
        self.dirty = true;
        self.reconcile();
    }

    // --- Character edits ---

    /// Type a character at the cursor: insert shifts trailing text right,
    /// overwrite replaces the character under the cursor (or appends at end
    /// of line). The cursor advances one column.
    pub fn insert_char(&mut self, ch: char) {
        self.record_undo();
        if self.anchor.is_some() {
            self.delete_selection_inner();
            self.heal_viewport();
        }
        let text = self.doc.text_mut(self.cursor.line);
        let at = byte_of(text, self.cursor.col);
        if self.insert_mode || at >= text.len() {
            text.insert(at, ch);
        } else {
            let end = at + text[at..].chars().next().map_or(0, char::len_utf8);
            text.replace_range(at..end, &ch.to_string());
        }
        self.cursor.col += 1;
        self.dirty = true;
        self.reconcile();
    }

    /// Enter: split the current line at the cursor. With smart indent the
    /// new line copies the split line's leading whitespace, plus one indent
    /// unit when the last significant character (ignoring a trailing line
    /// comment) is an opening brace. The cursor lands after the carried
    /// indent and the horizontal scroll resets.
    pub fn split_line(&mut self, config: &EditorConfig) {
        self.record_undo();
        if self.anchor.is_some() {
            self.delete_selection_inner();
            self.heal_viewport();
        }

        let text = self.doc.text_mut(self.cursor.line);
        let split = byte_of(text, self.cursor.col);
        let remainder = text.split_off(split);

        let mut indent = String::new();
        if config.smart_indent {
            let head = self.doc.text(self.cursor.line);
            indent = leading_blank(head).to_string();

            let mut effective = head;
            if let Some(marker) = self.language.rules().line_comment
                && let Some(pos) = effective.find(marker)
            {
                effective = &effective[..pos];
            }
            if effective.trim_end_matches([' ', '\t']).ends_with('{') {
                indent.push_str(&" ".repeat(config.indent_width));
            }
        }

        let new_col = char_len(&indent) + 1;
        indent.push_str(&remainder);
        let new_line = self.doc.insert_after(self.cursor.line, indent);

        self.cursor.line = new_line;
        self.cursor.line_num += 1;
        self.cursor.col = new_col;
        self.view.scroll_offset = 1;
        self.dirty = true;
        self.reconcile();
    }

    /// Backspace: delete the character left of the cursor, or at column 1
    /// join the current line onto the end of the previous one. With an
    /// active selection, deletes the selection instead. No-op at the very
    /// start of the document.
    pub fn backspace(&mut self) {
        if self.anchor.is_some() {
            self.delete_selection();
            return;
        }
        if self.cursor.col == 1 && self.doc.prev(self.cursor.line).is_none() {
            return;
        }
        self.record_undo();

        if self.cursor.col > 1 {
            let text = self.doc.text_mut(self.cursor.line);
            let start = byte_of(text, self.cursor.col - 1);
            let end = byte_of(text, self.cursor.col);
            text.replace_range(start..end, "");
            self.cursor.col -= 1;
        } else {
            let prev = self.doc.prev(self.cursor.line).expect("checked above");
            let joined = self.doc.text(self.cursor.line).to_string();
            let join_col = char_len(self.doc.text(prev)) + 1;
            self.doc.text_mut(prev).push_str(&joined);
            self.doc.remove(self.cursor.line);
            self.cursor.line = prev;
            self.cursor.line_num -= 1;
            self.cursor.col = join_col;
        }
        self.dirty = true;
        self.heal_viewport();
        self.reconcile();
    }

    /// Delete-forward: delete the character under the cursor, or at end of
    /// line join the next line onto the current one. No-op at the very end
    /// of the document.
    pub fn delete_forward(&mut self) {
        if self.anchor.is_some() {
            self.delete_selection();
            return;
        }
        let at_eol = self.cursor.col > char_len(self.doc.text(self.cursor.line));
        if at_eol && self.doc.next(self.cursor.line).is_none() {
            return;
        }
        self.record_undo();

        if !at_eol {
            let text = self.doc.text_mut(self.cursor.line);
            let start = byte_of(text, self.cursor.col);
            let end = byte_of(text, self.cursor.col + 1);
            text.replace_range(start..end, "");
        } else {
            let next = self.doc.next(self.cursor.line).expect("checked above");
            let joined = self.doc.text(next).to_string();
            self.doc.text_mut(self.cursor.line).push_str(&joined);
            self.doc.remove(next);
        }
        self.dirty = true;
        self.heal_viewport();
        self.reconcile();
    }

    /// Type a closing bracket with smart re-indentation: scan backward
    /// through the nesting of the matching pair for the unmatched opener.
    /// When one is found and the current line up to the cursor is blank,
    /// the line's indentation is replaced with the opener's before the
    /// character is inserted; otherwise the character is inserted normally.
    pub fn close_bracket(&mut self, closing: char) {
        let Some(opening) = matching_opener(closing) else {
            self.insert_char(closing);
            return;
        };

        let Some(opener_indent) = self.find_opener_indent(opening, closing) else {
            self.insert_char(closing);
            return;
        };

        let text = self.doc.text(self.cursor.line);
        let before_cursor = &text[..byte_of(text, self.cursor.col)];
        if !before_cursor.chars().all(|ch| ch == ' ' || ch == '\t') {
            self.insert_char(closing);
            return;
        }

        self.record_undo();
        if self.anchor.is_some() {
            self.delete_selection_inner();
            self.heal_viewport();
        }
        let text = self.doc.text_mut(self.cursor.line);
        let after = text[byte_of(text, self.cursor.col)..].to_string();
        let mut replaced = opener_indent;
        self.cursor.col = char_len(&replaced) + 2;
        replaced.push(closing);
        replaced.push_str(&after);
        *text = replaced;
        self.dirty = true;
        self.reconcile();
    }

    /// Tab: before the first non-blank character the cursor jumps to it;
    /// otherwise one indent unit of spaces is inserted.
    pub fn insert_tab(&mut self, config: &EditorConfig) {
        let text = self.doc.text(self.cursor.line);
        let first_non_blank = text.chars().position(|ch| ch != ' ' && ch != '\t');

        if let Some(first) = first_non_blank
            && self.cursor.col - 1 < first
        {
            self.cursor.col = first + 1;
            self.reconcile();
            return;
        }

        self.record_undo();
        let spaces = " ".repeat(config.indent_width);
        let text = self.doc.text_mut(self.cursor.line);
        let at = byte_of(text, self.cursor.col);
        text.insert_str(at, &spaces);
        self.cursor.col += config.indent_width;
        self.dirty = true;
        self.reconcile();
    }

    /// Toggle the language's line comment on the current line, or on every
    /// line of the selection. Uncommenting also removes one space after the
    /// marker; the block form uncomments only when every non-blank selected
    /// line is already commented. No-op for languages without a line
    /// comment marker.
    pub fn toggle_comment(&mut self) {
        let Some(marker) = self.language.rules().line_comment else {
            return;
        };
        self.record_undo();

        let targets: Vec<LineId> = match &self.anchor {
            None => vec![self.cursor.line],
            Some(anchor) => {
                let norm = normalize(anchor, &self.cursor);
                let mut ids = Vec::new();
                let mut line = norm.start_line;
                loop {
                    ids.push(line);
                    if line == norm.end_line {
                        break;
                    }
                    match self.doc.next(line) {
                        Some(next) => line = next,
                        None => break,
                    }
                }
                ids
            }
        };

        // Blank lines never disqualify an uncomment pass.
        let all_commented = targets.iter().all(|id| {
            let text = self.doc.text(*id);
            let body = text.trim_start_matches([' ', '\t']);
            body.is_empty() || body.starts_with(marker)
        });

        for id in targets {
            let text = self.doc.text_mut(id);
            let indent_len = leading_blank(text).len();
            if all_commented {
                let body = &text[indent_len..];
                if body.starts_with(marker) {
                    let mut strip = marker.len();
                    if body[strip..].starts_with(' ') {
                        strip += 1;
                    }
                    text.replace_range(indent_len..indent_len + strip, "");
                }
            } else if !text[indent_len..].is_empty() {
                text.insert_str(indent_len, &format!("{marker} "));
            }
        }
        self.dirty = true;
        self.reconcile();
    }

    // --- Navigation ---

    /// Move up one line.
    pub fn move_up(&mut self) {
        if let Some(prev) = self.doc.prev(self.cursor.line) {
            self.cursor.line = prev;
            self.cursor.line_num -= 1;
        }
        self.reconcile();
    }

    /// Move down one line.
    pub fn move_down(&mut self) {
        if let Some(next) = self.doc.next(self.cursor.line) {
            self.cursor.line = next;
            self.cursor.line_num += 1;
        }
        self.reconcile();
    }

    /// Move left one column, wrapping to the previous line's end.
    pub fn move_left(&mut self) {
        if self.cursor.col > 1 {
            self.cursor.col -= 1;
        } else if let Some(prev) = self.doc.prev(self.cursor.line) {
            self.cursor.line = prev;
            self.cursor.line_num -= 1;
            self.cursor.col = char_len(self.doc.text(prev)) + 1;
        }
        self.reconcile();
    }

    /// Move right one column, wrapping to the next line's start.
    pub fn move_right(&mut self) {
        if self.cursor.col <= char_len(self.doc.text(self.cursor.line)) {
            self.cursor.col += 1;
        } else if let Some(next) = self.doc.next(self.cursor.line) {
            self.cursor.line = next;
            self.cursor.line_num += 1;
            self.cursor.col = 1;
        }
        self.reconcile();
    }

    /// Move to column 1.
    pub fn move_line_start(&mut self) {
        self.cursor.col = 1;
        self.reconcile();
    }

    /// Move one past the last character.
    pub fn move_line_end(&mut self) {
        self.cursor.col = char_len(self.doc.text(self.cursor.line)) + 1;
        self.reconcile();
    }

    /// Move up one window height.
    pub fn page_up(&mut self) {
        for _ in 0..self.view.page_height {
            match self.doc.prev(self.cursor.line) {
                Some(prev) => {
                    self.cursor.line = prev;
                    self.cursor.line_num -= 1;
                }
                None => break,
            }
        }
        self.reconcile();
    }

    /// Move down one window height.
    pub fn page_down(&mut self) {
        for _ in 0..self.view.page_height {
            match self.doc.next(self.cursor.line) {
                Some(next) => {
                    self.cursor.line = next;
                    self.cursor.line_num += 1;
                }
                None => break,
            }
        }
        self.reconcile();
    }

    /// Jump to a 1-based line number. Out-of-range targets are rejected
    /// with the state unchanged.
    pub fn goto_line(&mut self, number: usize) -> Result<(), EditError> {
        let Some(line) = self.doc.line_at(number) else {
            return Err(EditError::LineOutOfRange {
                requested: number,
                total: self.doc.line_count(),
            });
        };
        self.cursor.line = line;
        self.cursor.line_num = number;
        self.cursor.col = 1;
        self.reconcile();
        Ok(())
    }

    /// Word motion forward: skip the current run of non-space characters,
    /// then any spaces; at end of line wrap to the next line's start.
    pub fn word_forward(&mut self) {
        let chars: Vec<char> = self.doc.text(self.cursor.line).chars().collect();
        let mut pos = self.cursor.col - 1;

        if pos >= chars.len() {
            if let Some(next) = self.doc.next(self.cursor.line) {
                self.cursor.line = next;
                self.cursor.line_num += 1;
                self.cursor.col = 1;
            }
            self.reconcile();
            return;
        }
        while pos < chars.len() && !chars[pos].is_whitespace() {
            pos += 1;
        }
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        self.cursor.col = pos + 1;
        self.reconcile();
    }

    /// Word motion backward: mirror of [`word_forward`](Self::word_forward),
    /// wrapping to the previous line's end at column 1.
    pub fn word_backward(&mut self) {
        if self.cursor.col < 2 {
            if let Some(prev) = self.doc.prev(self.cursor.line) {
                self.cursor.line = prev;
                self.cursor.line_num -= 1;
                self.cursor.col = char_len(self.doc.text(prev)) + 1;
            }
            self.reconcile();
            return;
        }
        let chars: Vec<char> = self.doc.text(self.cursor.line).chars().collect();
        let mut pos = self.cursor.col as isize - 2;
        while pos >= 0 && chars[pos as usize].is_whitespace() {
            pos -= 1;
        }
        while pos >= 0 && !chars[pos as usize].is_whitespace() {
            pos -= 1;
        }
        self.cursor.col = (pos + 2) as usize;
        self.reconcile();
    }

    /// Paragraph motion forward: scan past the current non-blank run, then
    /// past any blank lines, stopping at the next non-blank line or the
    /// document end.
    pub fn paragraph_forward(&mut self) {
        if self.doc.next(self.cursor.line).is_none() {
            return;
        }
        let mut line = self.cursor.line;
        let mut seen_text = false;
        while self.doc.next(line).is_some() {
            if !self.doc.text(line).is_empty() {
                seen_text = true;
            }
            if seen_text && self.doc.text(line).is_empty() {
                break;
            }
            line = self.doc.next(line).expect("checked");
            self.cursor.line_num += 1;
        }
        while self.doc.next(line).is_some() && self.doc.text(line).is_empty() {
            line = self.doc.next(line).expect("checked");
            self.cursor.line_num += 1;
        }
        self.cursor.line = line;
        self.cursor.col = 1;
        self.reconcile();
    }

    /// Paragraph motion backward: mirror of
    /// [`paragraph_forward`](Self::paragraph_forward).
    pub fn paragraph_backward(&mut self) {
        if self.doc.prev(self.cursor.line).is_none() {
            return;
        }
        let mut line = self.cursor.line;
        let mut seen_text = false;
        while let Some(prev) = self.doc.prev(line) {
            if !self.doc.text(line).is_empty() {
                seen_text = true;
            }
            if seen_text && self.doc.text(prev).is_empty() {
                line = prev;
                self.cursor.line_num -= 1;
                break;
            }
            line = prev;
            self.cursor.line_num -= 1;
        }
        self.cursor.line = line;
        self.cursor.col = 1;
        self.reconcile();
    }

    // --- Undo/Redo ---

    /// Snapshot the document and push an undo point, clearing redo.
    pub fn record_undo(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    /// Restore the most recent undo snapshot. Silent no-op when empty.
    pub fn undo(&mut self) {
        let current = self.snapshot();
        if let Some(snapshot) = self.history.undo(current) {
            self.restore(&snapshot);
        }
    }

    /// Re-apply the most recently undone state. Silent no-op when empty.
    pub fn redo(&mut self) {
        let current = self.snapshot();
        if let Some(snapshot) = self.history.redo(current) {
            self.restore(&snapshot);
        }
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.doc.lines().map(str::to_string).collect(),
            cursor_line_num: self.cursor.line_num,
            cursor_col: self.cursor.col,
            // The arena keeps no positional index; walk from the head.
            first_visible_num: self.doc.line_number(self.view.first_visible),
        }
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        self.doc.rebuild(snapshot.lines.iter().cloned());
        let total = self.doc.line_count();

        // Recorded line numbers may exceed the rebuilt length when the
        // history crosses a deletion; clamp to the last line.
        let cursor_num = snapshot.cursor_line_num.clamp(1, total);
        self.cursor.line = self.doc.line_at(cursor_num).expect("clamped");
        self.cursor.line_num = cursor_num;
        self.cursor.col = snapshot.cursor_col;

        let visible_num = snapshot.first_visible_num.clamp(1, total);
        self.view.first_visible = self.doc.line_at(visible_num).expect("clamped");
        self.view.first_visible_num = visible_num;
        self.view.screen_row = cursor_num.saturating_sub(visible_num);

        self.anchor = None;
        self.dirty = true;
        self.reconcile();
    }

    // --- Internals ---

    fn reconcile(&mut self) {
        reconcile(&self.doc, &mut self.cursor, &mut self.view);
    }

    /// Make `[start_col, end_col)` on one line the active selection, with
    /// the cursor at its end.
    pub(crate) fn select_range(
        &mut self,
        line: LineId,
        line_num: usize,
        start_col: usize,
        end_col: usize,
    ) {
        self.anchor = Some(Anchor {
            line,
            line_num,
            col: start_col,
        });
        self.cursor.line = line;
        self.cursor.line_num = line_num;
        self.cursor.col = end_col;
        self.reconcile();
    }

    /// Replace a single-line selection with `replacement`, leaving the
    /// cursor just past it. The caller records the undo point.
    pub(crate) fn replace_selected_fragment(&mut self, replacement: &str) {
        let Some(anchor) = self.anchor.take() else {
            return;
        };
        let norm = normalize(&anchor, &self.cursor);
        let text = self.doc.text_mut(norm.start_line);
        let start = byte_of(text, norm.start_col);
        let end = byte_of(text, norm.end_col);
        text.replace_range(start..end, replacement);

        self.cursor.line = norm.start_line;
        self.cursor.line_num = norm.start_line_num;
        self.cursor.col = norm.start_col + replacement.chars().count();
        self.dirty = true;
        self.reconcile();
    }

    pub(crate) fn document_mut_text(&mut self, id: LineId) -> &mut String {
        self.doc.text_mut(id)
    }

    /// Mark the buffer dirty and reconcile after an edit applied through
    /// [`document_mut_text`](Self::document_mut_text).
    pub(crate) fn finish_bulk_edit(&mut self) {
        self.dirty = true;
        self.reconcile();
    }

    /// Re-point the window top at the cursor if a structural edit deleted
    /// the line it referenced.
    fn heal_viewport(&mut self) {
        if !self.doc.contains(self.view.first_visible) {
            self.view.first_visible = self.cursor.line;
            self.view.first_visible_num = self.cursor.line_num;
        }
    }

    fn delete_selection_inner(&mut self) {
        let Some(anchor) = self.anchor.take() else {
            return;
        };
        let norm = normalize(&anchor, &self.cursor);

        self.cursor.line = norm.start_line;
        self.cursor.line_num = norm.start_line_num;
        self.cursor.col = norm.start_col;

        if norm.start_line == norm.end_line {
            let text = self.doc.text_mut(norm.start_line);
            let start = byte_of(text, norm.start_col);
            let end = byte_of(text, norm.end_col);
            text.replace_range(start..end, "");
        } else {
            let end_text = self.doc.text(norm.end_line);
            let suffix = end_text[byte_of(end_text, norm.end_col)..].to_string();

            let start_text = self.doc.text_mut(norm.start_line);
            start_text.truncate(byte_of(start_text, norm.start_col));
            start_text.push_str(&suffix);

            let mut line = self.doc.next(norm.start_line).expect("multi-line range");
            loop {
                let next = self.doc.next(line);
                let is_end = line == norm.end_line;
                self.doc.remove(line);
                if is_end {
                    break;
                }
                line = next.expect("end line not yet removed");
            }
        }
        self.dirty = true;
    }

    fn find_opener_indent(&self, opening: char, closing: char) -> Option<String> {
        let mut nesting = 0i32;
        let mut line = Some(self.cursor.line);
        let mut from_col = self.cursor.col - 1; // 0-based scan start

        while let Some(id) = line {
            let chars: Vec<char> = self.doc.text(id).chars().collect();
            let start = from_col.min(chars.len().saturating_sub(1));
            if !chars.is_empty() {
                for i in (0..=start).rev() {
                    if chars[i] == closing {
                        nesting += 1;
                    } else if chars[i] == opening {
                        nesting -= 1;
                        if nesting < 0 {
                            return Some(leading_blank(self.doc.text(id)).to_string());
                        }
                    }
                }
            }
            line = self.doc.prev(id);
            if let Some(prev) = line {
                from_col = char_len(self.doc.text(prev)).saturating_sub(1);
            }
        }
        None
    }
}

fn matching_opener(closing: char) -> Option<char> {
    match closing {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

/// Byte offset of a 1-based character column (clamped to the line end).
pub(crate) fn byte_of(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col.saturating_sub(1))
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Leading run of spaces and tabs.
pub(crate) fn leading_blank(text: &str) -> &str {
    let end = text
        .find(|ch| ch != ' ' && ch != '\t')
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> EditBuffer {
        EditBuffer::from_text(text, 24, 80)
    }

    fn lines(buffer: &EditBuffer) -> Vec<String> {
        buffer.document().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_insert_char_shifts_text() {
        let mut buf = buffer("ac");
        buf.move_right();
        buf.insert_char('b');
        assert_eq!(lines(&buf), vec!["abc"]);
        assert_eq!(buf.cursor().col, 3);
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_overwrite_replaces_and_appends() {
        let mut buf = buffer("abc");
        buf.toggle_insert_mode();
        buf.insert_char('X');
        assert_eq!(lines(&buf), vec!["Xbc"]);

        buf.move_line_end();
        buf.insert_char('!');
        assert_eq!(lines(&buf), vec!["Xbc!"]);
    }

    #[test]
    fn test_smart_indent_after_brace() {
        let mut buf = buffer("int main() {\n\n}");
        buf.set_language(Language::CFamily);
        buf.move_line_end();
        buf.split_line(&EditorConfig::default());

        assert_eq!(lines(&buf), vec!["int main() {", "    ", "", "}"]);
        assert_eq!(buf.cursor().line_num, 2);
        assert_eq!(buf.cursor().col, 5);
    }

    #[test]
    fn test_smart_indent_ignores_brace_in_comment() {
        let mut buf = buffer("x(); // open {");
        buf.set_language(Language::CFamily);
        buf.move_line_end();
        buf.split_line(&EditorConfig::default());
        assert_eq!(lines(&buf), vec!["x(); // open {", ""]);
    }

    #[test]
    fn test_split_line_carries_remainder() {
        let mut buf = buffer("hello world");
        buf.goto_line(1).unwrap();
        for _ in 0..5 {
            buf.move_right();
        }
        buf.split_line(&EditorConfig {
            smart_indent: false,
            indent_width: 4,
        });
        assert_eq!(lines(&buf), vec!["hello", " world"]);
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_backspace_sequence_then_noop() {
        let mut buf = buffer("abc");
        buf.move_line_end();
        for _ in 0..3 {
            buf.backspace();
        }
        assert_eq!(lines(&buf), vec![""]);
        assert_eq!(buf.cursor().col, 1);

        let depth_before = buf.history.undo_depth();
        buf.backspace();
        assert_eq!(lines(&buf), vec![""]);
        assert_eq!(buf.history.undo_depth(), depth_before);
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buf = buffer("foo\nbar");
        buf.goto_line(2).unwrap();
        buf.backspace();
        assert_eq!(lines(&buf), vec!["foobar"]);
        assert_eq!(buf.cursor().col, 4);
        assert_eq!(buf.cursor().line_num, 1);
    }

    #[test]
    fn test_delete_forward_joins_at_eol() {
        let mut buf = buffer("foo\nbar");
        buf.move_line_end();
        buf.delete_forward();
        assert_eq!(lines(&buf), vec!["foobar"]);

        buf.goto_line(1).unwrap();
        buf.delete_forward();
        assert_eq!(lines(&buf), vec!["oobar"]);
    }

    #[test]
    fn test_delete_selection_multi_line() {
        let mut buf = buffer("foo\nbar\nbaz");
        buf.begin_selection();
        buf.goto_line(3).unwrap();
        buf.move_right();
        buf.delete_selection();

        assert_eq!(lines(&buf), vec!["az"]);
        assert_eq!(buf.cursor().line_num, 1);
        assert_eq!(buf.cursor().col, 1);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_delete_selection_same_line() {
        let mut buf = buffer("hello world");
        for _ in 0..5 {
            buf.move_right();
        }
        buf.begin_selection();
        buf.move_line_end();
        buf.delete_selection();
        assert_eq!(lines(&buf), vec!["hello"]);
    }

    #[test]
    fn test_copy_and_paste_multi_line() {
        let mut buf = buffer("one\ntwo");
        buf.begin_selection();
        buf.goto_line(2).unwrap();
        buf.move_line_end();
        let fragments = buf.copy_selection();
        assert_eq!(fragments, vec!["one".to_string(), "two".to_string()]);

        buf.clear_selection();
        let mut target = buffer("AB");
        target.move_right();
        target.paste(&fragments);
        assert_eq!(lines(&target), vec!["Aone", "twoB"]);
        assert_eq!(target.cursor().line_num, 2);
        assert_eq!(target.cursor().col, 4);
    }

    #[test]
    fn test_paste_single_fragment_inline() {
        let mut buf = buffer("ad");
        buf.move_right();
        buf.paste(&["bc".to_string()]);
        assert_eq!(lines(&buf), vec!["abcd"]);
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_close_bracket_reindents_blank_line() {
        let mut buf = buffer("  if (x) {\n    y();\n   ");
        buf.goto_line(3).unwrap();
        buf.move_line_end();
        buf.close_bracket('}');
        assert_eq!(lines(&buf), vec!["  if (x) {", "    y();", "  }"]);
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_close_bracket_plain_insert_when_line_has_text() {
        let mut buf = buffer("if (x) {\nreturn y");
        buf.goto_line(2).unwrap();
        buf.move_line_end();
        buf.close_bracket('}');
        assert_eq!(lines(&buf), vec!["if (x) {", "return y}"]);
    }

    #[test]
    fn test_close_bracket_without_opener() {
        let mut buf = buffer("   ");
        buf.move_line_end();
        buf.close_bracket(')');
        assert_eq!(lines(&buf), vec!["   )"]);
    }

    #[test]
    fn test_close_bracket_skips_balanced_pairs() {
        let mut buf = buffer("{\n  { inner }\n  ");
        buf.goto_line(3).unwrap();
        buf.move_line_end();
        buf.close_bracket('}');
        // The balanced inner pair is skipped; the outer opener has no indent.
        assert_eq!(lines(&buf), vec!["{", "  { inner }", "}"]);
    }

    #[test]
    fn test_insert_tab_jumps_to_first_text() {
        let config = EditorConfig::default();
        let mut buf = buffer("    x");
        buf.insert_tab(&config);
        assert_eq!(buf.cursor().col, 5);
        assert_eq!(lines(&buf), vec!["    x"]);

        buf.insert_tab(&config);
        assert_eq!(lines(&buf), vec!["        x"]);
        assert_eq!(buf.cursor().col, 9);
    }

    #[test]
    fn test_word_forward_and_wrap() {
        let mut buf = buffer("foo  bar\nnext");
        buf.word_forward();
        assert_eq!(buf.cursor().col, 6);
        buf.word_forward();
        assert_eq!(buf.cursor().col, 9);
        buf.word_forward();
        assert_eq!((buf.cursor().line_num, buf.cursor().col), (2, 1));
    }

    #[test]
    fn test_word_backward_and_wrap() {
        let mut buf = buffer("foo bar\nnext");
        buf.goto_line(2).unwrap();
        buf.word_backward();
        assert_eq!((buf.cursor().line_num, buf.cursor().col), (1, 8));
        buf.word_backward();
        assert_eq!(buf.cursor().col, 5);
        buf.word_backward();
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_paragraph_motion() {
        let mut buf = buffer("a\nb\n\n\nc\nd");
        buf.paragraph_forward();
        assert_eq!((buf.cursor().line_num, buf.cursor().col), (5, 1));
        buf.paragraph_backward();
        assert_eq!(buf.cursor().line_num, 4);
    }

    #[test]
    fn test_goto_line_out_of_range() {
        let mut buf = buffer("a\nb");
        let before = (buf.cursor().line_num, buf.cursor().col);
        let err = buf.goto_line(5).unwrap_err();
        assert!(matches!(
            err,
            EditError::LineOutOfRange {
                requested: 5,
                total: 2
            }
        ));
        assert_eq!((buf.cursor().line_num, buf.cursor().col), before);
    }

    #[test]
    fn test_toggle_comment_single_line() {
        let mut buf = buffer("    int x;");
        buf.set_language(Language::CFamily);
        buf.toggle_comment();
        assert_eq!(lines(&buf), vec!["    // int x;"]);
        buf.toggle_comment();
        assert_eq!(lines(&buf), vec!["    int x;"]);
    }

    #[test]
    fn test_toggle_comment_selection_block() {
        let mut buf = buffer("a();\n\nb();");
        buf.set_language(Language::CFamily);
        buf.begin_selection();
        buf.goto_line(3).unwrap();
        buf.move_line_end();
        buf.toggle_comment();
        // Blank line stays blank; non-blank lines gain the marker.
        assert_eq!(lines(&buf), vec!["// a();", "", "// b();"]);

        buf.toggle_comment();
        assert_eq!(lines(&buf), vec!["a();", "", "b();"]);
    }

    #[test]
    fn test_toggle_comment_without_marker_is_noop() {
        let mut buf = buffer("text");
        let depth = buf.history.undo_depth();
        buf.toggle_comment();
        assert_eq!(lines(&buf), vec!["text"]);
        assert_eq!(buf.history.undo_depth(), depth);
    }

    #[test]
    fn test_undo_redo_inverse_law() {
        let mut buf = buffer("start");
        let initial = lines(&buf);

        buf.move_line_end();
        buf.insert_char('1');
        buf.insert_char('2');
        buf.split_line(&EditorConfig::default());
        let after = lines(&buf);

        buf.undo();
        buf.undo();
        buf.undo();
        assert_eq!(lines(&buf), initial);

        buf.redo();
        buf.redo();
        buf.redo();
        assert_eq!(lines(&buf), after);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buf = buffer("x");
        buf.move_line_end();
        buf.insert_char('y');
        buf.undo();
        assert!(buf.can_redo());

        buf.insert_char('z');
        assert!(!buf.can_redo());
    }

    #[test]
    fn test_undo_across_structural_delete() {
        let mut buf = buffer("a\nb\nc\nd\ne");
        buf.goto_line(5).unwrap();
        buf.begin_selection();
        buf.goto_line(2).unwrap();
        buf.delete_selection();
        assert_eq!(lines(&buf), vec!["a", "e"]);

        buf.undo();
        assert_eq!(buf.document().line_count(), 5);
        assert_eq!(buf.cursor().line_num, 2);

        buf.redo();
        assert_eq!(lines(&buf), vec!["a", "e"]);
        assert!(buf.cursor().line_num <= buf.document().line_count());
    }

    #[test]
    fn test_load_resets_state() {
        let mut buf = buffer("old");
        buf.move_line_end();
        buf.insert_char('!');
        assert!(buf.is_dirty());

        buf.load("new content\nsecond");
        assert!(!buf.is_dirty());
        assert!(!buf.can_undo());
        assert_eq!(buf.cursor().line_num, 1);
        assert_eq!(buf.cursor().col, 1);
        assert_eq!(lines(&buf), vec!["new content", "second"]);
    }

    #[test]
    fn test_unicode_columns() {
        let mut buf = buffer("héllo");
        buf.move_right();
        buf.move_right();
        buf.backspace();
        assert_eq!(lines(&buf), vec!["hllo"]);
    }
}
