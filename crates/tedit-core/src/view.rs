//! Cursor & Viewport Reconciliation
//!
//! The cursor is the active edit position; the viewport is the visible
//! window over the document. [`reconcile`] runs after every navigation or
//! edit (and on resize) and brings both back within their invariants:
//!
//! - `1 <= cursor.col <= line length + 1` (one past the last character),
//! - the cursor line lies within `[first_visible, first_visible + page_height - 1]`,
//! - the cursor column lies within `[scroll_offset, scroll_offset + page_width - 1]`.
//!
//! `reconcile` is a pure function of (document position, window geometry):
//! calling it twice without an intervening change is idempotent.
//!
//! All columns are 1-based character positions. [`Viewport::screen_position`]
//! converts to renderer cells, accounting for wide characters.

use unicode_width::UnicodeWidthChar;

use crate::document::{Document, LineId};

/// Active edit position: line handle plus 1-based line number and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Handle of the line the cursor is on.
    pub line: LineId,
    /// 1-based line number, kept in step with `line`.
    pub line_num: usize,
    /// 1-based column; may sit one past the last character.
    pub col: usize,
}

impl Cursor {
    /// Cursor at the start of the document.
    pub fn at_start(doc: &Document) -> Self {
        Self {
            line: doc.head(),
            line_num: 1,
            col: 1,
        }
    }
}

/// Visible window over the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Handle of the first visible line.
    pub first_visible: LineId,
    /// 1-based number of the first visible line.
    pub first_visible_num: usize,
    /// 1-based first visible column (horizontal scroll offset).
    pub scroll_offset: usize,
    /// Window height in lines.
    pub page_height: usize,
    /// Window width in columns.
    pub page_width: usize,
    /// Cursor row within the window, 0-based. Derived by [`reconcile`].
    pub screen_row: usize,
}

impl Viewport {
    /// Viewport at the top of the document with the given geometry.
    pub fn new(doc: &Document, page_height: usize, page_width: usize) -> Self {
        Self {
            first_visible: doc.head(),
            first_visible_num: 1,
            scroll_offset: 1,
            page_height,
            page_width,
            screen_row: 0,
        }
    }

    /// Cursor position in renderer cells: `(screen_row, screen_col)`,
    /// both 0-based. Wide characters occupy two cells.
    pub fn screen_position(&self, doc: &Document, cursor: &Cursor) -> (usize, usize) {
        let text = doc.text(cursor.line);
        let cells: usize = text
            .chars()
            .skip(self.scroll_offset - 1)
            .take(cursor.col.saturating_sub(self.scroll_offset))
            .map(|ch| ch.width().unwrap_or(0))
            .sum();
        (self.screen_row, cells)
    }
}

/// Number of characters in `text` (columns are character positions).
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Clamp the cursor and snap the viewport so both invariants hold.
pub fn reconcile(doc: &Document, cursor: &mut Cursor, view: &mut Viewport) {
    let line_len = char_len(doc.text(cursor.line));
    cursor.col = cursor.col.clamp(1, line_len + 1);

    if view.page_height == 0 {
        return;
    }

    if cursor.line_num < view.first_visible_num {
        view.first_visible = cursor.line;
        view.first_visible_num = cursor.line_num;
    } else if cursor.line_num >= view.first_visible_num + view.page_height {
        let mut top = cursor.line;
        for _ in 0..view.page_height - 1 {
            match doc.prev(top) {
                Some(prev) => top = prev,
                None => break,
            }
        }
        view.first_visible = top;
        view.first_visible_num = cursor.line_num - (view.page_height - 1);
    }
    view.screen_row = cursor.line_num - view.first_visible_num;

    if view.page_width == 0 {
        return;
    }

    if cursor.col < view.scroll_offset {
        view.scroll_offset = cursor.col;
    } else if cursor.col >= view.scroll_offset + view.page_width {
        view.scroll_offset = cursor.col - view.page_width + 1;
    }
}
