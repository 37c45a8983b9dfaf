//! Selection
//!
//! A selection is an anchor (fixed on the first extending action) plus the
//! live cursor as the other endpoint. Nothing is stored per line: the
//! per-line ranges the renderer needs are a pure function of
//! `{anchor, cursor}`, computed on demand by [`spans`]. Normalization always
//! treats the lexicographically smaller `(line number, column)` endpoint as
//! the start, independent of extension direction.

use crate::document::{Document, LineId};
use crate::view::{Cursor, char_len};

/// Fixed endpoint of an in-progress selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Handle of the anchor line.
    pub line: LineId,
    /// 1-based line number of the anchor.
    pub line_num: usize,
    /// 1-based column of the anchor.
    pub col: usize,
}

impl Anchor {
    /// Anchor at the cursor's current position.
    pub fn at_cursor(cursor: &Cursor) -> Self {
        Self {
            line: cursor.line,
            line_num: cursor.line_num,
            col: cursor.col,
        }
    }
}

/// One selected line range: columns `[start_col, end_col)`, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    /// Handle of the selected line.
    pub line: LineId,
    /// 1-based line number.
    pub line_num: usize,
    /// First selected column (inclusive).
    pub start_col: usize,
    /// End column (exclusive).
    pub end_col: usize,
}

/// An endpoint pair ordered so the smaller `(line number, column)` comes first.
pub(crate) struct Normalized {
    pub start_line: LineId,
    pub start_line_num: usize,
    pub start_col: usize,
    pub end_line: LineId,
    pub end_line_num: usize,
    pub end_col: usize,
}

pub(crate) fn normalize(anchor: &Anchor, cursor: &Cursor) -> Normalized {
    let anchor_first = (anchor.line_num, anchor.col) <= (cursor.line_num, cursor.col);
    if anchor_first {
        Normalized {
            start_line: anchor.line,
            start_line_num: anchor.line_num,
            start_col: anchor.col,
            end_line: cursor.line,
            end_line_num: cursor.line_num,
            end_col: cursor.col,
        }
    } else {
        Normalized {
            start_line: cursor.line,
            start_line_num: cursor.line_num,
            start_col: cursor.col,
            end_line: anchor.line,
            end_line_num: anchor.line_num,
            end_col: anchor.col,
        }
    }
}

/// Per-line selected ranges between `anchor` and `cursor`.
///
/// Interior lines are selected full width (`[1, len+1)`); the first and
/// last lines are clipped at the endpoints. The same absolute endpoint pair
/// yields the same spans regardless of extension direction.
pub fn spans(doc: &Document, anchor: &Anchor, cursor: &Cursor) -> Vec<SelectionSpan> {
    let norm = normalize(anchor, cursor);
    let mut result = Vec::new();

    let mut line = norm.start_line;
    let mut line_num = norm.start_line_num;
    loop {
        let start_col = if line == norm.start_line {
            norm.start_col
        } else {
            1
        };
        let end_col = if line == norm.end_line {
            norm.end_col
        } else {
            char_len(doc.text(line)) + 1
        };
        result.push(SelectionSpan {
            line,
            line_num,
            start_col,
            end_col,
        });
        if line == norm.end_line {
            break;
        }
        match doc.next(line) {
            Some(next) => {
                line = next;
                line_num += 1;
            }
            None => break,
        }
    }

    result
}
