//! # tedit-core
//!
//! Headless editing engine for a line-oriented text editor: document
//! storage, cursor and viewport management, selection, edit operations,
//! bounded undo/redo and search/replace, with no terminal or rendering
//! dependencies. A host (TUI frontend, test harness) owns file I/O,
//! keymaps and drawing, and drives one [`EditBuffer`] per open document.
//!
//! Single-threaded by design: buffers are plain owned values with no
//! interior synchronization. A host that wants background work clones the
//! data it needs out of the buffer.
//!
//! ## Quick start
//!
//! ```rust
//! use tedit_core::{EditBuffer, EditorConfig, SearchOptions};
//!
//! let mut buffer = EditBuffer::from_text("fn main() {\n}\n", 24, 80);
//! buffer.move_line_end();
//! buffer.split_line(&EditorConfig::default());
//!
//! assert!(buffer.find_next("main", &SearchOptions::default()).unwrap());
//! buffer.undo();
//! assert_eq!(buffer.to_text(), "fn main() {\n}\n");
//! ```
//!
//! ## Modules
//!
//! - [`document`]: the line store (slot arena, generational handles)
//! - [`view`]: cursor/viewport invariants and reconciliation
//! - [`selection`]: anchor + derived per-line spans
//! - [`buffer`]: [`EditBuffer`], the edit operations and their undo discipline
//! - [`history`]: bounded whole-document snapshot stacks
//! - [`search`]: find/replace over the line store

#![warn(missing_docs)]

pub mod buffer;
pub mod document;
pub mod history;
pub mod search;
pub mod selection;
pub mod view;

pub use buffer::{EditBuffer, EditError, EditorConfig};
pub use document::{Document, LineId};
pub use history::{DEFAULT_UNDO_CAPACITY, History, Snapshot};
pub use search::SearchOptions;
pub use selection::{Anchor, SelectionSpan, spans};
pub use view::{Cursor, Viewport, reconcile};
