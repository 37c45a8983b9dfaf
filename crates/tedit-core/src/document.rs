//! Line Storage Layer
//!
//! Stores document content as an ordered sequence of text lines (no line
//! terminators) in a slot arena. Lines are addressed by generational
//! [`LineId`] handles with explicit prev/next links, giving O(1) neighbor
//! insertion and deletion while keeping handles stable across unrelated
//! edits. Locating a line by absolute number is a linear walk from the head;
//! nothing here caches positional indexes.
//!
//! Invariant: a document always contains at least one line.

/// Stable handle to one line of a [`Document`].
///
/// A handle is invalidated when its line is deleted or when the whole
/// document is replaced (load / undo restore); using a stale handle is a
/// programming error and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    slot: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct LineRecord {
    text: String,
    prev: Option<LineId>,
    next: Option<LineId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    record: Option<LineRecord>,
}

/// Ordered, mutable sequence of text lines.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: LineId,
    line_count: usize,
}

impl Document {
    /// Create a document holding a single empty line.
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: LineId {
                slot: 0,
                generation: 0,
            },
            line_count: 0,
        };
        doc.rebuild(std::iter::once(String::new()));
        doc
    }

    /// Replace all content with `raw` split on line boundaries.
    ///
    /// A single trailing `\r` is stripped from each line (CRLF input), a
    /// trailing newline does not create an extra empty line, and empty input
    /// yields one empty line. All previously issued handles are invalidated.
    pub fn load(&mut self, raw: &str) {
        let mut lines: Vec<String> = raw
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        if lines.len() > 1 && raw.ends_with('\n') {
            lines.pop();
        }
        self.rebuild(lines);
    }

    /// Discard the current line chain and rebuild it from `lines`.
    ///
    /// Guarantees at least one line even for an empty iterator. Used by both
    /// [`load`](Self::load) and undo/redo snapshot restoration.
    pub fn rebuild<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let generation = self
            .slots
            .iter()
            .map(|slot| slot.generation)
            .max()
            .unwrap_or(0)
            .wrapping_add(1);
        self.slots.clear();
        self.free.clear();
        self.line_count = 0;

        let mut prev: Option<LineId> = None;
        for text in lines {
            let id = LineId {
                slot: self.slots.len(),
                generation,
            };
            self.slots.push(Slot {
                generation,
                record: Some(LineRecord {
                    text,
                    prev,
                    next: None,
                }),
            });
            if let Some(prev_id) = prev {
                self.record_mut(prev_id).next = Some(id);
            } else {
                self.head = id;
            }
            self.line_count += 1;
            prev = Some(id);
        }

        if self.line_count == 0 {
            self.slots.push(Slot {
                generation,
                record: Some(LineRecord {
                    text: String::new(),
                    prev: None,
                    next: None,
                }),
            });
            self.head = LineId { slot: 0, generation };
            self.line_count = 1;
        }
    }

    /// Handle of the first line.
    pub fn head(&self) -> LineId {
        self.head
    }

    /// Handle of the last line (linear walk from the head).
    pub fn tail(&self) -> LineId {
        let mut id = self.head;
        while let Some(next) = self.next(id) {
            id = next;
        }
        id
    }

    /// Total number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Text of the line identified by `id`.
    pub fn text(&self, id: LineId) -> &str {
        &self.record(id).text
    }

    /// Mutable text of the line identified by `id`.
    pub fn text_mut(&mut self, id: LineId) -> &mut String {
        &mut self.record_mut(id).text
    }

    /// Handle of the line after `id`, if any.
    pub fn next(&self, id: LineId) -> Option<LineId> {
        self.record(id).next
    }

    /// Handle of the line before `id`, if any.
    pub fn prev(&self, id: LineId) -> Option<LineId> {
        self.record(id).prev
    }

    /// Insert a new line containing `text` immediately after `id`.
    ///
    /// O(1); neighbors are relinked and the line count updated.
    pub fn insert_after(&mut self, id: LineId, text: impl Into<String>) -> LineId {
        let next = self.record(id).next;
        let new_id = self.allocate(LineRecord {
            text: text.into(),
            prev: Some(id),
            next,
        });
        self.record_mut(id).next = Some(new_id);
        if let Some(next_id) = next {
            self.record_mut(next_id).prev = Some(new_id);
        }
        self.line_count += 1;
        new_id
    }

    /// Remove the line identified by `id`, relinking its neighbors.
    ///
    /// O(1). The caller must never remove the last remaining line; the
    /// non-empty invariant is checked here.
    pub fn remove(&mut self, id: LineId) {
        assert!(self.line_count > 1, "cannot remove the only line");
        let record = self
            .slot_mut(id)
            .record
            .take()
            .expect("stale line handle");
        if let Some(prev_id) = record.prev {
            self.record_mut(prev_id).next = record.next;
        } else {
            self.head = record.next.expect("non-head line has a neighbor");
        }
        if let Some(next_id) = record.next {
            self.record_mut(next_id).prev = record.prev;
        }
        let slot = id.slot;
        self.slots[slot].generation = self.slots[slot].generation.wrapping_add(1);
        self.free.push(slot);
        self.line_count -= 1;
    }

    /// Whether `id` still refers to a live line.
    pub fn contains(&self, id: LineId) -> bool {
        self.slots
            .get(id.slot)
            .is_some_and(|slot| slot.generation == id.generation && slot.record.is_some())
    }

    /// 1-based number of the line identified by `id` (linear walk from the head).
    pub fn line_number(&self, id: LineId) -> usize {
        let mut number = 1;
        let mut cursor = self.head;
        while cursor != id {
            cursor = self
                .next(cursor)
                .expect("line handle not reachable from head");
            number += 1;
        }
        number
    }

    /// Handle of the line with 1-based `number`, or `None` when out of range.
    pub fn line_at(&self, number: usize) -> Option<LineId> {
        if number == 0 || number > self.line_count {
            return None;
        }
        let mut id = self.head;
        for _ in 1..number {
            id = self.next(id)?;
        }
        Some(id)
    }

    /// Iterate over all lines in order as `(handle, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (LineId, &str)> {
        let mut cursor = Some(self.head);
        std::iter::from_fn(move || {
            let id = cursor?;
            cursor = self.next(id);
            Some((id, self.text(id)))
        })
    }

    /// Iterate over all line texts in order, for the save collaborator.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(_, text)| text)
    }

    /// Join all lines with `\n`, with a trailing newline (the on-disk form).
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    fn allocate(&mut self, record: LineRecord) -> LineId {
        if let Some(slot) = self.free.pop() {
            let generation = self.slots[slot].generation;
            self.slots[slot].record = Some(record);
            LineId { slot, generation }
        } else {
            let slot = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            LineId {
                slot,
                generation: 0,
            }
        }
    }

    fn slot_mut(&mut self, id: LineId) -> &mut Slot {
        let slot = self
            .slots
            .get_mut(id.slot)
            .expect("line handle out of range");
        assert_eq!(slot.generation, id.generation, "stale line handle");
        slot
    }

    fn record(&self, id: LineId) -> &LineRecord {
        let slot = self.slots.get(id.slot).expect("line handle out of range");
        assert_eq!(slot.generation, id.generation, "stale line handle");
        slot.record.as_ref().expect("stale line handle")
    }

    fn record_mut(&mut self, id: LineId) -> &mut LineRecord {
        self.slot_mut(id).record.as_mut().expect("stale line handle")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
