//! # Undo/Redo History
//!
//! Snapshot-based history of the content tree.
//!
//! ## Design
//!
//! - Every recorded state is a full deep copy of the page
//! - A cursor points at the snapshot currently displayed
//! - Undo/redo move the cursor; the caller installs the snapshot wholesale
//! - Recording after an undo discards every snapshot past the cursor
//! - Batches group several edits into one recorded snapshot
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(page.clone());
//!
//! mutation.apply(&mut page)?;
//! history.record(&page, Some("Add heading"));
//!
//! if let Some(previous) = history.undo() {
//!     page = previous.clone();
//! }
//! ```

use metanord_model::Page;

pub const DEFAULT_MAX_LEVELS: usize = 50;

/// One recorded state of the page
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub page: Page,

    /// Description of the change that produced this state
    pub description: Option<String>,
}

#[derive(Debug, Default)]
struct PendingBatch {
    description: Option<String>,
    dirty: bool,
}

#[derive(Debug)]
pub struct History {
    /// Snapshots, oldest first
    entries: Vec<HistoryEntry>,

    /// Index of the displayed snapshot
    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    batch: Option<PendingBatch>,
}

impl History {
    /// Create history with default max levels
    pub fn new(initial: Page) -> Self {
        Self::with_max_levels(initial, DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(initial: Page, max_levels: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                page: initial,
                description: None,
            }],
            cursor: 0,
            max_levels,
            batch: None,
        }
    }

    /// Record a new state after an edit
    pub fn record(&mut self, page: &Page, description: Option<String>) {
        if let Some(batch) = &mut self.batch {
            if !batch.dirty {
                // First edit of the batch invalidates the redo branch
                self.entries.truncate(self.cursor + 1);
            }
            batch.dirty = true;
            if batch.description.is_none() {
                batch.description = description;
            }
            return;
        }

        self.push(page.clone(), description);
    }

    fn push(&mut self, page: Page, description: Option<String>) {
        // New edit invalidates the redo branch
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry { page, description });
        self.cursor = self.entries.len() - 1;

        if self.max_levels > 0 && self.entries.len() > self.max_levels + 1 {
            let excess = self.entries.len() - (self.max_levels + 1);
            self.entries.drain(..excess);
            self.cursor -= excess;
        }
    }

    /// Start a batch; edits recorded until `end_batch` form one undo step
    pub fn begin_batch(&mut self) {
        if self.batch.is_none() {
            self.batch = Some(PendingBatch::default());
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.batch {
            batch.description = Some(description.into());
        }
    }

    /// Close the batch, recording `page` if anything changed during it
    pub fn end_batch(&mut self, page: &Page) {
        if let Some(batch) = self.batch.take() {
            if batch.dirty {
                self.push(page.clone(), batch.description);
            }
        }
    }

    /// Step back; returns the snapshot to install
    pub fn undo(&mut self) -> Option<&Page> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].page)
    }

    /// Step forward; returns the snapshot to install
    pub fn redo(&mut self) -> Option<&Page> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor].page)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &Page {
        &self.entries[self.cursor].page
    }

    /// Description of the change the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.entries[self.cursor].description.as_deref()
    }

    /// Description of the change the next redo reapplies
    pub fn redo_description(&self) -> Option<&str> {
        self.entries
            .get(self.cursor + 1)
            .and_then(|entry| entry.description.as_deref())
    }

    /// Drop all history and start over from `page`
    pub fn reset(&mut self, page: Page) {
        self.entries = vec![HistoryEntry {
            page,
            description: None,
        }];
        self.cursor = 0;
        self.batch = None;
    }
}
