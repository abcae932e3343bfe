//! # MetaNord Editor
//!
//! Page-builder editing engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Page → sections → components         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save/import/export page JSON        │
//! │  - Apply validated mutations                │
//! │  - Snapshot undo/redo with a cursor         │
//! │  - Single selection, drag/drop transfer     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ server: whole-tree save over REST           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use metanord_editor::{Document, EditSession};
//! use metanord_model::ComponentKind;
//!
//! let doc = Document::load("pages/home.json".into())?;
//! let mut session = EditSession::new("admin".to_string(), doc);
//!
//! let hero = session.add_section("Hero", Some(0))?;
//! session.add_component(&hero, ComponentKind::Heading, None)?;
//! session.undo();
//! session.save()?;
//! ```

mod document;
mod drag;
mod errors;
mod history;
mod mutations;
mod selection;
mod session;

pub use document::{Document, DocumentStorage};
pub use drag::{DragPayload, DRAG_MIME_TYPE};
pub use errors::EditorError;
pub use history::{History, HistoryEntry, DEFAULT_MAX_LEVELS};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use selection::Selection;
pub use session::EditSession;

// Re-export model types for convenience
pub use metanord_model::{ComponentKind, Page, PageComponent, PageSection};
