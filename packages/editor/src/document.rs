//! # Document Handle
//!
//! A Document is one page under edit plus its persistence strategy.
//! Documents can be:
//! - **Memory-backed**: Temporary, for tests or server-side mutation batches
//! - **File-backed**: The page lives in a JSON file on disk
//!
//! The persistence boundary always moves the whole tree: save, export and
//! import read or write the complete page JSON, never a diff.
//!
//! ```text
//! Load → Edit → Save
//!   ↓      ↓      ↓
//! JSON  Mutations JSON
//! ```

use crate::{EditorError, Mutation, MutationResult};
use metanord_common::{parse_page, read_page, write_page};
use metanord_model::Page;
use std::path::{Path, PathBuf};

/// Editable page document
#[derive(Debug)]
pub struct Document {
    /// Path of the backing file (informational for memory documents)
    pub path: PathBuf,

    /// Current version number (increments on each change)
    pub version: u64,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only
    Memory { page: Page },

    /// File-backed
    File { page: Page, dirty: bool },
}

impl Document {
    /// Create a memory-backed document
    pub fn from_page(path: PathBuf, page: Page) -> Self {
        Self {
            path,
            version: 0,
            storage: DocumentStorage::Memory { page },
        }
    }

    /// Parse and validate page JSON (memory-backed)
    pub fn from_json(path: PathBuf, json: &str) -> Result<Self, EditorError> {
        let page = parse_page(json)?;
        Ok(Self::from_page(path, page))
    }

    /// Load document from a JSON file (file-backed)
    pub fn load(path: PathBuf) -> Result<Self, EditorError> {
        let page = read_page(&path)?;
        tracing::debug!(path = %path.display(), slug = %page.slug, "loaded page");

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::File { page, dirty: false },
        })
    }

    pub fn page(&self) -> &Page {
        match &self.storage {
            DocumentStorage::Memory { page } | DocumentStorage::File { page, .. } => page,
        }
    }

    fn page_mut(&mut self) -> &mut Page {
        match &mut self.storage {
            DocumentStorage::Memory { page } => page,
            DocumentStorage::File { page, dirty } => {
                *dirty = true;
                page
            }
        }
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        // Validate first so a rejected mutation leaves the document clean
        mutation.validate(self.page())?;
        mutation.apply(self.page_mut())?;
        self.version += 1;

        Ok(MutationResult {
            version: self.version,
        })
    }

    /// Replace the whole tree (undo/redo, import)
    pub fn replace(&mut self, page: Page) -> u64 {
        *self.page_mut() = page;
        self.version += 1;
        self.version
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    /// Serialize the whole tree
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.page())?)
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { page, dirty } => {
                write_page(&self.path, page)?;
                *dirty = false;
                tracing::info!(path = %self.path.display(), version = self.version, "saved page");
                Ok(())
            }
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
        }
    }

    /// Write the page JSON to an arbitrary file
    pub fn export_to(&self, path: &Path) -> Result<(), EditorError> {
        write_page(path, self.page())?;
        Ok(())
    }

    /// Replace the tree with the page stored in `path`
    pub fn import_from(&mut self, path: &Path) -> Result<&Page, EditorError> {
        let page = read_page(path)?;
        self.replace(page);
        Ok(self.page())
    }
}
