//! # Edit Session
//!
//! One editor's view of a page: the document, the current selection, the
//! undo/redo history and the id generator for new nodes. Every public edit
//! goes through `apply`, which records a history snapshot and keeps the
//! selection pointing at something that exists.

use crate::drag::DragPayload;
use crate::history::{History, DEFAULT_MAX_LEVELS};
use crate::{Document, EditorError, Mutation, Selection};
use metanord_model::{ComponentKind, IdGenerator, LocalizedText, Page, PageComponent, PageSection};
use std::path::Path;

/// Single page-builder session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    selection: Selection,
    history: History,
    ids: IdGenerator,
}

impl EditSession {
    /// Create new edit session
    pub fn new(id: String, document: Document) -> Self {
        Self::with_history_limit(id, document, DEFAULT_MAX_LEVELS)
    }

    pub fn with_history_limit(id: String, document: Document, max_levels: usize) -> Self {
        let page = document.page().clone();
        Self {
            id,
            ids: IdGenerator::for_page(&page),
            history: History::with_max_levels(page, max_levels),
            selection: Selection::None,
            document,
        }
    }

    pub fn page(&self) -> &Page {
        self.document.page()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: Mutation) -> Result<u64, EditorError> {
        let description = mutation.description();
        let result = self.document.apply(mutation)?;

        self.history.record(self.document.page(), Some(description));
        self.selection.retain_valid(self.document.page());

        tracing::debug!(session = %self.id, version = result.version, "applied mutation");
        Ok(result.version)
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch(self.document.page());
    }

    /// Undo the most recent step; false if there is nothing to undo
    pub fn undo(&mut self) -> bool {
        self.end_batch();
        match self.history.undo() {
            Some(page) => {
                let page = page.clone();
                self.install(page);
                true
            }
            None => false,
        }
    }

    /// Redo the most recently undone step; false if there is nothing to redo
    pub fn redo(&mut self) -> bool {
        self.end_batch();
        match self.history.redo() {
            Some(page) => {
                let page = page.clone();
                self.install(page);
                true
            }
            None => false,
        }
    }

    fn install(&mut self, page: Page) {
        let version = self.document.replace(page);
        self.selection.retain_valid(self.document.page());
        tracing::debug!(session = %self.id, version, cursor = self.history.cursor(), "installed snapshot");
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_section(&mut self, section_id: &str) -> Result<(), EditorError> {
        if self.page().section(section_id).is_none() {
            return Err(EditorError::NotFound(section_id.to_string()));
        }
        self.selection = Selection::Section {
            section_id: section_id.to_string(),
        };
        Ok(())
    }

    pub fn select_component(&mut self, component_id: &str) -> Result<(), EditorError> {
        let (index, _) = self
            .page()
            .component(component_id)
            .ok_or_else(|| EditorError::NotFound(component_id.to_string()))?;
        self.selection = Selection::Component {
            section_id: self.page().sections[index].id.clone(),
            component_id: component_id.to_string(),
        };
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    // ------------------------------------------------------------------
    // Structural helpers
    // ------------------------------------------------------------------

    /// Add an empty section; returns its id
    pub fn add_section(
        &mut self,
        title: impl Into<LocalizedText>,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let section = PageSection::new(self.ids.new_id(), title);
        let id = section.id.clone();
        self.apply(Mutation::AddSection { section, index })?;
        Ok(id)
    }

    /// Add a component of `kind` built from its template; returns its id
    pub fn add_component(
        &mut self,
        section_id: &str,
        kind: ComponentKind,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let component = PageComponent::new(self.ids.new_id(), kind, section_id);
        let id = component.id.clone();
        self.apply(Mutation::AddComponent {
            section_id: section_id.to_string(),
            component,
            index,
        })?;
        Ok(id)
    }

    /// Copy a section and its components right after the original
    pub fn duplicate_section(&mut self, section_id: &str) -> Result<String, EditorError> {
        let index = self
            .page()
            .section_index(section_id)
            .ok_or_else(|| EditorError::NotFound(section_id.to_string()))?;

        let mut copy = self.page().sections[index].clone();
        copy.id = self.ids.new_id();
        copy.title.value = format!("{} (copy)", copy.title.value);
        for component in &mut copy.components {
            component.id = self.ids.new_id();
            component.parent_section_id = copy.id.clone();
        }

        let id = copy.id.clone();
        self.apply(Mutation::AddSection {
            section: copy,
            index: Some(index + 1),
        })?;
        Ok(id)
    }

    /// Copy a component right after the original
    pub fn duplicate_component(&mut self, component_id: &str) -> Result<String, EditorError> {
        let (section_index, component_index) = self
            .page()
            .component_position(component_id)
            .ok_or_else(|| EditorError::NotFound(component_id.to_string()))?;

        let section = &self.page().sections[section_index];
        let section_id = section.id.clone();
        let mut copy = section.components[component_index].clone();
        copy.id = self.ids.new_id();

        let id = copy.id.clone();
        self.apply(Mutation::AddComponent {
            section_id,
            component: copy,
            index: Some(component_index + 1),
        })?;
        Ok(id)
    }

    /// Remove whatever is selected; false if nothing was selected
    pub fn remove_selected(&mut self) -> Result<bool, EditorError> {
        let mutation = match &self.selection {
            Selection::None => return Ok(false),
            Selection::Section { section_id } => Mutation::RemoveSection {
                section_id: section_id.clone(),
            },
            Selection::Component { component_id, .. } => Mutation::RemoveComponent {
                component_id: component_id.clone(),
            },
        };
        self.apply(mutation)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Drag/drop
    // ------------------------------------------------------------------

    /// Serialize a placed component into a transfer payload
    pub fn drag_start(&self, component_id: &str) -> Result<String, EditorError> {
        let (_, component) = self
            .page()
            .component(component_id)
            .ok_or_else(|| EditorError::NotFound(component_id.to_string()))?;
        DragPayload::existing(component).encode()
    }

    /// Drop a transfer payload into a section; returns the placed component id.
    ///
    /// A component still on the page is moved. One that vanished since the
    /// drag started is re-inserted under a fresh id, as are palette entries.
    pub fn drop(
        &mut self,
        payload: &str,
        target_section_id: &str,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        if self.page().section(target_section_id).is_none() {
            return Err(EditorError::NotFound(target_section_id.to_string()));
        }

        let placed = match DragPayload::decode(payload)? {
            DragPayload::Existing { component, .. } if self.page().component(&component.id).is_some() => {
                self.apply(Mutation::MoveComponent {
                    component_id: component.id.clone(),
                    target_section_id: target_section_id.to_string(),
                    index,
                })?;
                component.id
            }
            DragPayload::Existing { mut component, source_section_id } => {
                tracing::debug!(
                    component = %component.id,
                    source = %source_section_id,
                    "dragged component no longer on page, re-inserting"
                );
                component.id = self.ids.new_id();
                let id = component.id.clone();
                self.apply(Mutation::AddComponent {
                    section_id: target_section_id.to_string(),
                    component,
                    index,
                })?;
                id
            }
            DragPayload::Palette { kind } => self.add_component(target_section_id, kind, index)?,
        };

        self.select_component(&placed)?;
        Ok(placed)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replace the page with a JSON file and restart history from it
    pub fn import_from(&mut self, path: &Path) -> Result<(), EditorError> {
        let page = self.document.import_from(path)?.clone();
        self.ids = IdGenerator::for_page(&page);
        self.history.reset(page);
        self.selection = Selection::None;
        tracing::info!(session = %self.id, path = %path.display(), "imported page");
        Ok(())
    }

    pub fn export_to(&self, path: &Path) -> Result<(), EditorError> {
        self.document.export_to(path)
    }

    pub fn save(&mut self) -> Result<(), EditorError> {
        self.end_batch();
        self.document.save()
    }
}
