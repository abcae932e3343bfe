//! # Page Mutations
//!
//! Intent-level operations on the content tree.
//!
//! ## Semantics
//!
//! ### Indices
//! - An index is an insertion point in the list as it looks *before* the
//!   mutation (a drop target). Indices past the end append.
//! - Moving within the same list accounts for the removed item, so dropping
//!   an item right after itself is a no-op.
//!
//! ### Ownership
//! - `AddComponent` and `MoveComponent` always set `parent_section_id` to the
//!   section the component ends up in.
//!
//! ### UpdateComponent
//! - Content fields are replaced per key
//! - Props merge per key; a JSON `null` removes the key
//! - Styles merge per key; an empty value removes the key

use metanord_model::{LocalizedText, Page, PageComponent, PageSection, SectionSettings};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Update page-level metadata
    UpdatePage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<LocalizedText>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<LocalizedText>,
    },

    /// Insert a section (with any components it already holds)
    AddSection {
        section: PageSection,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    UpdateSection {
        section_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<LocalizedText>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<SectionSettings>,
    },

    /// Remove a section and every component in it
    RemoveSection { section_id: String },

    MoveSection { section_id: String, index: usize },

    AddComponent {
        section_id: String,
        component: PageComponent,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    UpdateComponent {
        component_id: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        content: BTreeMap<String, LocalizedText>,
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        props: Map<String, Value>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        styles: BTreeMap<String, String>,
    },

    RemoveComponent { component_id: String },

    /// Move a component to a section (possibly its own) at index
    MoveComponent {
        component_id: String,
        target_section_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Empty id")]
    EmptyId,
}

impl Mutation {
    /// Apply mutation to the page with validation
    pub fn apply(&self, page: &mut Page) -> Result<(), MutationError> {
        self.validate(page)?;

        match self {
            Mutation::UpdatePage { title, description } => {
                if let Some(title) = title {
                    page.title = title.clone();
                }
                if let Some(description) = description {
                    page.description = Some(description.clone());
                }
                Ok(())
            }

            Mutation::AddSection { section, index } => {
                let mut section = section.clone();
                for component in &mut section.components {
                    component.parent_section_id = section.id.clone();
                }
                let at = clamp(*index, page.sections.len());
                page.sections.insert(at, section);
                Ok(())
            }

            Mutation::UpdateSection { section_id, title, settings } => {
                let section = Self::section_mut(page, section_id)?;
                if let Some(title) = title {
                    section.title = title.clone();
                }
                if let Some(settings) = settings {
                    section.settings = settings.clone();
                }
                Ok(())
            }

            Mutation::RemoveSection { section_id } => {
                let at = Self::section_index(page, section_id)?;
                page.sections.remove(at);
                Ok(())
            }

            Mutation::MoveSection { section_id, index } => {
                let from = Self::section_index(page, section_id)?;
                let section = page.sections.remove(from);
                let to = adjust_for_removal(*index, from);
                let to = to.min(page.sections.len());
                page.sections.insert(to, section);
                Ok(())
            }

            Mutation::AddComponent { section_id, component, index } => {
                let section = Self::section_mut(page, section_id)?;
                let mut component = component.clone();
                component.parent_section_id = section.id.clone();
                let at = clamp(*index, section.components.len());
                section.components.insert(at, component);
                Ok(())
            }

            Mutation::UpdateComponent { component_id, content, props, styles } => {
                let component = page
                    .component_mut(component_id)
                    .ok_or_else(|| MutationError::ComponentNotFound(component_id.clone()))?;
                Self::apply_update_component(component, content, props, styles);
                Ok(())
            }

            Mutation::RemoveComponent { component_id } => {
                let (si, ci) = Self::component_position(page, component_id)?;
                page.sections[si].components.remove(ci);
                Ok(())
            }

            Mutation::MoveComponent { component_id, target_section_id, index } => {
                Self::apply_move_component(page, component_id, target_section_id, *index)
            }
        }
    }

    fn apply_update_component(
        component: &mut PageComponent,
        content: &BTreeMap<String, LocalizedText>,
        props: &Map<String, Value>,
        styles: &BTreeMap<String, String>,
    ) {
        for (field, text) in content {
            component.content.insert(field.clone(), text.clone());
        }

        for (key, value) in props {
            if value.is_null() {
                component.props.remove(key);
            } else {
                component.props.insert(key.clone(), value.clone());
            }
        }

        for (property, value) in styles {
            if value.is_empty() {
                component.styles.remove(property);
            } else {
                component.styles.insert(property.clone(), value.clone());
            }
        }
    }

    fn apply_move_component(
        page: &mut Page,
        component_id: &str,
        target_section_id: &str,
        index: Option<usize>,
    ) -> Result<(), MutationError> {
        let (from_section, from_index) = Self::component_position(page, component_id)?;
        let to_section = Self::section_index(page, target_section_id)?;

        let mut component = page.sections[from_section].components.remove(from_index);
        component.parent_section_id = target_section_id.to_string();

        let target = &mut page.sections[to_section].components;
        let at = match index {
            Some(index) if from_section == to_section => adjust_for_removal(index, from_index),
            Some(index) => index,
            None => target.len(),
        };
        target.insert(at.min(target.len()), component);
        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, page: &Page) -> Result<(), MutationError> {
        match self {
            Mutation::UpdatePage { .. } => Ok(()),

            Mutation::AddSection { section, .. } => {
                let mut ids = HashSet::new();
                let new_ids = std::iter::once(section.id.as_str())
                    .chain(section.components.iter().map(|c| c.id.as_str()));
                for id in new_ids {
                    if id.is_empty() {
                        return Err(MutationError::EmptyId);
                    }
                    if page.contains_id(id) || !ids.insert(id) {
                        return Err(MutationError::DuplicateId(id.to_string()));
                    }
                }
                Ok(())
            }

            Mutation::UpdateSection { section_id, .. }
            | Mutation::RemoveSection { section_id }
            | Mutation::MoveSection { section_id, .. } => {
                Self::section_index(page, section_id).map(|_| ())
            }

            Mutation::AddComponent { section_id, component, .. } => {
                Self::section_index(page, section_id)?;
                if component.id.is_empty() {
                    return Err(MutationError::EmptyId);
                }
                if page.contains_id(&component.id) {
                    return Err(MutationError::DuplicateId(component.id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateComponent { component_id, .. }
            | Mutation::RemoveComponent { component_id } => {
                Self::component_position(page, component_id).map(|_| ())
            }

            Mutation::MoveComponent { component_id, target_section_id, .. } => {
                Self::component_position(page, component_id)?;
                Self::section_index(page, target_section_id).map(|_| ())
            }
        }
    }

    /// Short human-readable label (used for undo/redo descriptions)
    pub fn description(&self) -> String {
        match self {
            Mutation::UpdatePage { .. } => "Update page".to_string(),
            Mutation::AddSection { .. } => "Add section".to_string(),
            Mutation::UpdateSection { .. } => "Update section".to_string(),
            Mutation::RemoveSection { .. } => "Remove section".to_string(),
            Mutation::MoveSection { .. } => "Move section".to_string(),
            Mutation::AddComponent { component, .. } => format!("Add {}", component.kind),
            Mutation::UpdateComponent { .. } => "Update component".to_string(),
            Mutation::RemoveComponent { .. } => "Remove component".to_string(),
            Mutation::MoveComponent { .. } => "Move component".to_string(),
        }
    }

    fn section_index(page: &Page, section_id: &str) -> Result<usize, MutationError> {
        page.section_index(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
    }

    fn section_mut<'a>(page: &'a mut Page, section_id: &str) -> Result<&'a mut PageSection, MutationError> {
        page.section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
    }

    fn component_position(page: &Page, component_id: &str) -> Result<(usize, usize), MutationError> {
        page.component_position(component_id)
            .ok_or_else(|| MutationError::ComponentNotFound(component_id.to_string()))
    }
}

fn clamp(index: Option<usize>, len: usize) -> usize {
    index.map_or(len, |i| i.min(len))
}

/// Translate a drop index taken before removal into one valid after it
fn adjust_for_removal(index: usize, removed_at: usize) -> usize {
    if index > removed_at {
        index - 1
    } else {
        index
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use metanord_model::ComponentKind;
    use serde_json::json;

    fn page() -> Page {
        let mut page = Page::new("p", "home", "Home");
        for (sid, components) in [("s1", vec!["a", "b", "c"]), ("s2", vec!["d"])] {
            let mut section = PageSection::new(sid, sid);
            for cid in components {
                section
                    .components
                    .push(PageComponent::new(cid, ComponentKind::Text, sid));
            }
            page.sections.push(section);
        }
        page
    }

    fn order(page: &Page, section: usize) -> Vec<&str> {
        page.sections[section]
            .components
            .iter()
            .map(|c| c.id.as_str())
            .collect()
    }

    #[test]
    fn test_mutation_json_shape() {
        let mutation = Mutation::MoveComponent {
            component_id: "a".to_string(),
            target_section_id: "s2".to_string(),
            index: Some(0),
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["type"], "moveComponent");
        assert_eq!(json["targetSectionId"], "s2");

        let parsed: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, mutation);
    }

    #[test]
    fn test_move_within_section_accounts_for_removal() {
        let mut page = page();
        Mutation::MoveComponent {
            component_id: "a".to_string(),
            target_section_id: "s1".to_string(),
            index: Some(2),
        }
        .apply(&mut page)
        .unwrap();
        assert_eq!(order(&page, 0), vec!["b", "a", "c"]);

        Mutation::MoveComponent {
            component_id: "c".to_string(),
            target_section_id: "s1".to_string(),
            index: Some(0),
        }
        .apply(&mut page)
        .unwrap();
        assert_eq!(order(&page, 0), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_cross_section_move_reassigns_owner() {
        let mut page = page();
        Mutation::MoveComponent {
            component_id: "b".to_string(),
            target_section_id: "s2".to_string(),
            index: Some(0),
        }
        .apply(&mut page)
        .unwrap();

        assert_eq!(order(&page, 0), vec!["a", "c"]);
        assert_eq!(order(&page, 1), vec!["b", "d"]);
        assert_eq!(page.component("b").unwrap().1.parent_section_id, "s2");
    }

    #[test]
    fn test_move_index_past_end_appends() {
        let mut page = page();
        Mutation::MoveComponent {
            component_id: "a".to_string(),
            target_section_id: "s2".to_string(),
            index: Some(99),
        }
        .apply(&mut page)
        .unwrap();
        assert_eq!(order(&page, 1), vec!["d", "a"]);
    }

    #[test]
    fn test_move_section() {
        let mut page = page();
        page.sections.push(PageSection::new("s3", "s3"));

        Mutation::MoveSection { section_id: "s1".to_string(), index: 3 }
            .apply(&mut page)
            .unwrap();
        let ids: Vec<&str> = page.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s3", "s1"]);
    }

    #[test]
    fn test_add_section_rejects_existing_ids() {
        let mut page = page();
        let mut section = PageSection::new("s9", "New");
        section
            .components
            .push(PageComponent::new("a", ComponentKind::Text, "s9"));

        let result = Mutation::AddSection { section, index: None }.apply(&mut page);
        assert_eq!(result, Err(MutationError::DuplicateId("a".to_string())));
        assert_eq!(page.sections.len(), 2);
    }

    #[test]
    fn test_add_component_sets_owner() {
        let mut page = page();
        let component = PageComponent::new("n", ComponentKind::Image, "wrong");
        Mutation::AddComponent {
            section_id: "s2".to_string(),
            component,
            index: Some(0),
        }
        .apply(&mut page)
        .unwrap();

        assert_eq!(order(&page, 1), vec!["n", "d"]);
        assert_eq!(page.component("n").unwrap().1.parent_section_id, "s2");
    }

    #[test]
    fn test_update_component_merges() {
        let mut page = page();
        page.component_mut("a")
            .unwrap()
            .props
            .insert("align".into(), json!("left"));

        let mut props = Map::new();
        props.insert("align".into(), Value::Null);
        props.insert("width".into(), json!(640));

        Mutation::UpdateComponent {
            component_id: "a".to_string(),
            content: BTreeMap::from([(
                "text".to_string(),
                LocalizedText::new("Steel").with("et", "Teras"),
            )]),
            props,
            styles: BTreeMap::from([("color".to_string(), "#003366".to_string())]),
        }
        .apply(&mut page)
        .unwrap();

        let component = page.component("a").unwrap().1;
        assert_eq!(component.text("text").unwrap().resolve("et"), "Teras");
        assert!(!component.props.contains_key("align"));
        assert_eq!(component.props["width"], 640);
        assert_eq!(component.styles["color"], "#003366");
    }

    #[test]
    fn test_validation_reports_missing_targets() {
        let page = page();
        let remove = Mutation::RemoveSection { section_id: "nope".to_string() };
        assert_eq!(
            remove.validate(&page),
            Err(MutationError::SectionNotFound("nope".to_string()))
        );

        let mv = Mutation::MoveComponent {
            component_id: "a".to_string(),
            target_section_id: "nope".to_string(),
            index: None,
        };
        assert!(mv.validate(&page).is_err());
    }
}
