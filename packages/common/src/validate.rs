//! Structural validation of a page tree.
//!
//! Checks the invariants every stored page must hold: a url-safe slug,
//! non-empty unique ids, and components owned by the section that holds them.

use crate::visitor::{walk_section, Visitor, VisitorMut};
use metanord_model::{Page, PageComponent, PageSection};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    #[error("slug is empty")]
    EmptySlug,

    #[error("slug {slug:?} may only contain a-z, 0-9 and '-'")]
    InvalidSlug { slug: String },

    #[error("empty id at {path}")]
    EmptyId { path: String },

    #[error("duplicate id {id:?}")]
    DuplicateId { id: String },

    #[error("component {component_id:?} declares section {declared:?} but lives in {actual:?}")]
    OwnershipMismatch {
        component_id: String,
        declared: String,
        actual: String,
    },
}

/// Every problem found in a page
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Slugs are lowercase ascii words joined by '-'
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validate a page, collecting every problem
pub fn validate(page: &Page) -> Result<(), ValidationErrors> {
    let mut checker = Checker::default();

    if page.slug.is_empty() {
        checker.errors.push(ValidationError::EmptySlug);
    } else if !is_valid_slug(&page.slug) {
        checker.errors.push(ValidationError::InvalidSlug {
            slug: page.slug.clone(),
        });
    }

    checker.visit_page(page);

    if checker.errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(checker.errors))
    }
}

#[derive(Default)]
struct Checker {
    seen: HashSet<String>,
    errors: Vec<ValidationError>,
}

impl Checker {
    fn check_id(&mut self, id: &str, path: String) {
        if id.is_empty() {
            self.errors.push(ValidationError::EmptyId { path });
        } else if !self.seen.insert(id.to_string()) {
            self.errors.push(ValidationError::DuplicateId { id: id.to_string() });
        }
    }
}

impl Visitor for Checker {
    fn visit_section(&mut self, section: &PageSection) {
        self.check_id(&section.id, "section".to_string());
        walk_section(self, section);
    }

    fn visit_component(&mut self, section: &PageSection, component: &PageComponent) {
        self.check_id(&component.id, format!("section {:?}", section.id));

        if component.parent_section_id != section.id {
            self.errors.push(ValidationError::OwnershipMismatch {
                component_id: component.id.clone(),
                declared: component.parent_section_id.clone(),
                actual: section.id.clone(),
            });
        }
    }
}

/// Point every component's `parent_section_id` at its holder.
///
/// Returns the number of components that changed.
pub fn repair_ownership(page: &mut Page) -> usize {
    let mut repair = OwnershipRepair(0);
    repair.visit_page_mut(page);
    repair.0
}

struct OwnershipRepair(usize);

impl VisitorMut for OwnershipRepair {
    fn visit_component_mut(&mut self, section_id: &str, component: &mut PageComponent) {
        if component.parent_section_id != section_id {
            component.parent_section_id = section_id.to_string();
            self.0 += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metanord_model::ComponentKind;

    fn valid_page() -> Page {
        let mut page = Page::new("p", "about-us", "About us");
        let mut section = PageSection::new("s1", "Team");
        section
            .components
            .push(PageComponent::new("c1", ComponentKind::Text, "s1"));
        page.sections.push(section);
        page
    }

    #[test]
    fn test_valid_page_passes() {
        assert!(validate(&valid_page()).is_ok());
    }

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("aluminum-profiles-2024"));
        assert!(!is_valid_slug("About"));
        assert!(!is_valid_slug("-home"));
        assert!(!is_valid_slug("home page"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut page = valid_page();
        page.slug = "Bad Slug".to_string();
        page.sections.push(PageSection::new("s1", "Dup"));
        page.sections[0]
            .components
            .push(PageComponent::new("", ComponentKind::Divider, "s1"));
        page.sections[0].components[0].parent_section_id = "elsewhere".to_string();

        let errors = validate(&page).unwrap_err();
        assert_eq!(errors.errors().len(), 4);
        assert!(errors.errors().contains(&ValidationError::DuplicateId {
            id: "s1".to_string()
        }));
        assert!(matches!(errors.errors()[0], ValidationError::InvalidSlug { .. }));
    }

    #[test]
    fn test_error_messages() {
        let errors = ValidationErrors(vec![
            ValidationError::EmptySlug,
            ValidationError::DuplicateId {
                id: "s1".to_string(),
            },
        ]);
        assert_eq!(errors.to_string(), "slug is empty; duplicate id \"s1\"");
    }

    #[test]
    fn test_repair_ownership() {
        let mut page = valid_page();
        page.sections[0].components[0].parent_section_id = "old".to_string();

        assert_eq!(repair_ownership(&mut page), 1);
        assert_eq!(repair_ownership(&mut page), 0);
        assert!(validate(&page).is_ok());
    }
}
