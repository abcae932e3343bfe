//! Read-only, language-resolved view of a page.

use crate::page::{ComponentKind, Page, PageComponent, PageSection, SectionSettings};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedPage {
    pub id: String,
    pub slug: String,
    pub lang: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sections: Vec<LocalizedSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedSection {
    pub id: String,
    pub title: String,
    pub settings: SectionSettings,
    pub components: Vec<LocalizedComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub content: BTreeMap<String, String>,
    pub props: Map<String, Value>,
    pub styles: BTreeMap<String, String>,
}

impl Page {
    /// Resolve every localized field for `lang`; hidden sections are dropped
    pub fn localize(&self, lang: &str) -> LocalizedPage {
        LocalizedPage {
            id: self.id.clone(),
            slug: self.slug.clone(),
            lang: lang.to_string(),
            title: self.title.resolve(lang).to_string(),
            description: self.description.as_ref().map(|d| d.resolve(lang).to_string()),
            sections: self
                .sections
                .iter()
                .filter(|s| !s.settings.hidden)
                .map(|s| localize_section(s, lang))
                .collect(),
        }
    }
}

fn localize_section(section: &PageSection, lang: &str) -> LocalizedSection {
    LocalizedSection {
        id: section.id.clone(),
        title: section.title.resolve(lang).to_string(),
        settings: section.settings.clone(),
        components: section
            .components
            .iter()
            .map(|c| localize_component(c, lang))
            .collect(),
    }
}

fn localize_component(component: &PageComponent, lang: &str) -> LocalizedComponent {
    LocalizedComponent {
        id: component.id.clone(),
        kind: component.kind,
        content: component
            .content
            .iter()
            .map(|(key, text)| (key.clone(), text.resolve(lang).to_string()))
            .collect(),
        props: component.props.clone(),
        styles: component.styles.clone(),
    }
}
