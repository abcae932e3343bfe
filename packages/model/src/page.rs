use crate::localized::LocalizedText;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Root of the page-builder content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title: LocalizedText,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,

    #[serde(default)]
    pub sections: Vec<PageSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Titled container with layout settings and an ordered list of components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSection {
    pub id: String,

    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default)]
    pub settings: SectionSettings,

    #[serde(default)]
    pub components: Vec<PageComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSettings {
    #[serde(default)]
    pub layout: SectionLayout,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionLayout {
    FullWidth,
    #[default]
    Contained,
    TwoColumn,
    Grid,
}

/// Typed content unit belonging to exactly one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageComponent {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ComponentKind,

    pub parent_section_id: String,

    /// Localized text fields (title, text, label, alt, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, LocalizedText>,

    /// Kind-specific settings (src, href, level, items, ...)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Heading,
    Text,
    Image,
    List,
    Button,
    Gallery,
    Cta,
    Video,
    Spacer,
    Divider,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 10] = [
        ComponentKind::Heading,
        ComponentKind::Text,
        ComponentKind::Image,
        ComponentKind::List,
        ComponentKind::Button,
        ComponentKind::Gallery,
        ComponentKind::Cta,
        ComponentKind::Video,
        ComponentKind::Spacer,
        ComponentKind::Divider,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Heading => "heading",
            ComponentKind::Text => "text",
            ComponentKind::Image => "image",
            ComponentKind::List => "list",
            ComponentKind::Button => "button",
            ComponentKind::Gallery => "gallery",
            ComponentKind::Cta => "cta",
            ComponentKind::Video => "video",
            ComponentKind::Spacer => "spacer",
            ComponentKind::Divider => "divider",
        }
    }

    /// Default content and props for a freshly created component
    pub fn template(&self) -> (BTreeMap<String, LocalizedText>, Map<String, Value>) {
        let content: &[(&str, &str)] = match self {
            ComponentKind::Heading => &[("text", "New heading")],
            ComponentKind::Text => &[("text", "Add your text here")],
            ComponentKind::Image => &[("alt", "")],
            ComponentKind::Button => &[("label", "Learn more")],
            ComponentKind::Cta => &[
                ("title", "Ready to get started?"),
                ("text", "Contact our team for a quote."),
                ("buttonLabel", "Contact us"),
            ],
            ComponentKind::List
            | ComponentKind::Gallery
            | ComponentKind::Video
            | ComponentKind::Spacer
            | ComponentKind::Divider => &[],
        };

        let props = match self {
            ComponentKind::Heading => json!({ "level": 2 }),
            ComponentKind::Image => json!({ "src": "" }),
            ComponentKind::List => json!({ "items": [], "ordered": false }),
            ComponentKind::Button => json!({ "href": "#", "variant": "primary" }),
            ComponentKind::Gallery => json!({ "images": [], "columns": 3 }),
            ComponentKind::Cta => json!({ "href": "/contact" }),
            ComponentKind::Video => json!({ "src": "", "autoplay": false }),
            ComponentKind::Spacer => json!({ "height": "32px" }),
            ComponentKind::Text | ComponentKind::Divider => json!({}),
        };

        let content = content
            .iter()
            .map(|(key, value)| (key.to_string(), LocalizedText::new(*value)))
            .collect();

        let props = match props {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        (content, props)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown component type: {}", s))
    }
}

impl PageSection {
    pub fn new(id: impl Into<String>, title: impl Into<LocalizedText>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            settings: SectionSettings::default(),
            components: Vec::new(),
        }
    }

    pub fn component_index(&self, component_id: &str) -> Option<usize> {
        self.components.iter().position(|c| c.id == component_id)
    }
}

impl PageComponent {
    /// New component of `kind` populated from its template
    pub fn new(id: impl Into<String>, kind: ComponentKind, parent_section_id: impl Into<String>) -> Self {
        let (content, props) = kind.template();
        Self {
            id: id.into(),
            kind,
            parent_section_id: parent_section_id.into(),
            content,
            props,
            styles: BTreeMap::new(),
        }
    }

    pub fn text(&self, field: &str) -> Option<&LocalizedText> {
        self.content.get(field)
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

impl Page {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<LocalizedText>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            description: None,
            sections: Vec::new(),
            updated_at: None,
        }
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&PageSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut PageSection> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// Find a component and the index of the section holding it
    pub fn component(&self, component_id: &str) -> Option<(usize, &PageComponent)> {
        self.sections.iter().enumerate().find_map(|(index, section)| {
            section
                .components
                .iter()
                .find(|c| c.id == component_id)
                .map(|c| (index, c))
        })
    }

    pub fn component_mut(&mut self, component_id: &str) -> Option<&mut PageComponent> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.components.iter_mut())
            .find(|c| c.id == component_id)
    }

    /// Position of a component as (section index, component index)
    pub fn component_position(&self, component_id: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section.component_index(component_id).map(|ci| (si, ci))
        })
    }

    /// True if any section or component uses `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.sections
            .iter()
            .any(|s| s.id == id || s.components.iter().any(|c| c.id == id))
    }

    pub fn component_count(&self) -> usize {
        self.sections.iter().map(|s| s.components.len()).sum()
    }

    /// Every section and component id in tree order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().flat_map(|s| {
            std::iter::once(s.id.as_str()).chain(s.components.iter().map(|c| c.id.as_str()))
        })
    }
}
