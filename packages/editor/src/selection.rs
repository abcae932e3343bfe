use metanord_model::Page;
use serde::{Deserialize, Serialize};

/// Current builder selection: nothing, one section, or one component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Selection {
    #[default]
    None,
    Section { section_id: String },
    Component { section_id: String, component_id: String },
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            Selection::Section { section_id } => Some(section_id),
            _ => None,
        }
    }

    pub fn component_id(&self) -> Option<&str> {
        match self {
            Selection::Component { component_id, .. } => Some(component_id),
            _ => None,
        }
    }

    /// Keep the selection consistent with `page`.
    ///
    /// A selection whose target vanished is cleared; a component that moved
    /// to another section keeps its selection with the new section id.
    pub fn retain_valid(&mut self, page: &Page) {
        let next = match &*self {
            Selection::None => return,
            Selection::Section { section_id } => {
                if page.section(section_id).is_some() {
                    return;
                }
                Selection::None
            }
            Selection::Component { section_id, component_id } => {
                match page.component(component_id) {
                    Some((index, _)) if page.sections[index].id == *section_id => return,
                    Some((index, _)) => Selection::Component {
                        section_id: page.sections[index].id.clone(),
                        component_id: component_id.clone(),
                    },
                    None => Selection::None,
                }
            }
        };
        *self = next;
    }
}
