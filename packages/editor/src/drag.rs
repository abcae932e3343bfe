//! Drag/drop transfer payloads.
//!
//! Drag start serializes the dragged component (or the palette entry) into a
//! JSON string carried by the transfer; drop decodes it and turns it into a
//! mutation on the target section.

use crate::EditorError;
use metanord_model::{ComponentKind, PageComponent};
use serde::{Deserialize, Serialize};

/// MIME type used for the transfer payload
pub const DRAG_MIME_TYPE: &str = "application/x-metanord-component";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DragPayload {
    /// A component already placed on the page
    Existing {
        component: PageComponent,
        source_section_id: String,
    },

    /// A new component dragged from the palette
    Palette {
        #[serde(rename = "type")]
        kind: ComponentKind,
    },
}

impl DragPayload {
    pub fn existing(component: &PageComponent) -> Self {
        DragPayload::Existing {
            source_section_id: component.parent_section_id.clone(),
            component: component.clone(),
        }
    }

    pub fn palette(kind: ComponentKind) -> Self {
        DragPayload::Palette { kind }
    }

    pub fn encode(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(data: &str) -> Result<Self, EditorError> {
        serde_json::from_str(data).map_err(|e| EditorError::InvalidPayload(e.to_string()))
    }
}
