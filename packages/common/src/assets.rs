use crate::visitor::Visitor;
use metanord_model::{ComponentKind, Page, PageComponent, PageSection};
use serde::Serialize;
use serde_json::Value;

/// Asset referenced from a component
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReference {
    pub path: String,
    pub asset_type: AssetType,
    pub component_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Video,
    Document,
    Other,
}

impl AssetType {
    /// Classify by file extension
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "avif" => AssetType::Image,
            "mp4" | "webm" | "mov" => AssetType::Video,
            "pdf" | "doc" | "docx" | "xls" | "xlsx" | "dwg" | "zip" => AssetType::Document,
            _ => AssetType::Other,
        }
    }
}

/// Extract asset references from every component in the page
pub fn extract_assets(page: &Page) -> Vec<AssetReference> {
    let mut collector = AssetCollector::default();
    collector.visit_page(page);
    collector.assets
}

#[derive(Default)]
struct AssetCollector {
    assets: Vec<AssetReference>,
}

impl AssetCollector {
    fn push(&mut self, component: &PageComponent, path: &str, fallback: AssetType) {
        if path.is_empty() {
            return;
        }
        let asset_type = match AssetType::from_path(path) {
            AssetType::Other => fallback,
            known => known,
        };
        self.assets.push(AssetReference {
            path: path.to_string(),
            asset_type,
            component_id: component.id.clone(),
        });
    }
}

impl Visitor for AssetCollector {
    fn visit_component(&mut self, _section: &PageSection, component: &PageComponent) {
        match component.kind {
            ComponentKind::Image => {
                if let Some(src) = component.prop_str("src") {
                    self.push(component, src, AssetType::Image);
                }
            }
            ComponentKind::Video => {
                if let Some(src) = component.prop_str("src") {
                    self.push(component, src, AssetType::Video);
                }
            }
            ComponentKind::Gallery => {
                let images = component.props.get("images").and_then(Value::as_array);
                for image in images.into_iter().flatten() {
                    // Either a bare url or `{ "src": ... }`
                    let src = image
                        .as_str()
                        .or_else(|| image.get("src").and_then(Value::as_str));
                    if let Some(src) = src {
                        self.push(component, src, AssetType::Image);
                    }
                }
            }
            ComponentKind::Button | ComponentKind::Cta => {
                // Only links to downloadable files count as assets
                if let Some(href) = component.prop_str("href") {
                    if AssetType::from_path(href) != AssetType::Other {
                        self.push(component, href, AssetType::Other);
                    }
                }
            }
            _ => {}
        }
    }
}
