//! # MetaNord Content Model
//!
//! The page-builder content tree: a page holds an ordered list of sections,
//! each section holds an ordered list of typed components. Everything here is
//! plain JSON-compatible data; editing semantics live in `metanord-editor`.

pub mod id_generator;
pub mod localize;
pub mod localized;
pub mod page;

pub use id_generator::{get_page_seed, IdGenerator};
pub use localize::{LocalizedComponent, LocalizedPage, LocalizedSection};
pub use localized::{normalize_lang, LocalizedText};
pub use page::{
    ComponentKind, Page, PageComponent, PageSection, SectionLayout, SectionSettings,
};
