//! Page store: one `{slug}.json` file per page plus an in-memory cache.
//!
//! Every page carries a version that starts at 1 when first seen and bumps on
//! each save. A save may name the version it was based on; a mismatch is a
//! conflict and nothing is written.

use chrono::Utc;
use metanord_common::{is_valid_slug, read_page, validate, write_page, CommonError, ValidationErrors};
use metanord_model::Page;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("Invalid page: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Version conflict: expected {expected}, current is {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<CommonError> for StoreError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::Validation(errors) => StoreError::Invalid(errors),
            CommonError::Json(e) => StoreError::Json(e),
            CommonError::Io(e) => StoreError::Io(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredPage {
    pub page: Page,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub slug: String,
    pub title: String,
    pub version: u64,
    pub sections: usize,
    pub components: usize,
}

/// Outcome of re-reading a page after an external change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    Unchanged,
    Updated(u64),
    Removed,
}

pub struct PageStore {
    root: PathBuf,
    pages: BTreeMap<String, StoredPage>,
}

impl PageStore {
    /// Open (creating if needed) a pages directory and load every page in it
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        let mut store = Self {
            root,
            pages: BTreeMap::new(),
        };
        let loaded = store.load_all()?;
        tracing::info!(root = %store.root.display(), pages = loaded, "opened page store");
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every `*.json` page; unreadable or invalid files are skipped
    pub fn load_all(&mut self) -> StoreResult<usize> {
        self.pages.clear();

        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            let Some(slug) = slug_from_path(&path) else {
                continue;
            };

            match read_page(&path) {
                Ok(page) if page.slug == slug => {
                    self.pages.insert(slug, StoredPage { page, version: 1 });
                }
                Ok(page) => {
                    tracing::warn!(path = %path.display(), slug = %page.slug, "page slug does not match file name, skipping");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable page");
                }
            }
        }

        Ok(self.pages.len())
    }

    pub fn list(&self, lang: &str) -> Vec<PageSummary> {
        self.pages
            .values()
            .map(|stored| PageSummary {
                slug: stored.page.slug.clone(),
                title: stored.page.title.resolve(lang).to_string(),
                version: stored.version,
                sections: stored.page.sections.len(),
                components: stored.page.component_count(),
            })
            .collect()
    }

    pub fn get(&self, slug: &str) -> Option<&StoredPage> {
        self.pages.get(slug)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Validate and persist the whole page; returns the new version
    pub fn put(&mut self, mut page: Page, expected_version: Option<u64>) -> StoreResult<u64> {
        validate(&page)?;

        let current = self.pages.get(&page.slug).map(|p| p.version).unwrap_or(0);
        if let Some(expected) = expected_version {
            if expected != current {
                return Err(StoreError::VersionConflict {
                    expected,
                    actual: current,
                });
            }
        }

        page.updated_at = Some(Utc::now());
        let path = self.path_for(&page.slug)?;
        write_page(&path, &page)?;

        let version = current + 1;
        tracing::info!(slug = %page.slug, version, "saved page");
        self.pages
            .insert(page.slug.clone(), StoredPage { page, version });
        Ok(version)
    }

    pub fn delete(&mut self, slug: &str) -> StoreResult<()> {
        if self.pages.remove(slug).is_none() {
            return Err(StoreError::NotFound(slug.to_string()));
        }

        let path = self.path_for(slug)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::info!(slug, "deleted page");
        Ok(())
    }

    /// Re-read a page after it changed on disk
    pub fn reload(&mut self, slug: &str) -> StoreResult<ReloadOutcome> {
        let path = self.path_for(slug)?;

        if !path.exists() {
            return Ok(match self.pages.remove(slug) {
                Some(_) => ReloadOutcome::Removed,
                None => ReloadOutcome::Unchanged,
            });
        }

        let page = read_page(&path)?;
        if page.slug != slug {
            return Err(StoreError::InvalidSlug(page.slug));
        }

        let current = self.pages.get(slug);
        if current.map(|p| &p.page) == Some(&page) {
            return Ok(ReloadOutcome::Unchanged);
        }

        let version = current.map(|p| p.version).unwrap_or(0) + 1;
        self.pages
            .insert(slug.to_string(), StoredPage { page, version });
        Ok(ReloadOutcome::Updated(version))
    }

    /// File backing a slug; slugs are validated so they cannot escape the root
    pub fn path_for(&self, slug: &str) -> StoreResult<PathBuf> {
        if !is_valid_slug(slug) {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        Ok(self.root.join(format!("{}.json", slug)))
    }
}

/// `pages/home.json` → `home`
pub fn slug_from_path(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| is_valid_slug(s))
        .map(str::to_string)
}
