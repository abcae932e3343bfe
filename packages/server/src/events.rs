use serde::{Deserialize, Serialize};

/// Change notification broadcast to SSE subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEvent {
    pub slug: String,
    pub version: u64,
    pub kind: PageEventKind,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageEventKind {
    /// Saved through the API
    Saved,
    Deleted,
    /// Changed on disk outside the API
    Reloaded,
}

impl PageEvent {
    pub fn new(slug: impl Into<String>, version: u64, kind: PageEventKind) -> Self {
        Self {
            slug: slug.into(),
            version,
            kind,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
