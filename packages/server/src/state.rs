use crate::events::PageEvent;
use crate::store::PageStore;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

const EVENT_CAPACITY: usize = 256;

/// Shared state for HTTP handlers and the file watcher
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<PageStore>>,
    pub default_language: Arc<str>,
    events: broadcast::Sender<PageEvent>,
}

impl AppState {
    pub fn new(store: PageStore, default_language: &str) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(store)),
            default_language: Arc::from(default_language),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    /// Publish a change; having no subscribers is not an error
    pub fn broadcast(&self, event: PageEvent) {
        let receivers = self.events.send(event).unwrap_or(0);
        tracing::debug!(receivers, "broadcast page event");
    }
}
