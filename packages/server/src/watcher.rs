use crate::events::{PageEvent, PageEventKind};
use crate::state::AppState;
use crate::store::{slug_from_path, ReloadOutcome};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::task::JoinHandle;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: UnboundedReceiver<notify::Result<Event>>,
}

impl FileWatcher {
    pub fn new(path: PathBuf) -> WatcherResult<Self> {
        let (tx, rx) = unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Next successful event; `None` once the watcher is gone
    pub async fn next_event(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await? {
                Ok(event) => return Some(event),
                Err(e) => tracing::warn!(error = %e, "watch error"),
            }
        }
    }
}

/// Slugs of page files touched by a filesystem event
fn touched_slugs(event: &Event) -> BTreeSet<String> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
            event.paths.iter().filter_map(|p| slug_from_path(p)).collect()
        }
        _ => BTreeSet::new(),
    }
}

/// Watch the pages directory and reload pages edited outside the API
pub fn spawn_page_watcher(state: AppState, root: PathBuf) -> WatcherResult<JoinHandle<()>> {
    let mut watcher = FileWatcher::new(root.clone())?;
    tracing::info!(root = %root.display(), "watching pages directory");

    Ok(tokio::spawn(async move {
        while let Some(event) = watcher.next_event().await {
            for slug in touched_slugs(&event) {
                let outcome = state.store.write().await.reload(&slug);
                match outcome {
                    Ok(ReloadOutcome::Unchanged) => {}
                    Ok(ReloadOutcome::Updated(version)) => {
                        tracing::info!(slug = %slug, version, "page changed on disk");
                        state.broadcast(PageEvent::new(slug, version, PageEventKind::Reloaded));
                    }
                    Ok(ReloadOutcome::Removed) => {
                        tracing::info!(slug = %slug, "page removed on disk");
                        state.broadcast(PageEvent::new(slug, 0, PageEventKind::Deleted));
                    }
                    Err(e) => {
                        tracing::warn!(slug = %slug, error = %e, "ignoring invalid page on disk");
                    }
                }
            }
        }
    }))
}
