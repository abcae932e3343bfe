//! # MetaNord Server
//!
//! REST persistence boundary for the page builder: pages are stored as JSON
//! files, saved whole, and every change is announced on an SSE feed.

pub mod error;
pub mod events;
pub mod server;
pub mod state;
pub mod store;
pub mod watcher;

pub use error::ApiError;
pub use events::{PageEvent, PageEventKind};
pub use server::{router, MutationRequest, PageResponse, SavePageRequest, SaveResponse};
pub use state::AppState;
pub use store::{PageStore, PageSummary, ReloadOutcome, StoreError, StoredPage};
pub use watcher::{spawn_page_watcher, FileWatcher, WatcherError, WatcherResult};

use std::path::PathBuf;

/// Runtime options for `serve`
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub pages_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub default_language: String,
    /// Reload pages edited on disk outside the API
    pub watch: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            host: "127.0.0.1".to_string(),
            port: 3030,
            default_language: "en".to_string(),
            watch: true,
        }
    }
}

/// Open the store and serve the API until Ctrl-C
pub async fn serve(options: ServerOptions) -> anyhow::Result<()> {
    let store = PageStore::open(&options.pages_dir)?;
    let root = store.root().to_path_buf();
    let state = AppState::new(store, &options.default_language);

    let _watcher = if options.watch {
        Some(spawn_page_watcher(state.clone(), root)?)
    } else {
        None
    };

    let addr = format!("{}:{}", options.host, options.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, pages = %options.pages_dir.display(), "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
