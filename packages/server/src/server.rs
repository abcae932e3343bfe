//! HTTP API for the page builder.
//!
//! The builder saves by sending the whole page tree; there is no partial
//! update besides the mutation endpoint, which applies editor mutations to
//! the stored tree and then saves it the same way.

use crate::error::ApiError;
use crate::events::{PageEvent, PageEventKind};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use metanord_common::{extract_assets, AssetReference};
use metanord_editor::{Document, Mutation};
use metanord_model::Page;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/pages", get(list_pages))
        .route(
            "/api/pages/:slug",
            get(get_page).put(save_page).delete(delete_page),
        )
        .route("/api/pages/:slug/mutations", post(apply_mutations))
        .route("/api/pages/:slug/assets", get(page_assets))
        .route("/api/events", get(events))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Request / response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub page: Page,
    pub version: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePageRequest {
    pub page: Page,
    #[serde(default)]
    pub expected_version: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRequest {
    pub mutations: Vec<Mutation>,
    #[serde(default)]
    pub expected_version: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub slug: String,
    pub version: u64,
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub slug: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_pages(State(state): State<AppState>, Query(query): Query<LangQuery>) -> impl IntoResponse {
    let lang = query
        .lang
        .unwrap_or_else(|| state.default_language.to_string());
    let store = state.store.read().await;
    Json(store.list(&lang))
}

/// Raw page for the builder, or the resolved view when `?lang=` is given
async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Response, ApiError> {
    let store = state.store.read().await;
    let stored = store
        .get(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Page not found: {}", slug)))?;

    let response = match query.lang {
        Some(lang) => Json(stored.page.localize(&lang)).into_response(),
        None => Json(PageResponse {
            page: stored.page.clone(),
            version: stored.version,
        })
        .into_response(),
    };
    Ok(response)
}

async fn save_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Result<Json<SavePageRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(request) = body?;
    if request.page.slug != slug {
        return Err(ApiError::BadRequest(format!(
            "Page slug {:?} does not match path {:?}",
            request.page.slug, slug
        )));
    }

    let version = {
        let mut store = state.store.write().await;
        store.put(request.page, request.expected_version)?
    };

    state.broadcast(PageEvent::new(&slug, version, PageEventKind::Saved));
    Ok(Json(SaveResponse { slug, version }))
}

async fn delete_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    let version = {
        let mut store = state.store.write().await;
        let version = store.get(&slug).map(|p| p.version).unwrap_or(0);
        store.delete(&slug)?;
        version
    };

    state.broadcast(PageEvent::new(&slug, version, PageEventKind::Deleted));
    Ok(StatusCode::NO_CONTENT)
}

/// Apply editor mutations to the stored page, then save the whole tree
async fn apply_mutations(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Result<Json<MutationRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(request) = body?;
    tracing::info!(slug = %slug, count = request.mutations.len(), "received mutations");

    let version = {
        let mut store = state.store.write().await;
        let stored = store
            .get(&slug)
            .ok_or_else(|| ApiError::NotFound(format!("Page not found: {}", slug)))?;

        let base_version = stored.version;
        if let Some(expected) = request.expected_version {
            if expected != base_version {
                return Err(ApiError::Conflict {
                    expected,
                    actual: base_version,
                });
            }
        }

        let mut doc = Document::from_page(PathBuf::from(format!("{}.json", slug)), stored.page.clone());
        for mutation in request.mutations {
            doc.apply(mutation)?;
        }

        store.put(doc.page().clone(), Some(base_version))?
    };

    state.broadcast(PageEvent::new(&slug, version, PageEventKind::Saved));
    Ok(Json(SaveResponse { slug, version }))
}

async fn page_assets(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<AssetReference>>, ApiError> {
    let store = state.store.read().await;
    let stored = store
        .get(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Page not found: {}", slug)))?;
    Ok(Json(extract_assets(&stored.page)))
}

/// SSE stream of page changes, optionally filtered to one slug
async fn events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!(slug = ?query.slug, "starting event stream");

    let filter = query.slug;
    let stream = BroadcastStream::new(state.subscribe()).filter_map(move |received| {
        let event = match received {
            Ok(event) => event,
            Err(lagged) => {
                tracing::warn!(error = %lagged, "[SSE] subscriber lagged");
                return None;
            }
        };

        if filter.as_ref().is_some_and(|slug| *slug != event.slug) {
            return None;
        }

        let json = serde_json::to_string(&event).unwrap_or_default();
        Some(Ok(Event::default().event("page").data(json)))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
