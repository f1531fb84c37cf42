//! HTTP request handlers for the URL shortener
//!
//! This module implements the service surface:
//! - Shortening a long URL into a short alias
//! - Resolving short aliases into redirects with click tracking
//! - Listing, deleting and clearing links
//! - The recent-activity feed and aggregate statistics

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde_json::json;
use tracing::info;

use crate::error::ShortlyError;
use crate::model::ShortenRequest;
use crate::resolver::{self, Resolution};
use crate::route::AppState;

/// Service summary served at the root path
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().expect("registry lock poisoned");

    Json(json!({
        "service": "shortly",
        "links": registry.links().len(),
        "status": "ok"
    }))
}

/// Creates a new short link
///
/// The registry validates the input, fabricates the alias and persists the
/// updated collection; this handler only adds request plumbing and log
/// shipping on top.
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **201 Created** - the created link record
/// - **400 Bad Request** - empty or malformed URL; the body's `code` field
///   distinguishes `empty_url` from `invalid_url`
pub async fn shorten_url(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<impl IntoResponse, ShortlyError> {
    state.sink.info(
        "registry",
        format!("URL shortening initiated for: {}", payload.url),
    );

    let result = {
        let mut registry = state.registry.write().expect("registry lock poisoned");
        registry.create(&payload.url)
    };

    match result {
        Ok(record) => {
            info!("shortened {} as {}", record.original_url, record.short_url);
            state.sink.info(
                "registry",
                format!("URL shortened successfully: {}", record.short_url),
            );
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(err) => {
            match &err {
                ShortlyError::EmptyUrl => state
                    .sink
                    .warn("registry", "URL shortening attempted with empty URL"),
                _ => state.sink.error(
                    "registry",
                    format!("Invalid URL format attempted: {}", payload.url),
                ),
            }
            Err(err)
        }
    }
}

/// Resolves a short alias and redirects to its original destination
///
/// When a visitor follows `http://<host>/ab12cd34`, this handler resolves
/// "ab12cd34" against the registry, counts the click, records a `clicked`
/// activity and answers with a redirect.
///
/// # Response
///
/// - **307 Temporary Redirect** - alias matched; `Location` is the
///   original URL
/// - **303 See Other** to `/` - no alias matched; the visitor lands on the
///   root path instead of an error page
pub async fn follow_short_url(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let resolution = {
        let mut registry = state.registry.write().expect("registry lock poisoned");
        resolver::resolve(&mut registry, &code)
    };

    match resolution {
        Resolution::Redirect { location } => {
            state
                .sink
                .info("resolver", format!("Redirecting to: {}", location));
            Redirect::temporary(&location).into_response()
        }
        Resolution::Home | Resolution::NotFound => {
            state
                .sink
                .warn("resolver", format!("Short URL not found: {}", code));
            Redirect::to("/").into_response()
        }
    }
}

/// Lists all links, most-recent-first
pub async fn list_urls(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().expect("registry lock poisoned");

    Json(json!({
        "total": registry.links().len(),
        "data": registry.links(),
    }))
}

/// Deletes a single short link by id
///
/// # Response
///
/// - **200 OK** - link removed; when it was the last one the stored key is
///   removed as well
/// - **404 Not Found** - no link carries this id
pub async fn delete_short_url(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ShortlyError> {
    {
        let mut registry = state.registry.write().expect("registry lock poisoned");
        registry.delete(&id)?;
    }

    state.sink.info("registry", format!("URL deleted: {}", id));

    Ok(Json(json!({
        "message": "Short link deleted successfully",
        "deletedId": id
    })))
}

/// Removes every link and the activity feed; always succeeds
pub async fn clear_all_urls(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ShortlyError> {
    {
        let mut registry = state.registry.write().expect("registry lock poisoned");
        registry.clear_all()?;
    }

    state.sink.info("registry", "All URLs cleared");

    Ok(Json(json!({ "message": "All URLs cleared" })))
}

/// Records that a short link was shared
///
/// # Response
///
/// - **200 OK** - a `shared` activity was recorded
/// - **404 Not Found** - no link carries this id
pub async fn share_short_url(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ShortlyError> {
    let record = {
        let mut registry = state.registry.write().expect("registry lock poisoned");
        registry.record_share(&id)?
    };

    state
        .sink
        .info("registry", format!("URL shared: {}", record.short_url));

    Ok(Json(json!({ "sharedUrl": record.short_url })))
}

/// The five most recent activity events, newest first
pub async fn recent_activity(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().expect("registry lock poisoned");

    Json(json!({ "data": registry.recent_activity() }))
}

/// Aggregate statistics over the current collection
pub async fn link_stats(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.registry.read().expect("registry lock poisoned");

    Json(registry.stats())
}
