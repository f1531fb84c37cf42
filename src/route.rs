//! Route definitions and shared application state
//!
//! This module configures all HTTP routes and maps them to their handlers.

use std::sync::{Arc, RwLock};

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handler::{
    clear_all_urls, delete_short_url, follow_short_url, home, link_stats, list_urls,
    recent_activity, share_short_url, shorten_url,
};
use crate::logsink::LogSink;
use crate::registry::LinkRegistry;

/// Application state shared across all request handlers
///
/// The registry sits behind a single lock; handlers take it for the
/// duration of one registry operation, which serializes all mutations the
/// same way a single UI thread would.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<LinkRegistry>>,
    pub sink: LogSink,
}

impl AppState {
    pub fn new(registry: LinkRegistry, sink: LogSink) -> Self {
        AppState {
            registry: Arc::new(RwLock::new(registry)),
            sink,
        }
    }
}

/// Creates and configures the application router
///
/// # Route Definitions
///
/// - `GET /` - service summary
/// - `GET /{code}` - redirect to the original URL (public endpoint)
/// - `POST /api/urls` - create a new short link
/// - `GET /api/urls` - list all links
/// - `DELETE /api/urls` - clear all links and the activity feed
/// - `DELETE /api/urls/{id}` - delete one link
/// - `POST /api/urls/{id}/share` - record a share
/// - `GET /api/activity` - recent activity feed (5 newest events)
/// - `GET /api/stats` - aggregate statistics
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/urls",
            get(list_urls).post(shorten_url).delete(clear_all_urls),
        )
        .route("/urls/{id}", delete(delete_short_url))
        .route("/urls/{id}/share", post(share_short_url))
        .route("/activity", get(recent_activity))
        .route("/stats", get(link_stats));

    Router::new()
        .route("/", get(home))
        // Public redirect endpoint - resolves a short alias
        .route("/{code}", get(follow_short_url))
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
