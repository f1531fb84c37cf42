//! Error taxonomy shared across the registry, store and HTTP surface
//!
//! Every failure in the service maps onto one of these variants:
//! - Validation failures (`EmptyUrl`, `InvalidUrl`) abort the operation and
//!   surface to the client as 400 responses
//! - `NotFound` covers operations on records that no longer exist
//! - `Persistence` covers store open/write failures
//! - `Transport` covers log-sink delivery failures and is never surfaced
//!   to clients (the sink swallows it after local diagnostics)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShortlyError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("link not found: {0}")]
    NotFound(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("log transport failure: {0}")]
    Transport(String),
}

impl ShortlyError {
    /// Stable machine-readable code included in JSON error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ShortlyError::EmptyUrl => "empty_url",
            ShortlyError::InvalidUrl(_) => "invalid_url",
            ShortlyError::NotFound(_) => "not_found",
            ShortlyError::Persistence(_) => "persistence",
            ShortlyError::Transport(_) => "transport",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ShortlyError::EmptyUrl | ShortlyError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ShortlyError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortlyError::Persistence(_) | ShortlyError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ShortlyError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}

// redb reports a distinct error type per transaction stage; all of them
// collapse into the persistence variant here.
impl From<redb::DatabaseError> for ShortlyError {
    fn from(err: redb::DatabaseError) -> Self {
        ShortlyError::Persistence(err.to_string())
    }
}

impl From<redb::TransactionError> for ShortlyError {
    fn from(err: redb::TransactionError) -> Self {
        ShortlyError::Persistence(err.to_string())
    }
}

impl From<redb::TableError> for ShortlyError {
    fn from(err: redb::TableError) -> Self {
        ShortlyError::Persistence(err.to_string())
    }
}

impl From<redb::StorageError> for ShortlyError {
    fn from(err: redb::StorageError) -> Self {
        ShortlyError::Persistence(err.to_string())
    }
}

impl From<redb::CommitError> for ShortlyError {
    fn from(err: redb::CommitError) -> Self {
        ShortlyError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for ShortlyError {
    fn from(err: serde_json::Error) -> Self {
        ShortlyError::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortlyError>;
