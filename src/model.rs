//! Data models for the URL shortener
//!
//! This module defines the structures used throughout the application:
//! the persisted link record, the transient activity events shown in the
//! recent-activity feed, aggregate statistics and the request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link as stored in the database
///
/// Records are persisted as one JSON array under a single fixed key, with
/// camelCase field names:
///
/// ```json
/// {
///   "id": "4f7c...",
///   "originalUrl": "https://example.com/very/long/url",
///   "shortUrl": "localhost:8080/ab12cd34",
///   "clicks": 42,
///   "createdAt": "2026-08-05T13:40:00Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Unique identifier, assigned at creation and never reused
    pub id: String,

    /// The original long URL that was shortened
    pub original_url: String,

    /// The complete short alias, `<host>/<8-char suffix>`
    ///
    /// The suffix is random and NOT checked against existing records, so
    /// two records may carry the same suffix; lookup resolves the newest.
    pub short_url: String,

    /// Number of recorded visits through the short alias
    ///
    /// Seeded with a random value below 100 at creation, then incremented
    /// by one per resolved redirect. Defaults to 0 when absent in stored
    /// data.
    #[serde(default)]
    pub clicks: u64,

    /// Timestamp when this record was created, immutable afterwards
    pub created_at: DateTime<Utc>,
}

/// Kind of a recorded activity
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Created,
    Clicked,
    Shared,
}

/// A transient entry in the recent-activity feed
///
/// Events are held in memory only and never persisted; a service restart
/// starts with an empty feed.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ActivityKind,

    /// The short alias the event refers to
    pub url: String,

    pub timestamp: DateTime<Utc>,
}

/// Aggregate statistics over the current link collection
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total_links: usize,
    pub total_clicks: u64,
    /// Rounded mean of clicks per link, 0 when the collection is empty
    pub average_clicks: u64,
    pub active_links: usize,
}

/// Request payload for shortening a URL
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize)]
pub struct ShortenRequest {
    /// The original URL to be shortened; must parse as an absolute URL
    pub url: String,
}
