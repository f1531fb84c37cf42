//! The link registry: the ordered collection of short links plus the
//! in-memory activity feed
//!
//! The registry exclusively owns all link records. It is constructed once
//! at startup, loads its contents from the persistence adapter, and every
//! mutation writes the full collection back through it. The activity feed
//! lives in memory only and is lost on restart.

use chrono::Utc;
use rand::Rng;
use url::Url;
use uuid::Uuid;

use crate::error::{Result, ShortlyError};
use crate::model::{ActivityEvent, ActivityKind, LinkRecord, LinkStats};
use crate::store::LinkStore;

/// Alphabet used for generated short-code suffixes
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random suffix in a short alias
const CODE_LEN: usize = 8;

/// How many activity events the feed exposes
const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Upper bound (exclusive) for the simulated initial click count
const CLICK_SEED_MAX: u64 = 100;

/// Owner of all link records and activity events
///
/// Collection order is most-recent-first: new records are prepended, and
/// suffix lookup returns the first match in that order.
pub struct LinkRegistry {
    host: String,
    store: LinkStore,
    links: Vec<LinkRecord>,
    activities: Vec<ActivityEvent>,
}

impl LinkRegistry {
    /// Creates a registry backed by `store`, loading whatever collection
    /// the store currently holds
    ///
    /// `host` is the host part used when fabricating short aliases
    /// (e.g. "localhost:8080").
    pub fn new(store: LinkStore, host: impl Into<String>) -> Self {
        let links = store.load();
        LinkRegistry {
            host: host.into(),
            store,
            links,
            activities: Vec::new(),
        }
    }

    /// Shortens a URL into a new link record
    ///
    /// The input is trimmed and must parse as an absolute URL. On success
    /// the record is prepended to the collection, a `created` activity is
    /// recorded and the collection is persisted.
    ///
    /// The generated suffix is NOT checked against existing records;
    /// colliding suffixes shadow older links (see
    /// [`find_by_short_code_suffix`](Self::find_by_short_code_suffix)).
    ///
    /// # Errors
    ///
    /// * [`ShortlyError::EmptyUrl`] - input is empty after trimming
    /// * [`ShortlyError::InvalidUrl`] - input does not parse as a URL
    pub fn create(&mut self, raw: &str) -> Result<LinkRecord> {
        let original = raw.trim();
        if original.is_empty() {
            return Err(ShortlyError::EmptyUrl);
        }
        if let Err(err) = Url::parse(original) {
            return Err(ShortlyError::InvalidUrl(err.to_string()));
        }

        let mut rng = rand::rng();
        let record = LinkRecord {
            id: Uuid::new_v4().to_string(),
            original_url: original.to_string(),
            short_url: format!("{}/{}", self.host, random_code(&mut rng)),
            // Simulated initial traffic, carried over from the demo origin
            clicks: rng.random_range(0..CLICK_SEED_MAX),
            created_at: Utc::now(),
        };

        self.links.insert(0, record.clone());
        self.log_activity(ActivityKind::Created, &record.short_url);
        self.store.save(&self.links)?;

        Ok(record)
    }

    /// Increments the click counter of the record with the given id by
    /// exactly one, leaving every other field unchanged, and persists
    ///
    /// # Errors
    ///
    /// * [`ShortlyError::NotFound`] - no record carries this id
    pub fn increment_clicks(&mut self, id: &str) -> Result<LinkRecord> {
        let record = self
            .links
            .iter_mut()
            .find(|link| link.id == id)
            .ok_or_else(|| ShortlyError::NotFound(id.to_string()))?;

        record.clicks += 1;
        let updated = record.clone();
        self.store.save(&self.links)?;

        Ok(updated)
    }

    /// Removes the record with the given id and persists the remainder
    ///
    /// When the delete empties the collection the stored key is removed
    /// entirely, so a later load starts from an empty collection instead
    /// of resurrecting the old array.
    ///
    /// # Errors
    ///
    /// * [`ShortlyError::NotFound`] - no record carries this id
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self
            .links
            .iter()
            .position(|link| link.id == id)
            .ok_or_else(|| ShortlyError::NotFound(id.to_string()))?;

        self.links.remove(index);

        if self.links.is_empty() {
            self.store.clear()
        } else {
            self.store.save(&self.links)
        }
    }

    /// Empties the collection and the activity feed and removes the
    /// stored key
    pub fn clear_all(&mut self) -> Result<()> {
        self.links.clear();
        self.activities.clear();
        self.store.clear()
    }

    /// Returns the first record whose short alias ends with `suffix`
    ///
    /// Ordering is most-recent-first, so if two records were ever assigned
    /// colliding suffixes the newest one resolves and silently shadows the
    /// older one.
    pub fn find_by_short_code_suffix(&self, suffix: &str) -> Option<&LinkRecord> {
        self.links
            .iter()
            .find(|link| link.short_url.ends_with(suffix))
    }

    /// Records a `shared` activity for an existing link
    ///
    /// Does not mutate the record and does not persist; the activity feed
    /// is display-only.
    ///
    /// # Errors
    ///
    /// * [`ShortlyError::NotFound`] - no record carries this id
    pub fn record_share(&mut self, id: &str) -> Result<LinkRecord> {
        let record = self
            .links
            .iter()
            .find(|link| link.id == id)
            .cloned()
            .ok_or_else(|| ShortlyError::NotFound(id.to_string()))?;

        self.log_activity(ActivityKind::Shared, &record.short_url);

        Ok(record)
    }

    /// Prepends an event to the activity feed
    pub fn log_activity(&mut self, kind: ActivityKind, url: &str) {
        self.activities.insert(
            0,
            ActivityEvent {
                id: Uuid::new_v4().to_string(),
                kind,
                url: url.to_string(),
                timestamp: Utc::now(),
            },
        );
    }

    /// The current collection, most-recent-first
    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    /// The newest activity events, at most five
    pub fn recent_activity(&self) -> &[ActivityEvent] {
        let end = self.activities.len().min(RECENT_ACTIVITY_LIMIT);
        &self.activities[..end]
    }

    /// Aggregate statistics over the current collection
    pub fn stats(&self) -> LinkStats {
        let total_clicks: u64 = self.links.iter().map(|link| link.clicks).sum();
        let average_clicks = if self.links.is_empty() {
            0
        } else {
            (total_clicks as f64 / self.links.len() as f64).round() as u64
        };

        LinkStats {
            total_links: self.links.len(),
            total_clicks,
            average_clicks,
            active_links: self.links.len(),
        }
    }
}

fn random_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
