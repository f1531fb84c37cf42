//! Path-based redirect resolution
//!
//! Maps an inbound request path onto a stored short link. Each path is
//! resolved in a single call, once per visit; registry mutations never
//! re-trigger an evaluation, so a match increments its click counter
//! exactly once.

use tracing::warn;

use crate::model::ActivityKind;
use crate::registry::LinkRegistry;

/// Outcome of resolving one request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Root path; nothing to resolve
    Home,
    /// A short link matched; navigate to its original URL
    Redirect { location: String },
    /// No link matched; send the visitor back to the root path
    NotFound,
}

/// Resolves `path` against the registry
///
/// On a match the click counter of the matched record is incremented and a
/// `clicked` activity event is recorded before the redirect location is
/// handed out.
pub fn resolve(registry: &mut LinkRegistry, path: &str) -> Resolution {
    let suffix = path.trim_start_matches('/');
    if suffix.is_empty() {
        return Resolution::Home;
    }

    let Some((id, short_url, location)) = registry.find_by_short_code_suffix(suffix).map(|r| {
        (
            r.id.clone(),
            r.short_url.clone(),
            r.original_url.clone(),
        )
    }) else {
        warn!("short URL not found: {}", suffix);
        return Resolution::NotFound;
    };

    if let Err(err) = registry.increment_clicks(&id) {
        warn!("click increment failed for {}: {}", short_url, err);
        return Resolution::NotFound;
    }
    registry.log_activity(ActivityKind::Clicked, &short_url);

    Resolution::Redirect { location }
}
