//! Tests for path-based redirect resolution

use chrono::Utc;
use tempfile::NamedTempFile;

use shortly::model::{ActivityKind, LinkRecord};
use shortly::registry::LinkRegistry;
use shortly::resolver::{resolve, Resolution};
use shortly::store::LinkStore;

const TEST_HOST: &str = "example.test";

/// Registry seeded with a single known record
fn seeded_registry() -> (LinkRegistry, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let store =
        LinkStore::open(temp_db.path().to_str().unwrap()).expect("Failed to open test store");

    store
        .save(&[LinkRecord {
            id: "id-1".to_string(),
            original_url: "https://example.com/landing".to_string(),
            short_url: format!("{}/ab12cd34", TEST_HOST),
            clicks: 3,
            created_at: Utc::now(),
        }])
        .unwrap();

    (LinkRegistry::new(store, TEST_HOST), temp_db)
}

#[test]
fn test_resolve_match_redirects_and_counts_once() {
    let (mut registry, _temp_db) = seeded_registry();

    let resolution = resolve(&mut registry, "/ab12cd34");

    assert_eq!(
        resolution,
        Resolution::Redirect {
            location: "https://example.com/landing".to_string()
        }
    );

    // Exactly one increment and one clicked event per visit
    assert_eq!(registry.links()[0].clicks, 4);

    let feed = registry.recent_activity();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, ActivityKind::Clicked);
    assert_eq!(feed[0].url, format!("{}/ab12cd34", TEST_HOST));
}

#[test]
fn test_resolve_counts_each_visit() {
    let (mut registry, _temp_db) = seeded_registry();

    resolve(&mut registry, "/ab12cd34");
    resolve(&mut registry, "/ab12cd34");

    assert_eq!(registry.links()[0].clicks, 5);
    assert_eq!(registry.recent_activity().len(), 2);
}

#[test]
fn test_resolve_no_match_sends_home_without_mutation() {
    let (mut registry, _temp_db) = seeded_registry();

    let resolution = resolve(&mut registry, "/zzzzzzzz");

    assert_eq!(resolution, Resolution::NotFound);
    assert_eq!(registry.links()[0].clicks, 3);
    assert!(registry.recent_activity().is_empty());
}

#[test]
fn test_resolve_root_path_is_idle() {
    let (mut registry, _temp_db) = seeded_registry();

    assert_eq!(resolve(&mut registry, "/"), Resolution::Home);
    assert_eq!(resolve(&mut registry, ""), Resolution::Home);

    assert_eq!(registry.links()[0].clicks, 3);
    assert!(registry.recent_activity().is_empty());
}

#[test]
fn test_resolve_path_without_leading_slash() {
    // The HTTP layer hands over the extracted segment, already stripped
    let (mut registry, _temp_db) = seeded_registry();

    let resolution = resolve(&mut registry, "ab12cd34");

    assert_eq!(
        resolution,
        Resolution::Redirect {
            location: "https://example.com/landing".to_string()
        }
    );
}
