//! Flat-file loader integration tests
//!
//! Writes real JSON files into a scratch data directory and checks the
//! loader's degrade-to-empty contract end to end, including building a
//! catalog from a partially broken store.

use std::fs;

use fieldlab::catalog::{Catalog, ProtocolFilter};
use fieldlab::model::{Cluster, Protocol};
use fieldlab::storage::{CollectionKind, JsonStore, RecordSource};
use fieldlab::Error;
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fieldlab=debug")
        .try_init();
}

fn write_collection(dir: &TempDir, kind: CollectionKind, json: &str) {
    fs::write(dir.path().join(kind.file_name()), json).expect("write fixture");
}

#[test]
fn test_load_round_trip_preserves_stored_order() {
    let dir = TempDir::new().unwrap();
    write_collection(
        &dir,
        CollectionKind::Clusters,
        r#"[
            {"id": 2, "name": "water", "title": "Water Quality"},
            {"id": 1, "name": "air", "title": "Air Quality"}
        ]"#,
    );

    let store = JsonStore::new(dir.path());
    let clusters = store.clusters();
    let ids: Vec<u32> = clusters.iter().map(Cluster::id).collect();
    // Stored order, not id order.
    assert_eq!(ids, [2, 1]);
}

#[test]
fn test_missing_collection_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path());
    assert!(store.protocols().is_empty());
    assert!(store.measurements().is_empty());
}

#[test]
fn test_corrupt_collection_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    write_collection(&dir, CollectionKind::Protocols, "{ not json ]");

    let store = JsonStore::new(dir.path());
    assert!(store.protocols().is_empty());
}

#[test]
fn test_try_load_surfaces_corrupt_file() {
    let dir = TempDir::new().unwrap();
    write_collection(&dir, CollectionKind::Protocols, "[{\"id\": 1}]");

    let store = JsonStore::new(dir.path());
    let result: Result<Vec<Protocol>, Error> = store.try_load(CollectionKind::Protocols);
    assert!(matches!(result, Err(Error::Storage(_))));
}

#[test]
fn test_catalog_from_partially_broken_store() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    write_collection(
        &dir,
        CollectionKind::Clusters,
        r#"[{"id": 1, "name": "air", "title": "Air Quality"}]"#,
    );
    write_collection(
        &dir,
        CollectionKind::Protocols,
        r#"[{
            "id": "co2-diffusion",
            "name": "CO2 Diffusion",
            "primary_cluster": 1,
            "difficulty": "beginner"
        }]"#,
    );
    // Sensors file is corrupt; the catalog must still come up.
    write_collection(&dir, CollectionKind::Sensors, "!!");

    let store = JsonStore::new(dir.path());
    let catalog = Catalog::from_source(&store);

    assert_eq!(catalog.clusters().len(), 1);
    assert!(catalog.sensors().is_empty());

    let envelope = catalog.protocols_filtered(&ProtocolFilter {
        cluster: Some(1),
        difficulty: None,
    });
    assert_eq!(envelope.len(), 1);

    let enriched = catalog.protocols_enriched();
    assert_eq!(enriched[0].reference.as_ref().unwrap().title, "Air Quality");
}

#[test]
fn test_generic_load_via_record_source_trait() {
    let dir = TempDir::new().unwrap();
    write_collection(
        &dir,
        CollectionKind::Experiments,
        r#"[{
            "id": "exp-1700000000000-a1b2",
            "title": "Classroom CO2",
            "student": "R. Franklin",
            "school": "Ada Lovelace School",
            "start_date": "2026-03-01T08:00:00Z",
            "status": "active",
            "tags": ["air-quality"]
        }]"#,
    );

    let store = JsonStore::new(dir.path());
    let experiments: Vec<fieldlab::model::Experiment> =
        store.load(CollectionKind::Experiments);
    assert_eq!(experiments.len(), 1);
    assert_eq!(experiments[0].title(), "Classroom CO2");
}
