use std::collections::HashMap;

use tunecheck::analysis::{EnrichedTrack, average_energy, enrich_tracks, rank_by_energy};
use tunecheck::types::{AudioFeatures, Track};

// Helper function to create an enriched track with just a name and energy
fn create_enriched(name: &str, energy: Option<f64>) -> EnrichedTrack {
    EnrichedTrack {
        id: format!("{}_id", name),
        name: name.to_string(),
        energy,
        tempo: Some(120.0),
        danceability: Some(0.5),
        valence: Some(0.5),
        duration_ms: Some(200_000),
    }
}

// Helper function to create a track as the top-tracks endpoint returns it
fn create_track(id: Option<&str>, name: &str) -> Track {
    Track {
        id: id.map(|s| s.to_string()),
        name: name.to_string(),
    }
}

// Helper function to create a feature record for a given id
fn create_feature(id: &str, energy: Option<f64>) -> AudioFeatures {
    AudioFeatures {
        id: Some(id.to_string()),
        energy,
        tempo: Some(100.0),
        danceability: Some(0.4),
        valence: Some(0.6),
        duration_ms: Some(180_000),
    }
}

#[test]
fn test_rank_by_energy_descending() {
    let mut tracks = vec![
        create_enriched("low", Some(0.2)),
        create_enriched("high", Some(0.9)),
        create_enriched("mid", Some(0.5)),
    ];

    rank_by_energy(&mut tracks);

    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["high", "mid", "low"]);
}

#[test]
fn test_rank_by_energy_is_stable_on_ties() {
    // A and B tie on energy; A came first and must stay first.
    let mut tracks = vec![
        create_enriched("A", Some(0.9)),
        create_enriched("B", Some(0.9)),
        create_enriched("C", Some(0.2)),
    ];

    rank_by_energy(&mut tracks);

    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_rank_by_energy_missing_counts_as_zero() {
    let mut tracks = vec![
        create_enriched("none", None),
        create_enriched("tiny", Some(0.1)),
        create_enriched("zero", Some(0.0)),
    ];

    rank_by_energy(&mut tracks);

    // None ranks as 0.0: below 0.1, tied with explicit 0.0 but first by
    // original order.
    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["tiny", "none", "zero"]);
}

#[test]
fn test_average_energy_missing_counts_as_zero() {
    let tracks = vec![
        create_enriched("a", Some(0.5)),
        create_enriched("b", None),
        create_enriched("c", Some(0.7)),
    ];

    let avg = average_energy(&tracks);
    assert!((avg - 0.4).abs() < 1e-9, "expected 0.4, got {}", avg);
}

#[test]
fn test_average_energy_empty_is_zero() {
    assert_eq!(average_energy(&[]), 0.0);
}

#[test]
fn test_enrich_tracks_joins_by_id_and_preserves_order() {
    let tracks = vec![
        create_track(Some("t1"), "First"),
        create_track(Some("t2"), "Second"),
        create_track(Some("t3"), "Third"),
    ];
    let mut features = HashMap::new();
    features.insert("t1".to_string(), create_feature("t1", Some(0.3)));
    features.insert("t3".to_string(), create_feature("t3", Some(0.8)));
    features.insert("t2".to_string(), create_feature("t2", Some(0.1)));

    let enriched = enrich_tracks(&tracks, &features);

    // Input order preserved; it is the tie-breaker of the later ranking.
    let names: Vec<&str> = enriched.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert_eq!(enriched[0].energy, Some(0.3));
    assert_eq!(enriched[2].duration_ms, Some(180_000));
}

#[test]
fn test_enrich_tracks_skips_unjoined_tracks() {
    let tracks = vec![
        create_track(Some("t1"), "Kept"),
        create_track(None, "No id"),
        create_track(Some("t9"), "No features"),
    ];
    let mut features = HashMap::new();
    features.insert("t1".to_string(), create_feature("t1", Some(0.5)));

    let enriched = enrich_tracks(&tracks, &features);

    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].name, "Kept");
}
