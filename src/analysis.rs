//! Joining top tracks with audio features and ranking them by energy.
//!
//! Pure functions over the typed records; no I/O. The one policy decision
//! worth calling out: a track whose energy is missing counts as energy 0
//! for both ranking and averaging. It is ranked last, not excluded.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{AudioFeatures, Track};

/// A top track joined with its audio features.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrack {
    pub id: String,
    pub name: String,
    pub energy: Option<f64>,
    pub tempo: Option<f64>,
    pub danceability: Option<f64>,
    pub valence: Option<f64>,
    pub duration_ms: Option<u64>,
}

/// Joins tracks with the feature map by track id.
///
/// Tracks without an id or without a matching feature record are dropped;
/// the caller has already logged the misses during the fetch. The output
/// preserves the input (top-tracks) order, which later serves as the
/// tie-breaker of the ranking.
pub fn enrich_tracks(
    tracks: &[Track],
    features: &HashMap<String, AudioFeatures>,
) -> Vec<EnrichedTrack> {
    tracks
        .iter()
        .filter_map(|track| {
            let id = track.id.as_ref()?;
            let feature = features.get(id)?;
            Some(EnrichedTrack {
                id: id.clone(),
                name: track.name.clone(),
                energy: feature.energy,
                tempo: feature.tempo,
                danceability: feature.danceability,
                valence: feature.valence,
                duration_ms: feature.duration_ms,
            })
        })
        .collect()
}

fn energy_or_zero(track: &EnrichedTrack) -> f64 {
    track.energy.unwrap_or(0.0)
}

/// Sorts tracks by energy, highest first.
///
/// The sort is stable: tracks with equal energy keep their original order.
/// Missing energy counts as 0.
pub fn rank_by_energy(tracks: &mut [EnrichedTrack]) {
    tracks.sort_by(|a, b| {
        energy_or_zero(b)
            .partial_cmp(&energy_or_zero(a))
            .unwrap_or(Ordering::Equal)
    });
}

/// Arithmetic mean energy across all tracks, with missing energy counted
/// as 0. Returns 0.0 for an empty slice.
pub fn average_energy(tracks: &[EnrichedTrack]) -> f64 {
    if tracks.is_empty() {
        return 0.0;
    }
    tracks.iter().map(energy_or_zero).sum::<f64>() / tracks.len() as f64
}
