use std::collections::HashMap;

use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::ApiError,
    info,
    spotify::auth,
    types::{
        Artist, ArtistSearchResponse, AudioFeatures, AudioFeaturesResponse, Credentials,
        TopTracksResponse, Track,
    },
    warning,
};

/// Hard ceiling of the batch audio-features endpoint.
pub const MAX_BATCH_IDS: usize = 100;

/// Searches for an artist by name and returns the first match, if any.
pub async fn search_artist(
    api_url: &str,
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Option<Artist>, ApiError> {
    let client = Client::new();
    let response = client
        .get(format!("{api_url}/search"))
        .query(&[
            ("q", query),
            ("type", "artist"),
            ("limit", &limit.to_string()),
        ])
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let res = response.json::<ArtistSearchResponse>().await?;
    Ok(res.artists.items.into_iter().next())
}

/// Fetches an artist's top tracks for the given market.
pub async fn get_artist_top_tracks(
    api_url: &str,
    token: &str,
    artist_id: &str,
    market: &str,
) -> Result<Vec<Track>, ApiError> {
    let client = Client::new();
    let response = client
        .get(format!("{api_url}/artists/{artist_id}/top-tracks"))
        .query(&[("market", market)])
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let res = response.json::<TopTracksResponse>().await?;
    Ok(res.tracks)
}

/// Fetches audio features in bulk, one GET per chunk of up to
/// [`MAX_BATCH_IDS`] comma-joined ids.
///
/// Chunk responses are merged into a single id-to-features map; entries
/// without an id are skipped. Any chunk answering 403 aborts the whole
/// batch path with [`ApiError::BatchForbidden`], discarding partial merges:
/// the endpoint is known to reject for plan restrictions that do not apply
/// to the per-track endpoint, and the caller's fallback depends on telling
/// that apart from other failures.
pub async fn audio_features_batch(
    api_url: &str,
    token: &str,
    track_ids: &[String],
) -> Result<HashMap<String, AudioFeatures>, ApiError> {
    let mut features = HashMap::new();

    for chunk in track_ids.chunks(MAX_BATCH_IDS) {
        let client = Client::new();
        let response = client
            .get(format!("{api_url}/audio-features"))
            .query(&[("ids", chunk.join(","))])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if config::debug_spotify() {
                info!(
                    "[DEBUG] batch audio-features failed: {} {}",
                    status,
                    body.chars().take(300).collect::<String>()
                );
                info!("[DEBUG] first ids: {:?}", &chunk[..chunk.len().min(5)]);
            }
            if status == StatusCode::FORBIDDEN {
                return Err(ApiError::BatchForbidden { body });
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page = response.json::<AudioFeaturesResponse>().await?;
        for feature in page.audio_features.into_iter().flatten() {
            if let Some(id) = feature.id.clone() {
                features.insert(id, feature);
            }
        }
    }

    Ok(features)
}

/// Fetches the audio features of a single track.
///
/// Returns `Ok(None)` on any non-2xx status so a failed track can be
/// skipped during the per-item fallback without aborting the loop.
pub async fn audio_feature_single(
    api_url: &str,
    token: &str,
    track_id: &str,
) -> Result<Option<AudioFeatures>, ApiError> {
    let client = Client::new();
    let response = client
        .get(format!("{api_url}/audio-features/{track_id}"))
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    Ok(Some(response.json::<AudioFeatures>().await?))
}

/// Fetches audio features for a set of track ids with the full fallback
/// ladder.
///
/// 1. Batch fetch. On success that is the answer.
/// 2. On [`ApiError::BatchForbidden`] only: one single-track request per id,
///    sequentially, skipping (and logging) tracks that yield nothing.
/// 3. If that pass produced zero records: obtain a fresh client-credentials
///    token, independent of the caller's token, and repeat the per-item
///    pass with it. The batch rejection may stem from account or token
///    scoping rather than the method itself.
/// 4. A still-empty map is returned as `Ok` for the caller to report; no
///    error is raised past this point.
///
/// Other batch failures propagate unchanged.
pub async fn collect_audio_features(
    api_url: &str,
    token_url: &str,
    creds: &Credentials,
    token: &str,
    track_ids: &[String],
) -> Result<HashMap<String, AudioFeatures>, ApiError> {
    match audio_features_batch(api_url, token, track_ids).await {
        Ok(features) => Ok(features),
        Err(ApiError::BatchForbidden { .. }) => {
            warning!("Batch audio-features returned 403. Falling back to per-track requests...");
            let mut features = per_item_pass(api_url, token, track_ids).await;

            if features.is_empty() {
                info!("Per-track pass came back empty. Retrying with a client-credentials token...");
                match auth::client_credentials_token(token_url, creds).await {
                    Ok(cc_token) => {
                        features = per_item_pass(api_url, &cc_token.access_token, track_ids).await;
                    }
                    Err(e) => warning!("Client-credentials fallback also failed: {}", e),
                }
            }

            Ok(features)
        }
        Err(e) => Err(e),
    }
}

/// One sequential single-track pass. Missing or failed fetches are logged
/// and skipped; they never abort the loop.
async fn per_item_pass(
    api_url: &str,
    token: &str,
    track_ids: &[String],
) -> HashMap<String, AudioFeatures> {
    let mut features = HashMap::new();

    for track_id in track_ids {
        match audio_feature_single(api_url, token, track_id).await {
            Ok(Some(feature)) => {
                features.insert(track_id.clone(), feature);
            }
            Ok(None) => warning!("  - no features for {}", track_id),
            Err(e) => warning!("  - features request for {} failed: {}", track_id, e),
        }
    }

    features
}
