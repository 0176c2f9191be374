//! GetSongBPM API client.
//!
//! One GET endpoint (`/search/`) with the API key passed as a query
//! parameter. Results carry tempo (BPM) and key per song. The service's
//! terms require crediting getsongbpm.com in any output built from this
//! data; the `bpm` command prints that line.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    types::{BpmArtist, BpmSearchResponse, BpmSong},
};

/// Searches songs matching `"{artist} {track}"` (`type=both`).
pub async fn search_track(
    base_url: &str,
    api_key: &str,
    artist: &str,
    track: &str,
) -> Result<Vec<BpmSong>, ApiError> {
    search(base_url, api_key, "both", &format!("{artist} {track}")).await
}

/// Searches artists by name (`type=artist`); hits are artist records, not songs.
pub async fn search_artist(
    base_url: &str,
    api_key: &str,
    name: &str,
) -> Result<Vec<BpmArtist>, ApiError> {
    search(base_url, api_key, "artist", name).await
}

async fn search<T: DeserializeOwned>(
    base_url: &str,
    api_key: &str,
    kind: &str,
    lookup: &str,
) -> Result<Vec<T>, ApiError> {
    let client = Client::new();
    let response = client
        .get(format!("{base_url}/search/"))
        .query(&[("type", kind), ("lookup", lookup), ("api_key", api_key)])
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

    let res = response.json::<BpmSearchResponse<T>>().await?;
    Ok(res.search.into_results())
}
