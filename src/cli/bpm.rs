use crate::{config, error, getsongbpm, info};

/// Looks up BPM and key for a track via the GetSongBPM API and prints the
/// first hit.
///
/// Requires `GETSONGBPM_API_KEY`; a missing key is fatal before any network
/// call. The attribution line is mandated by the service's terms of use.
pub async fn bpm(artist: String, track: String) {
    let api_key = match config::getsongbpm_api_key() {
        Ok(key) => key,
        Err(e) => error!("{}", e),
    };
    let base_url = config::getsongbpm_url();

    let results = match getsongbpm::search_track(&base_url, &api_key, &artist, &track).await {
        Ok(results) => results,
        Err(e) => error!("GetSongBPM lookup failed: {}", e),
    };

    let Some(song) = results.into_iter().next() else {
        info!("No results found for '{} - {}'.", artist, track);
        return;
    };

    let artist_name = song
        .artist
        .as_ref()
        .and_then(|a| a.name.as_deref())
        .unwrap_or("?");
    info!(
        "Result: {} - {}",
        artist_name,
        song.song_title.as_deref().unwrap_or("?")
    );
    info!(
        "BPM: {} | Key: {}",
        song.tempo.as_deref().unwrap_or("?"),
        song.key.as_deref().unwrap_or("?")
    );
    println!("BPM and key data courtesy of https://getsongbpm.com");
}
