use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    analysis, config, error, info, spotify, success,
    types::{Credentials, EnergyTableRow, Token},
    utils, warning,
};

/// Default artist for the energy report when none is given on the command
/// line. The band also appears under its Cyrillic spelling, which is tried
/// as a second search when the Latin one finds nothing.
const DEFAULT_ARTIST: &str = "buerak";
const DEFAULT_ARTIST_CYRILLIC: &str = "Буерак";

/// Verifies Spotify API access and prints a track-energy report.
///
/// Token acquisition runs three stages in order until one yields a usable
/// access token; each stage's failure is reported before falling through:
///
/// 1. If `SPOTIFY_REFRESH_TOKEN` is set, try a refresh.
/// 2. Otherwise (or on failure), run the interactive authorization-code
///    flow: authorize URL, browser, local callback listener, code exchange.
///    A freshly obtained refresh token is printed for the operator to store.
/// 3. As a last resort, obtain a client-credentials token and exercise only
///    the public search endpoint, then stop.
///
/// With a user token the command prints the `/me` profile (on a profile
/// failure it degrades to the public search) and then runs the energy
/// report for `artist` (or the default).
pub async fn check(artist: Option<String>) {
    let creds = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(e) => error!("{}", e),
    };
    let token_url = config::spotify_token_url();
    let api_url = config::spotify_api_url();

    let mut token: Option<Token> = None;

    if let Some(refresh) = creds.refresh_token.clone() {
        info!("Using the stored refresh token to renew the access token...");
        match spotify::auth::refresh_access_token(&token_url, &creds, &refresh).await {
            Ok(t) => token = Some(t),
            Err(e) => warning!("Token refresh failed: {}. Trying a fresh OAuth flow...", e),
        }
    }

    if token.is_none() {
        info!("Starting the OAuth authorization-code flow for a user token...");
        match spotify::auth::authorize(&creds).await {
            Ok(t) => {
                if let Some(refresh) = &t.refresh_token {
                    info!(
                        "Refresh token obtained. Store it as SPOTIFY_REFRESH_TOKEN in your .env to skip the login next time:"
                    );
                    println!("{}", refresh);
                }
                token = Some(t);
            }
            Err(e) => warning!("Could not complete the user flow: {}", e),
        }
    }

    let Some(token) = token else {
        info!("Falling back to client credentials (public endpoints only)...");
        let cc_token = match spotify::auth::client_credentials_token(&token_url, &creds).await {
            Ok(t) => t,
            Err(e) => error!("Client-credentials fallback failed: {}", e),
        };
        if public_search_test(&api_url, &cc_token.access_token).await {
            success!("API working (public mode)");
        } else {
            // All three stages exhausted.
            error!("Public endpoints unreachable; no fallback left.");
        }
        return;
    };

    match spotify::profile::get_profile(&api_url, &token.access_token).await {
        Ok(profile) => {
            info!("Profile id: {}", profile.id);
            info!(
                "Display name: {}",
                profile.display_name.as_deref().unwrap_or("-")
            );
            info!("Email: {}", profile.email.as_deref().unwrap_or("-"));
            info!("Product: {}", profile.product.as_deref().unwrap_or("-"));
            success!("API working with a user token");
        }
        Err(e) => {
            warning!("Profile request failed: {}. Trying the public search...", e);
            if public_search_test(&api_url, &token.access_token).await {
                success!("API working (token without profile scope)");
            }
        }
    }

    energy_report(
        &api_url,
        &token_url,
        &creds,
        &token.access_token,
        artist.as_deref().unwrap_or(DEFAULT_ARTIST),
    )
    .await;
}

/// Smoke-tests the public search endpoint with whatever token is at hand.
/// Returns whether the search worked.
async fn public_search_test(api_url: &str, token: &str) -> bool {
    match spotify::tracks::search_artist(api_url, token, "daft", 1).await {
        Ok(Some(artist)) => {
            success!("Public search OK. Example artist: {}", artist.name);
            true
        }
        Ok(None) => {
            warning!("Public search returned no results.");
            false
        }
        Err(e) => {
            warning!("Public search failed: {}", e);
            false
        }
    }
}

/// Fetches an artist's top tracks, enriches them with audio features and
/// prints the top 3 by energy plus the average.
///
/// Failures at any step are reported and end the report; they never abort
/// the process.
async fn energy_report(
    api_url: &str,
    token_url: &str,
    creds: &Credentials,
    token: &str,
    artist_query: &str,
) {
    info!("Analyzing track energy for '{}'...", artist_query);

    let mut artist = match spotify::tracks::search_artist(api_url, token, artist_query, 5).await {
        Ok(artist) => artist,
        Err(e) => {
            warning!("Artist search for '{}' failed: {}", artist_query, e);
            None
        }
    };
    if artist.is_none() && artist_query.eq_ignore_ascii_case(DEFAULT_ARTIST) {
        // The default band mostly goes by its Cyrillic name.
        artist =
            match spotify::tracks::search_artist(api_url, token, DEFAULT_ARTIST_CYRILLIC, 5).await {
                Ok(artist) => artist,
                Err(e) => {
                    warning!("Artist search for '{}' failed: {}", DEFAULT_ARTIST_CYRILLIC, e);
                    None
                }
            };
    }
    let Some(artist) = artist else {
        warning!("No artist found for '{}'", artist_query);
        return;
    };
    info!("Artist found: {} (id={})", artist.name, artist.id);

    let top_tracks =
        match spotify::tracks::get_artist_top_tracks(api_url, token, &artist.id, "US").await {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!("Failed to fetch top tracks: {}", e);
                return;
            }
        };
    if top_tracks.is_empty() {
        warning!("No top tracks available for this artist.");
        return;
    }

    let track_ids: Vec<String> = top_tracks.iter().filter_map(|t| t.id.clone()).collect();

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching audio features...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let features =
        match spotify::tracks::collect_audio_features(api_url, token_url, creds, token, &track_ids)
            .await
        {
            Ok(features) => {
                pb.finish_and_clear();
                features
            }
            Err(e) => {
                pb.finish_and_clear();
                warning!("Failed to fetch audio features: {}", e);
                return;
            }
        };
    if features.is_empty() {
        warning!("Could not obtain audio features (batch and per-track both rejected).");
        return;
    }

    let mut enriched = analysis::enrich_tracks(&top_tracks, &features);
    if enriched.is_empty() {
        warning!("No track could be joined with its audio features.");
        return;
    }
    analysis::rank_by_energy(&mut enriched);

    let table_rows: Vec<EnergyTableRow> = enriched
        .iter()
        .take(3)
        .enumerate()
        .map(|(idx, track)| EnergyTableRow {
            rank: idx + 1,
            name: track.name.clone(),
            energy: format_signal(track.energy, 3),
            tempo: format_signal(track.tempo, 1),
            danceability: format_signal(track.danceability, 3),
            valence: format_signal(track.valence, 3),
            duration: utils::format_duration_ms(track.duration_ms),
        })
        .collect();

    info!("Top 3 by energy:");
    let table = Table::new(table_rows);
    println!("{}", table);

    info!(
        "Average energy across {} tracks: {:.3}",
        enriched.len(),
        analysis::average_energy(&enriched)
    );
}

fn format_signal(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "?".to_string(),
    }
}
