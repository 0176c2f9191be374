use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::Mutex;

use crate::{config, error::ApiError};

/// Application credentials, supplied once at startup and immutable for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub refresh_token: Option<String>,
}

impl Credentials {
    /// Reads the credentials from the environment.
    ///
    /// Fails with [`ApiError::MissingConfig`] if the client ID or secret is
    /// absent; redirect URI and refresh token have defaults/are optional.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Credentials {
            client_id: config::spotify_client_id()?,
            client_secret: config::spotify_client_secret()?,
            redirect_uri: config::spotify_redirect_uri(),
            refresh_token: config::spotify_refresh_token(),
        })
    }

    /// Returns `base64(client_id:client_secret)` for the HTTP Basic
    /// authorization header used by every token-endpoint call.
    pub fn basic_auth(&self) -> String {
        use base64::{Engine as _, engine::general_purpose::STANDARD};
        STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }
}

/// A token set as returned by the token endpoint.
///
/// Held only in memory for the process duration; the refresh token is
/// printed for the operator to copy, never persisted by the tool itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    /// Absent for client-credentials tokens, and sometimes omitted on refresh.
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    /// Unix timestamp of when the token was obtained; filled in locally.
    #[serde(default)]
    pub obtained_at: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Code and state captured from the OAuth redirect.
#[derive(Debug, Clone)]
pub struct AuthCallback {
    pub code: String,
    pub state: String,
}

/// Single mutable result slot shared between the callback handler and the
/// waiting authorization flow. Written at most once per listener run and
/// read only after the wait returns.
pub type CallbackSlot = Arc<Mutex<Option<AuthCallback>>>;

/// Response of `GET /me`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: ArtistPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistPage {
    #[serde(default)]
    pub items: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// A track as returned by the top-tracks endpoint. The id can be missing
/// for local or otherwise unresolvable tracks; such entries are skipped
/// when fetching features.
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
}

/// Per-track numeric audio descriptors.
///
/// Every signal is optional: the remote occasionally returns nulls, and a
/// missing energy is later treated as 0 for ranking purposes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioFeatures {
    pub id: Option<String>,
    pub energy: Option<f64>,
    pub tempo: Option<f64>,
    pub danceability: Option<f64>,
    pub valence: Option<f64>,
    pub duration_ms: Option<u64>,
}

/// Response of the batch audio-features endpoint. The array may contain
/// nulls for unknown ids.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}

/// Row of the energy report table.
#[derive(Tabled)]
pub struct EnergyTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub energy: String,
    pub tempo: String,
    pub danceability: String,
    pub valence: String,
    pub duration: String,
}

/// Response of the GetSongBPM search endpoint.
///
/// The service answers with an array of hits, but with an object such as
/// `{"search": {"error": "no result"}}` when nothing matches; the untagged
/// payload maps that case to "no results" instead of a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct BpmSearchResponse<T> {
    pub search: BpmSearchPayload<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BpmSearchPayload<T> {
    Results(Vec<T>),
    Other(serde_json::Value),
}

impl<T> BpmSearchPayload<T> {
    /// Returns the result list, treating the non-array shape as empty.
    pub fn into_results(self) -> Vec<T> {
        match self {
            BpmSearchPayload::Results(results) => results,
            BpmSearchPayload::Other(_) => Vec::new(),
        }
    }
}

/// A song hit from GetSongBPM. Field names vary across endpoint versions,
/// hence the aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct BpmSong {
    #[serde(alias = "title")]
    pub song_title: Option<String>,
    #[serde(alias = "bpm")]
    pub tempo: Option<String>,
    #[serde(alias = "key_of", alias = "tonality")]
    pub key: Option<String>,
    pub artist: Option<BpmArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BpmArtist {
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}
