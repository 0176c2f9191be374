//! Configuration handling for tunecheck.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. The file is looked up first in the platform-specific local data
//! directory (`tunecheck/.env`) and then in the working directory; both are
//! optional, since every variable can also be exported directly.
//!
//! Required credentials surface as [`ApiError::MissingConfig`] instead of a
//! panic so the CLI can report them before any network call is made.

use std::{env, path::PathBuf};

use crate::error::ApiError;

/// Default Spotify OAuth authorize endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
/// Default Spotify OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Default Spotify Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
/// Default loopback redirect URI registered for the app.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
/// Default GetSongBPM API base URL.
pub const DEFAULT_GETSONGBPM_URL: &str = "https://api.getsongbpm.com";

/// Loads environment variables from a `.env` file if one exists.
///
/// Tries `tunecheck/.env` in the local data directory first (creating the
/// directory so users have a place to put it), then falls back to a `.env`
/// in the working directory. A missing file is not an error: variables may
/// be set in the environment directly, and missing *values* are reported
/// individually by the typed accessors.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/tunecheck/.env`
/// - macOS: `~/Library/Application Support/tunecheck/.env`
/// - Windows: `%LOCALAPPDATA%/tunecheck/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunecheck/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if dotenv::from_path(&path).is_err() {
        // Fall back to ./.env for ad-hoc runs; absence is fine.
        let _ = dotenv::dotenv();
    }
    Ok(())
}

fn required(name: &'static str) -> Result<String, ApiError> {
    env::var(name).map_err(|_| ApiError::MissingConfig(name))
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Returns the Spotify application client ID.
///
/// Read from `SPOTIFY_CLIENT_ID`; required for every token operation.
pub fn spotify_client_id() -> Result<String, ApiError> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify application client secret.
///
/// Read from `SPOTIFY_CLIENT_SECRET`. Keep it out of logs and version
/// control; it is only ever sent inside the Basic authorization header.
pub fn spotify_client_secret() -> Result<String, ApiError> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI.
///
/// Read from `SPOTIFY_REDIRECT_URI`, defaulting to
/// `http://localhost:8080/callback`. Must match the URI registered in the
/// Spotify application settings; the callback listener binds the port
/// embedded here.
pub fn spotify_redirect_uri() -> String {
    with_default("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns a previously obtained refresh token, if the operator stored one.
///
/// Read from `SPOTIFY_REFRESH_TOKEN`. When present, the check command tries
/// a token refresh before falling back to the interactive browser flow.
pub fn spotify_refresh_token() -> Option<String> {
    env::var("SPOTIFY_REFRESH_TOKEN").ok().filter(|v| !v.is_empty())
}

/// Returns the Spotify OAuth authorize endpoint (`SPOTIFY_AUTH_URL` override).
pub fn spotify_auth_url() -> String {
    with_default("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify OAuth token endpoint (`SPOTIFY_TOKEN_URL` override).
pub fn spotify_token_url() -> String {
    with_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL` override).
///
/// The override exists mainly so tests can point the client at a local
/// mock server.
pub fn spotify_api_url() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns whether verbose Spotify diagnostics are enabled.
///
/// Read from `DEBUG_SPOTIFY`; any non-empty value enables printing of
/// failing batch responses (status, body excerpt, first track ids).
pub fn debug_spotify() -> bool {
    env::var("DEBUG_SPOTIFY").map(|v| !v.is_empty()).unwrap_or(false)
}

/// Returns the GetSongBPM API key.
///
/// Read from `GETSONGBPM_API_KEY`; required for the `bpm` command.
pub fn getsongbpm_api_key() -> Result<String, ApiError> {
    required("GETSONGBPM_API_KEY")
}

/// Returns the GetSongBPM base URL (`GETSONGBPM_BASE_URL` override),
/// with any trailing slash removed.
pub fn getsongbpm_url() -> String {
    with_default("GETSONGBPM_BASE_URL", DEFAULT_GETSONGBPM_URL)
        .trim_end_matches('/')
        .to_string()
}
