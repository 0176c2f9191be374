//! Spotify Web API client.
//!
//! Thin typed wrappers over the handful of endpoints the check command
//! needs, organized by concern:
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow with a local callback
//!   listener, token refresh, and the client-credentials flow. All token
//!   operations POST to the same endpoint with an HTTP Basic header built
//!   from `client_id:client_secret`.
//! - [`profile`] - The `/me` endpoint mapped to a typed record.
//! - [`tracks`] - Artist search, top tracks, and the audio-features fetch
//!   with its batch-then-per-item-then-client-credentials fallback ladder.
//!
//! Every function takes its base URL explicitly rather than reading global
//! state, so the tests can point individual calls at a mock server. Non-2xx
//! responses surface as [`crate::error::ApiError::Status`] carrying the
//! status and body; the batch audio-features 403 gets its own variant
//! because the caller branches on it.

pub mod auth;
pub mod profile;
pub mod tracks;
