use thiserror::Error;

/// Errors raised by the Spotify and GetSongBPM clients.
///
/// The variants mirror the failure modes the CLI layer branches on:
/// configuration problems abort before any network call, `BatchForbidden`
/// drives the audio-features fallback, and `StateMismatch`/`Timeout` are
/// fatal to a single authorization attempt but not to the process.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required environment variable is absent. Fatal; reported before
    /// any network call is made.
    #[error("missing configuration: {0} must be set")]
    MissingConfig(&'static str),

    /// A remote call answered with a non-2xx status. Carries the status and
    /// the response body for diagnostics.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The batch audio-features endpoint answered 403. Kept distinct from
    /// [`ApiError::Status`] so the caller's fallback decision is a pattern
    /// match: the same data is often still retrievable per track or under a
    /// client-credentials token.
    #[error("batch audio-features request rejected (HTTP 403): {body}")]
    BatchForbidden { body: String },

    /// The `state` echoed back on the OAuth callback does not match the one
    /// generated for this attempt. The authorization code must not be used.
    #[error("invalid state on callback (possible CSRF); discarding the code")]
    StateMismatch,

    /// No valid callback arrived within the configured deadline.
    #[error("timed out waiting for the authorization callback")]
    Timeout,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
