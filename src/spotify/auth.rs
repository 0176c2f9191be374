use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::Client;

use crate::{
    config,
    error::ApiError,
    info, server,
    types::{AuthCallback, CallbackSlot, Credentials, Token},
    utils, warning,
};

/// Scopes requested during the interactive flow.
pub const SCOPES: &[&str] = &["user-read-email", "user-read-private"];

/// Wall-clock deadline for the authorization callback.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Interval between polls of the callback capture slot.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Composes the authorize-endpoint URL the operator's browser is sent to.
///
/// Pure function, no network call: the result is fully determined by its
/// inputs. The scope list is space-joined before encoding, and
/// `show_dialog=false` skips the consent screen for already-authorized
/// users.
///
/// # Example
///
/// ```
/// let url = build_authorize_url(
///     "https://accounts.spotify.com/authorize",
///     "my-client-id",
///     "http://localhost:8080/callback",
///     &["user-read-email"],
///     "random-state",
/// );
/// ```
pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[&str],
    state: &str,
) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}&show_dialog=false",
        auth_url = auth_url,
        client_id = urlencoding::encode(client_id),
        redirect_uri = urlencoding::encode(redirect_uri),
        scope = urlencoding::encode(&scopes.join(" ")),
        state = urlencoding::encode(state),
    )
}

/// POSTs a grant to the token endpoint with Basic authorization and maps
/// the response to a [`Token`].
///
/// Any non-2xx status becomes [`ApiError::Status`] carrying the status and
/// body, which is the failure contract of all three grant types.
async fn post_token_form(
    token_url: &str,
    creds: &Credentials,
    form: &[(&str, &str)],
) -> Result<Token, ApiError> {
    let client = Client::new();
    let response = client
        .post(token_url)
        .header("Authorization", format!("Basic {}", creds.basic_auth()))
        .form(form)
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

    let mut token = response.json::<Token>().await?;
    token.obtained_at = Utc::now().timestamp() as u64;
    Ok(token)
}

/// Exchanges an authorization code for a token set.
///
/// Final step of the authorization-code flow. The redirect URI must match
/// the one in the authorize request, or the endpoint rejects the exchange.
pub async fn exchange_code(
    token_url: &str,
    creds: &Credentials,
    code: &str,
) -> Result<Token, ApiError> {
    post_token_form(
        token_url,
        creds,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &creds.redirect_uri),
        ],
    )
    .await
}

/// Obtains a fresh access token from a stored refresh token.
///
/// Lets the operator skip the browser flow entirely. The response may or
/// may not rotate the refresh token.
pub async fn refresh_access_token(
    token_url: &str,
    creds: &Credentials,
    refresh_token: &str,
) -> Result<Token, ApiError> {
    post_token_form(
        token_url,
        creds,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

/// Obtains an application-scoped token via the client-credentials flow.
///
/// No end-user context and no refresh token; used when no user token is
/// available and as the last resort of the audio-features fallback, since a
/// user token can be rejected for scoping reasons that do not apply to an
/// application token.
pub async fn client_credentials_token(
    token_url: &str,
    creds: &Credentials,
) -> Result<Token, ApiError> {
    post_token_form(token_url, creds, &[("grant_type", "client_credentials")]).await
}

/// Runs the interactive authorization-code flow end to end.
///
/// 1. Generates the anti-forgery state for this attempt.
/// 2. Starts the callback listener on the port from the redirect URI.
/// 3. Opens the authorize URL in the browser (printing it on failure).
/// 4. Waits up to [`CALLBACK_TIMEOUT`] for the redirect.
/// 5. Verifies the echoed state and exchanges the code.
///
/// The listener is shut down before this function returns, on every path,
/// so the port is never held past the one exchange.
///
/// # Errors
///
/// [`ApiError::Timeout`] when no callback arrives in time,
/// [`ApiError::StateMismatch`] when the echoed state differs from the
/// generated one (the code is discarded unused), and the usual
/// [`ApiError::Status`] from the exchange itself.
pub async fn authorize(creds: &Credentials) -> Result<Token, ApiError> {
    let state = utils::generate_state();

    let slot: CallbackSlot = Default::default();
    let port = utils::redirect_port(&creds.redirect_uri);
    let (_addr, shutdown) =
        server::start_callback_server(&format!("127.0.0.1:{port}"), slot.clone()).await?;

    let auth_url = build_authorize_url(
        &config::spotify_auth_url(),
        &creds.client_id,
        &creds.redirect_uri,
        SCOPES,
        &state,
    );

    info!(
        "Waiting for authorization (timeout {}s)...",
        CALLBACK_TIMEOUT.as_secs()
    );
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    let result = wait_for_callback(&slot, CALLBACK_TIMEOUT).await;
    // Release the port regardless of how the wait ended.
    let _ = shutdown.send(());

    let callback = result?;
    verify_state(&callback, &state)?;

    exchange_code(&config::spotify_token_url(), creds, &callback.code).await
}

/// Waits for the callback handler to fill the capture slot.
///
/// Re-checks the wall-clock deadline between polls, so the timeout is
/// best-effort: it fires no earlier than `deadline` and at most one poll
/// interval late.
pub async fn wait_for_callback(
    slot: &CallbackSlot,
    deadline: Duration,
) -> Result<AuthCallback, ApiError> {
    let start = Instant::now();

    while start.elapsed() < deadline {
        let lock = slot.lock().await;
        if let Some(callback) = lock.as_ref() {
            return Ok(callback.clone());
        }
        drop(lock);
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(ApiError::Timeout)
}

/// Rejects a callback whose echoed state differs from the one generated
/// for this attempt. A mismatched code must never be exchanged.
pub fn verify_state(callback: &AuthCallback, expected: &str) -> Result<(), ApiError> {
    if callback.state == expected {
        Ok(())
    } else {
        Err(ApiError::StateMismatch)
    }
}
