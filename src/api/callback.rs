use std::collections::HashMap;

use axum::{Extension, extract::Query, http::StatusCode};

use crate::types::{AuthCallback, CallbackSlot};

/// Handles the OAuth redirect from the authorization server.
///
/// Expected shapes are `GET /callback?code=...&state=...` on success and
/// `GET /callback?error=...` when the user denied access or the request was
/// malformed. An `error` parameter answers 400 with a plain-text
/// explanation; it fails only this request, not the listener, which keeps
/// waiting until its deadline.
///
/// On `code`/`state` the pair is stored in the shared slot and the browser
/// gets a short confirmation. State verification happens in the caller that
/// owns the expected value; the handler records what arrived, nothing more.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(slot): Extension<CallbackSlot>,
) -> (StatusCode, String) {
    if let Some(error) = params.get("error") {
        return (
            StatusCode::BAD_REQUEST,
            format!("Authorization failed: {}", error),
        );
    }

    match (params.get("code"), params.get("state")) {
        (Some(code), Some(state)) => {
            let mut lock = slot.lock().await;
            *lock = Some(AuthCallback {
                code: code.clone(),
                state: state.clone(),
            });
            (
                StatusCode::OK,
                "Authentication successful. You can return to the terminal.".to_string(),
            )
        }
        _ => (
            StatusCode::BAD_REQUEST,
            "Missing code or state parameter.".to_string(),
        ),
    }
}
