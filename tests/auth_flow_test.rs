use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use tunecheck::error::ApiError;
use tunecheck::server::start_callback_server;
use tunecheck::spotify::auth::{SCOPES, build_authorize_url, verify_state, wait_for_callback};
use tunecheck::types::{AuthCallback, CallbackSlot};
use tunecheck::utils::{generate_state, redirect_port};

fn empty_slot() -> CallbackSlot {
    Arc::new(Mutex::new(None))
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // 32 alphanumeric characters
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should differ
    let state2 = generate_state();
    assert_ne!(state, state2);
}

#[test]
fn test_redirect_port() {
    assert_eq!(redirect_port("http://localhost:8080/callback"), 8080);
    assert_eq!(redirect_port("http://127.0.0.1:9099/callback"), 9099);
    // No explicit port falls back to the default
    assert_eq!(redirect_port("http://localhost/callback"), 8080);
}

#[test]
fn test_build_authorize_url_contains_all_parameters() {
    let url = build_authorize_url(
        "https://accounts.example.com/authorize",
        "my-client",
        "http://localhost:8080/callback",
        SCOPES,
        "abc123",
    );

    assert!(url.starts_with("https://accounts.example.com/authorize?"));
    assert!(url.contains("client_id=my-client"));
    assert!(url.contains("response_type=code"));
    // Redirect URI must be URL-encoded
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fcallback"));
    // Scopes are space-joined before encoding
    assert!(url.contains("scope=user-read-email%20user-read-private"));
    assert!(url.contains("state=abc123"));
    assert!(url.contains("show_dialog=false"));
}

#[test]
fn test_build_authorize_url_is_deterministic() {
    let build = || {
        build_authorize_url(
            "https://accounts.example.com/authorize",
            "my-client",
            "http://localhost:8080/callback",
            &["user-read-email"],
            "state-token",
        )
    };
    assert_eq!(build(), build());
}

#[test]
fn test_mismatched_state_is_rejected() {
    let callback = AuthCallback {
        code: "auth-code".to_string(),
        state: "forged".to_string(),
    };

    // A callback with the wrong state must never yield a usable code.
    let result = verify_state(&callback, "expected");
    assert!(matches!(result, Err(ApiError::StateMismatch)));

    let callback = AuthCallback {
        code: "auth-code".to_string(),
        state: "expected".to_string(),
    };
    assert!(verify_state(&callback, "expected").is_ok());
}

#[tokio::test]
async fn test_callback_captures_code_and_state() {
    let slot = empty_slot();
    let (addr, shutdown) = start_callback_server("127.0.0.1:0", slot.clone())
        .await
        .expect("server should bind an ephemeral port");

    let response = reqwest::get(format!(
        "http://{}/callback?code=the-code&state=the-state",
        addr
    ))
    .await
    .expect("callback request should succeed");
    assert_eq!(response.status().as_u16(), 200);

    let captured = wait_for_callback(&slot, Duration::from_secs(5))
        .await
        .expect("slot should already be filled");
    assert_eq!(captured.code, "the-code");
    assert_eq!(captured.state, "the-state");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_callback_error_parameter_answers_400_and_captures_nothing() {
    let slot = empty_slot();
    let (addr, shutdown) = start_callback_server("127.0.0.1:0", slot.clone())
        .await
        .expect("server should bind an ephemeral port");

    let response = reqwest::get(format!("http://{}/callback?error=access_denied", addr))
        .await
        .expect("callback request should succeed");
    assert_eq!(response.status().as_u16(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("access_denied"));

    // The failed request must not fill the slot; the listener keeps waiting.
    assert!(slot.lock().await.is_none());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_callback_missing_parameters_answers_400() {
    let slot = empty_slot();
    let (addr, shutdown) = start_callback_server("127.0.0.1:0", slot.clone())
        .await
        .expect("server should bind an ephemeral port");

    let response = reqwest::get(format!("http://{}/callback?code=only-code", addr))
        .await
        .expect("callback request should succeed");
    assert_eq!(response.status().as_u16(), 400);
    assert!(slot.lock().await.is_none());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_health_endpoint() {
    let slot = empty_slot();
    let (addr, shutdown) = start_callback_server("127.0.0.1:0", slot)
        .await
        .expect("server should bind an ephemeral port");

    let response = reqwest::get(format!("http://{}/health", addr))
        .await
        .expect("health request should succeed");
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_wait_for_callback_times_out() {
    let slot = empty_slot();
    let deadline = Duration::from_secs(1);

    let start = Instant::now();
    let result = wait_for_callback(&slot, deadline).await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(ApiError::Timeout)));
    // No earlier than the deadline, at most one poll interval late.
    assert!(elapsed >= deadline, "timed out early after {:?}", elapsed);
    assert!(
        elapsed < deadline + Duration::from_secs(1),
        "timed out far too late: {:?}",
        elapsed
    );
}
