use mockito::{Matcher, Server};

use tunecheck::error::ApiError;
use tunecheck::spotify::auth::{client_credentials_token, exchange_code, refresh_access_token};
use tunecheck::types::Credentials;

// base64("test-client:test-secret")
const BASIC_HEADER: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

fn test_credentials() -> Credentials {
    Credentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: "http://localhost:8080/callback".to_string(),
        refresh_token: None,
    }
}

#[tokio::test]
async fn test_exchange_code_posts_basic_auth_and_grant() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/token")
        .match_header("authorization", BASIC_HEADER)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "the-code".into()),
            Matcher::UrlEncoded(
                "redirect_uri".into(),
                "http://localhost:8080/callback".into(),
            ),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"access_token":"user-token","refresh_token":"the-refresh","scope":"user-read-email","expires_in":3600,"token_type":"Bearer"}"#,
        )
        .create_async()
        .await;

    let token_url = format!("{}/token", server.url());
    let token = exchange_code(&token_url, &test_credentials(), "the-code")
        .await
        .expect("exchange should succeed");

    mock.assert_async().await;
    assert_eq!(token.access_token, "user-token");
    assert_eq!(token.refresh_token.as_deref(), Some("the-refresh"));
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
}

#[tokio::test]
async fn test_refresh_posts_refresh_grant() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/token")
        .match_header("authorization", BASIC_HEADER)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "stored-refresh".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"fresh-token","expires_in":3600,"token_type":"Bearer"}"#)
        .create_async()
        .await;

    let token_url = format!("{}/token", server.url());
    let token = refresh_access_token(&token_url, &test_credentials(), "stored-refresh")
        .await
        .expect("refresh should succeed");

    mock.assert_async().await;
    assert_eq!(token.access_token, "fresh-token");
    // Refresh responses may omit the refresh token.
    assert!(token.refresh_token.is_none());
}

#[tokio::test]
async fn test_client_credentials_token_has_no_refresh_token() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/token")
        .match_header("authorization", BASIC_HEADER)
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"cc-token","token_type":"Bearer","expires_in":3600}"#)
        .create_async()
        .await;

    let token_url = format!("{}/token", server.url());
    let token = client_credentials_token(&token_url, &test_credentials())
        .await
        .expect("client-credentials grant should succeed");

    assert_eq!(token.access_token, "cc-token");
    assert!(token.refresh_token.is_none());
}

#[tokio::test]
async fn test_non_200_exchange_carries_status_and_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let token_url = format!("{}/token", server.url());
    let result = exchange_code(&token_url, &test_credentials(), "expired-code").await;

    match result {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_grant"));
        }
        Err(e) => panic!("expected Status, got {:?}", e),
        Ok(_) => panic!("expected Status, got success"),
    }
}
