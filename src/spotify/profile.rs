use reqwest::Client;

use crate::{error::ApiError, types::Profile};

/// Fetches the authenticated user's profile (`GET /me`).
///
/// Requires a user token with the `user-read-private`/`user-read-email`
/// scopes; a client-credentials token gets a 403 here, which the caller
/// treats as a cue to fall back to public endpoints.
pub async fn get_profile(api_url: &str, token: &str) -> Result<Profile, ApiError> {
    let client = Client::new();
    let response = client
        .get(format!("{api_url}/me"))
        .bearer_auth(token)
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

    Ok(response.json::<Profile>().await?)
}
