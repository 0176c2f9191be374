use rand::{Rng, distr::Alphanumeric};

/// Generates the random anti-forgery `state` value for one authorization
/// attempt.
///
/// The value is compared against the `state` echoed back on the OAuth
/// redirect; a mismatch means the callback cannot be trusted. 32 random
/// alphanumeric characters are plenty of entropy for a single-use token.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Extracts the port from a redirect URI such as
/// `http://localhost:8080/callback`, defaulting to 8080 when none is given.
///
/// The callback listener must bind exactly the port the browser will be
/// redirected to.
pub fn redirect_port(redirect_uri: &str) -> u16 {
    redirect_uri
        .split('/')
        .nth(2)
        .and_then(|hostport| hostport.rsplit_once(':'))
        .and_then(|(_, port)| port.parse().ok())
        .unwrap_or(8080)
}

/// Formats a millisecond duration as seconds with one decimal, e.g. "215.3s".
pub fn format_duration_ms(duration_ms: Option<u64>) -> String {
    match duration_ms {
        Some(ms) => format!("{:.1}s", ms as f64 / 1000.0),
        None => "?".to_string(),
    }
}
