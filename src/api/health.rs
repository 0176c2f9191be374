use axum::response::Json;
use serde_json::{Value, json};

/// Reports that the callback listener is up. Handy for checking the bound
/// port while the authorization flow is waiting.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
