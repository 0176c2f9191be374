use axum::{Extension, Router, routing::get};
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::{api, error::ApiError, types::CallbackSlot};

/// Starts the short-lived callback server and returns its bound address
/// together with a shutdown handle.
///
/// The server exists only to receive one OAuth redirect. The caller keeps
/// the returned sender and fires it as soon as the exchange finishes or
/// times out, which releases the port deterministically instead of leaking
/// the listener task for the rest of the process.
///
/// Binding `port 0` yields an ephemeral port; the actual address is
/// returned, which the tests rely on.
pub async fn start_callback_server(
    addr: &str,
    slot: CallbackSlot,
) -> Result<(SocketAddr, oneshot::Sender<()>), ApiError> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(slot)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok((local_addr, shutdown_tx))
}
