//! HTTP endpoints for the local callback server.
//!
//! The server started by [`crate::server::start_callback_server`] exposes two
//! routes: `/callback`, which captures the authorization code and state from
//! the browser redirect into a shared result slot, and `/health`, a small
//! status endpoint useful for checking that the listener came up.
//!
//! The callback handler deliberately does *not* exchange the code itself.
//! It only records what arrived; the waiting authorization flow verifies the
//! state value and performs the exchange, so a forged redirect can never
//! reach the token endpoint.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
