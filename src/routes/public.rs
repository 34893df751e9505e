use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines the session endpoints and the health probe. None of these routes is
/// wrapped in the access guard: login and logout are reachable anonymously, and
/// refresh performs its own bearer extraction because its failure mapping
/// differs from the guard's (an early refresh is 400, not 401).
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // POST /login
        // Credential check and token issuance. 401 on a bad pair, with one
        // message for unknown-user and wrong-password alike.
        .route("/login", post(handlers::login))
        // POST /logout
        // Stateless acknowledgment; no token state exists server-side to clear.
        .route("/logout", post(handlers::logout))
        // POST /refresh
        // Exchanges a token inside its refresh window for a longer-lived one.
        .route("/refresh", post(handlers::refresh))
}
