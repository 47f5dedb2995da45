//! JSON surface over the Primer engine.
//!
//! Stateless apart from configuration: every request derives, encrypts or
//! decrypts from the values in its own body.

pub mod error;
pub mod keys;
pub mod messages;
pub mod state;

use axum::{
    Json, Router,
    routing::{get, post},
};

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// Build the application router. Layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/primes/{n}", get(keys::check_prime))
        .route("/keys", post(keys::derive_keys))
        .route("/encrypt", post(messages::encrypt))
        .route("/decrypt", post(messages::decrypt))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
