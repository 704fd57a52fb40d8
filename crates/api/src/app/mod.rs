//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store/engine/projector wiring shared by all handlers
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent `{success, data|error}` envelopes

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(services::build_services(&config));
    let auth_state = middleware::AuthState {
        tokens: services.tokens.clone(),
    };

    // Protected routes: require a valid session cookie.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
