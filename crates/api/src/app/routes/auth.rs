//! Login/logout and the session-identity endpoint.

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use serde_json::json;

use stockbook_auth::SessionClaims;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;
use crate::middleware::SESSION_COOKIE;

/// Session lifetime for a freshly minted token.
const SESSION_TTL_HOURS: i64 = 24;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    jar: CookieJar,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    if !services.credentials.verify(&body.email, &body.password) {
        tracing::info!(email = %body.email, "rejected login attempt");
        return errors::json_error(StatusCode::UNAUTHORIZED, "invalid email or password");
    }

    let claims = SessionClaims::issue(&body.email, Utc::now(), Duration::hours(SESSION_TTL_HOURS));
    let token = match services.tokens.encode(&claims) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("failed to sign session token: {e}");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to create session",
            );
        }
    };

    // Expiry is enforced by the token's `exp`; the cookie itself is
    // session-scoped.
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!(email = %body.email, "session opened");

    (
        jar.add(cookie),
        errors::json_ok(json!({ "email": body.email })),
    )
        .into_response()
}

pub async fn logout(jar: CookieJar) -> axum::response::Response {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (
        jar.remove(removal),
        errors::json_ok(json!({ "message": "logged out" })),
    )
        .into_response()
}

pub async fn fetch_user(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    errors::json_ok(json!({ "email": session.email() }))
}
