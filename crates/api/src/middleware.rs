use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use stockbook_auth::{Hs256TokenCodec, validate_claims};

use crate::app::errors::json_error;
use crate::context::SessionContext;

/// Name of the session cookie carrying the signed token.
pub const SESSION_COOKIE: &str = "jwt";

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<Hs256TokenCodec>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_session_token(req.headers())?;

    let claims = state
        .tokens
        .decode(&token)
        .map_err(|_e| unauthorized("invalid session token"))?;

    validate_claims(&claims, Utc::now()).map_err(|e| unauthorized(e.to_string()))?;

    req.extensions_mut().insert(SessionContext::new(claims.sub));

    Ok(next.run(req).await)
}

fn extract_session_token(headers: &HeaderMap) -> Result<String, Response> {
    let jar = CookieJar::from_headers(headers);

    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .ok_or_else(|| unauthorized("authentication required"))?;

    if token.is_empty() {
        return Err(unauthorized("authentication required"));
    }

    Ok(token)
}

fn unauthorized(message: impl Into<String>) -> Response {
    json_error(StatusCode::UNAUTHORIZED, message)
}
