use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session claims model (transport-agnostic).
///
/// This is the minimal set of claims stockbook expects once a token has been
/// decoded/verified by the transport layer. The subject is the configured
/// admin email — there is no multi-user account model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated email.
    pub sub: String,

    /// Issued-at timestamp.
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Mint claims for a freshly authenticated session.
    pub fn issue(email: impl Into<String>, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            sub: email.into(),
            issued_at: now,
            expires_at: now + ttl,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate session claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// lives in [`crate::token`].
pub fn validate_claims(
    claims: &SessionClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
