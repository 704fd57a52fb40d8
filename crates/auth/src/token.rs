//! HS256 token signing and verification.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::SessionClaims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("failed to decode token: {0}")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

/// Symmetric HS256 codec for session tokens.
///
/// Signature verification only: claim time-window checks are done separately
/// via [`crate::validate_claims`] so they stay deterministic and testable.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is validated by `validate_claims`, not by the decoder.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(TokenError::Encode)
    }

    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Decode)
    }
}
