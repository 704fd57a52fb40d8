//! `stockbook-auth` — authentication boundary for the single-tenant API.
//!
//! This crate is intentionally decoupled from HTTP and storage: it models the
//! session claims, validates them deterministically, signs/verifies HS256
//! tokens, and checks the one configuration-supplied admin credential.

pub mod claims;
pub mod credentials;
pub mod token;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use credentials::AdminCredentials;
pub use token::{Hs256TokenCodec, TokenError};
