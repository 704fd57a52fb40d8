//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, stock checks). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. missing or malformed required field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested or referenced record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A sale line asked for more units than are on hand.
    #[error("insufficient stock for {0}")]
    InsufficientStock(String),

    /// A sale line's unit price disagrees with the current item price.
    #[error("price mismatch for {0}")]
    PriceMismatch(String),

    /// A sale line's total is not quantity × price.
    #[error("total mismatch for {0}")]
    TotalMismatch(String),

    /// Authentication failure at the domain boundary.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn insufficient_stock(name: impl Into<String>) -> Self {
        Self::InsufficientStock(name.into())
    }

    pub fn price_mismatch(name: impl Into<String>) -> Self {
        Self::PriceMismatch(name.into())
    }

    pub fn total_mismatch(name: impl Into<String>) -> Self {
        Self::TotalMismatch(name.into())
    }
}
