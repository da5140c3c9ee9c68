//! Marketplace rule violations.
//!
//! Raised while parsing or validating domain values; nothing here knows
//! about the platform or the network.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected; the message is shown to the user as-is
    #[error("Validation error: {0}")]
    Validation(String),

    /// Text outside a closed vocabulary (role, status, membership)
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Forbidden")]
    Forbidden,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
