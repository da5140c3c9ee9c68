//! Unified error handling.
//!
//! A single error type for every external call and business rule, with a
//! short user-facing message the presentation layer can show as-is.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    /// Identity provider rejected the request (bad credentials, duplicate account)
    #[error("{0}")]
    AuthRejected(String),

    // Resource errors
    /// Store reported "no matching row"
    #[error("Resource not found")]
    NotFound,

    /// Addressed table or view is not provisioned on this deployment
    #[error("Not provisioned: {0}")]
    Unavailable(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // External call errors
    #[error("{operation} timed out after {after_ms}ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[cfg(feature = "http")]
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response")]
    Decode(#[from] serde_json::Error),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::AuthRejected(_) => "AUTH_REJECTED",
            AppError::NotFound => "NOT_FOUND",
            AppError::Unavailable(_) => "UNAVAILABLE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Timeout { .. } => "TIMEOUT",
            AppError::WriteFailed(_) => "WRITE_FAILED",
            AppError::Backend(_) => "BACKEND_ERROR",
            #[cfg(feature = "http")]
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Shown verbatim
            AppError::AuthRejected(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Timeout { operation, .. } => {
                format!("{} timed out - the service may be unavailable", operation)
            }

            AppError::Unavailable(relation) => {
                tracing::warn!("Relation not provisioned: {}", relation);
                "This feature is not available yet".to_string()
            }
            AppError::WriteFailed(msg) => {
                tracing::error!("Write failed: {}", msg);
                "The change could not be saved. Please try again.".to_string()
            }
            AppError::Backend(msg) => {
                tracing::error!("Backend error: {}", msg);
                "The service returned an error. Please try again.".to_string()
            }
            #[cfg(feature = "http")]
            AppError::Http(e) => {
                tracing::error!("HTTP error: {:?}", e);
                "Could not reach the service. Please try again.".to_string()
            }
            AppError::Decode(e) => {
                tracing::error!("Decode error: {:?}", e);
                "The service returned an unexpected response".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, AppError::Unavailable(_))
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::UnknownValue { .. } => AppError::Validation(err.to_string()),
            DomainError::Forbidden => AppError::Forbidden,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn auth_rejected(msg: impl Into<String>) -> Self {
        AppError::AuthRejected(msg.into())
    }

    pub fn write_failed(msg: impl Into<String>) -> Self {
        AppError::WriteFailed(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        AppError::Backend(msg.into())
    }

    pub fn unavailable(relation: impl Into<String>) -> Self {
        AppError::Unavailable(relation.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
