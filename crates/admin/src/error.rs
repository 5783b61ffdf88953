//! Unified error handling for admin operations.

use exhiibot_core::{EmailError, OtpError, PriceError};
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::{AuthError, SessionError};

/// Input rejected before any request is sent.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid code: {0}")]
    Otp(#[from] OtpError),

    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    #[error("{0}")]
    Other(String),
}

/// Application-level error type for admin operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Startup configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote API call failed.
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    /// Persisted session could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Local input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A controller fetch failed; carries the message it recorded.
    #[error("{0}")]
    Remote(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operator declined a confirmation prompt.
    #[error("Cancelled")]
    Cancelled,

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the error points at a fault worth reporting to error tracking
    /// rather than operator input or a declined prompt.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        match self {
            Self::Api(e) => matches!(
                e,
                ApiError::Http(_) | ApiError::Parse(_) | ApiError::Api { status: 500.., .. }
            ),
            Self::Session(SessionError::Io(_)) | Self::Internal(_) => true,
            Self::Config(_)
            | Self::Session(SessionError::Corrupt(_))
            | Self::Validation(_)
            | Self::Remote(_)
            | Self::NotFound(_)
            | Self::Output(_)
            | Self::Cancelled => false,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Api(e) => Self::Api(e),
            AuthError::Session(e) => Self::Session(e),
        }
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<PriceError> for AppError {
    fn from(err: PriceError) -> Self {
        Self::Validation(err.into())
    }
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = AppError::from(ApiError::Api {
            status: 409,
            message: "Product already exists".to_string(),
        });
        assert_eq!(err.to_string(), "Product already exists");
        assert!(!err.is_reportable());
    }

    #[test]
    fn test_reportable_errors() {
        assert!(
            AppError::from(ApiError::Api {
                status: 502,
                message: "Bad gateway".to_string(),
            })
            .is_reportable()
        );
        assert!(!AppError::Cancelled.is_reportable());
        assert!(!AppError::from(EmailError::Empty).is_reportable());
        assert!(
            !AppError::from(ApiError::Unauthorized("Token expired".to_string())).is_reportable()
        );
    }
}
