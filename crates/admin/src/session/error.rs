//! Session error types.

use thiserror::Error;

use crate::api::ApiError;

/// Errors reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session file could not be read, written or removed.
    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value is not a valid session.
    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors from the login flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth endpoint rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be persisted or cleared.
    #[error(transparent)]
    Session(#[from] SessionError),
}
