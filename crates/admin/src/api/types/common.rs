//! Envelope and summary types shared across resources.

use exhiibot_core::{Pagination, UserId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Envelopes
// =============================================================================

/// Standard success envelope: `{ success, message, data }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Envelope for endpoints that return no payload (deletes, OTP requests).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Body of a non-2xx response. Only `message` is used.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// One page of records plus the server's pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

// =============================================================================
// Embedded summaries
// =============================================================================

/// Author summary embedded in posts, events and activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    pub profile_pic: Option<String>,
}
