//! OTP login flow. These endpoints answer without the `data` envelope.

use chrono::{DateTime, Utc};
use exhiibot_core::UserId;
use serde::{Deserialize, Serialize};

/// Response of `POST /auth/login` and `POST /auth/resend-otp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OtpRequested {
    #[serde(default)]
    pub message: String,
}

/// Response of `POST /auth/verify-login-otp`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
    #[serde(default)]
    pub profile_completed: bool,
    pub user: SessionUser,
}

impl std::fmt::Debug for VerifyOtpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyOtpResponse")
            .field("message", &self.message)
            .field("token", &"[REDACTED]")
            .field("profile_completed", &self.profile_completed)
            .field("user", &self.user)
            .finish()
    }
}

/// Response of `POST /auth/check-email`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CheckEmailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub exists: bool,
}

/// Profile of the signed-in staff member.
///
/// Unknown profile fields are kept in `extra` so they survive a save and
/// reload of the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_pic: String,
    #[serde(rename = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SessionUser {
    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        [self.name.as_str(), self.user_name.as_str()]
            .into_iter()
            .find(|n| !n.trim().is_empty())
            .unwrap_or(self.email.as_str())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailBody<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyOtpBody<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}
