//! OTP login endpoints. Sent without a bearer token.

use exhiibot_core::{Email, OtpCode};
use tracing::instrument;

use super::types::auth::{EmailBody, VerifyOtpBody};
use super::{ApiClient, ApiError, CheckEmailResponse, OtpRequested, VerifyOtpResponse};

impl ApiClient {
    /// Ask the server to email a one-time login code.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn login(&self, email: &Email) -> Result<OtpRequested, ApiError> {
        self.post_public("/auth/login", &EmailBody {
            email: email.as_str(),
        })
        .await
    }

    /// Exchange an emailed code for a session token.
    ///
    /// # Errors
    ///
    /// Returns error if the code is rejected or the API request fails.
    #[instrument(skip(self, otp), fields(email = %email))]
    pub async fn verify_login_otp(
        &self,
        email: &Email,
        otp: &OtpCode,
    ) -> Result<VerifyOtpResponse, ApiError> {
        self.post_public("/auth/verify-login-otp", &VerifyOtpBody {
            email: email.as_str(),
            otp: otp.as_str(),
        })
        .await
    }

    /// Send a fresh login code.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn resend_otp(&self, email: &Email) -> Result<OtpRequested, ApiError> {
        self.post_public("/auth/resend-otp", &EmailBody {
            email: email.as_str(),
        })
        .await
    }

    /// Whether an account exists for `email`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn check_email(&self, email: &Email) -> Result<CheckEmailResponse, ApiError> {
        self.post_public("/auth/check-email", &EmailBody {
            email: email.as_str(),
        })
        .await
    }
}
