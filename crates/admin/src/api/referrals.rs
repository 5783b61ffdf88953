//! Referral application review.

use exhiibot_core::{ApplicationId, ApplicationStatus};
use tracing::instrument;

use super::{
    ApiClient, ApiError, ApiResponse, ApplicationData, ApplicationsData, MessageResponse, Page,
    Query, ReferralApplication, ReviewApplication,
};

impl ApiClient {
    /// List referral applications, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Page<ReferralApplication>, ApiError> {
        let query = Query::new().text("status", status.as_ref().map(ApplicationStatus::as_str));
        let response: ApiResponse<ApplicationsData> =
            self.get("/referral-applications/admin", &query).await?;
        let (items, pagination) = response.data.into_parts();
        Ok(Page { items, pagination })
    }

    /// Approve or reject an application.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, review), fields(application_id = %id, decision = review.status.as_str()))]
    pub async fn review_application(
        &self,
        id: &ApplicationId,
        review: &ReviewApplication,
    ) -> Result<Option<ReferralApplication>, ApiError> {
        let path = format!("/referral-applications/admin/{id}/review");
        let response: ApiResponse<Option<ApplicationData>> = self.put(&path, review).await?;
        Ok(response.data.map(|data| data.application))
    }

    /// Revoke an application and delete its referral code.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(application_id = %id))]
    pub async fn revoke_application(&self, id: &ApplicationId) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/admin/referrals/{id}")).await
    }
}
