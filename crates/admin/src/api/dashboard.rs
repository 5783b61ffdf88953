use tracing::instrument;

use super::{ApiClient, ApiError, ApiResponse, DashboardData, Query};

impl ApiClient {
    /// Headline counters plus recent sign-ups and activity.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_dashboard(&self) -> Result<DashboardData, ApiError> {
        let response: ApiResponse<DashboardData> =
            self.get("/admin/dashboard", &Query::new()).await?;
        Ok(response.data)
    }
}
