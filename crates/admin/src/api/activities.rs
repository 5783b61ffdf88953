//! Activity feed.

use tracing::instrument;

use super::{ActivitiesData, Activity, ActivityFilter, ApiClient, ApiError, ApiResponse, Page, Query};

impl ApiClient {
    /// List recent platform activity.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_activities(
        &self,
        page: u32,
        limit: u32,
        filter: &ActivityFilter,
    ) -> Result<Page<Activity>, ApiError> {
        let query = Query::new()
            .number("page", page)
            .number("limit", limit)
            .text("type", filter.kind.as_deref());

        let response: ApiResponse<ActivitiesData> = self.get("/admin/activities", &query).await?;
        Ok(Page {
            items: response.data.activities,
            pagination: response.data.pagination,
        })
    }
}
