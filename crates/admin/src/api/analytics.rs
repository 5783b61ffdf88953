//! Platform analytics.

use tracing::instrument;

use super::{ApiClient, ApiError, ApiResponse, DateRange, PlatformAnalytics, Query};

/// Wire format of `startDate`/`endDate`.
const DATE_FORMAT: &str = "%Y-%m-%d";

impl ApiClient {
    /// Engagement totals and breakdowns for `range`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_analytics(&self, range: &DateRange) -> Result<PlatformAnalytics, ApiError> {
        let start = range.start.map(|d| d.format(DATE_FORMAT).to_string());
        let end = range.end.map(|d| d.format(DATE_FORMAT).to_string());
        let query = Query::new()
            .text("startDate", start.as_deref())
            .text("endDate", end.as_deref());

        let response: ApiResponse<PlatformAnalytics> =
            self.get("/admin/analytics", &query).await?;
        Ok(response.data)
    }
}
