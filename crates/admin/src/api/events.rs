//! Event moderation.

use exhiibot_core::EventId;
use tracing::instrument;

use super::{
    ApiClient, ApiError, ApiResponse, Event, EventFilter, EventsData, MessageResponse, Page, Query,
};

impl ApiClient {
    /// List events matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_events(
        &self,
        page: u32,
        limit: u32,
        filter: &EventFilter,
    ) -> Result<Page<Event>, ApiError> {
        let query = Query::new()
            .number("page", page)
            .number("limit", limit)
            .text("type", filter.kind.as_deref())
            .flag("isActive", filter.is_active);

        let response: ApiResponse<EventsData> = self.get("/admin/events", &query).await?;
        Ok(Page {
            items: response.data.events,
            pagination: response.data.pagination,
        })
    }

    /// Remove an event.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn delete_event(&self, id: &EventId) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/admin/events/{id}")).await
    }
}
