//! Order listing. Orders have no detail endpoint.

use tracing::instrument;

use super::{ApiClient, ApiError, ApiResponse, CartOrder, CartsData, Page, Query};

impl ApiClient {
    /// List placed orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_carts(&self, page: u32, limit: u32) -> Result<Page<CartOrder>, ApiError> {
        let query = Query::new().number("page", page).number("limit", limit);
        let response: ApiResponse<CartsData> = self.get("/admin/carts", &query).await?;
        Ok(Page {
            items: response.data.carts,
            pagination: response.data.pagination,
        })
    }
}
