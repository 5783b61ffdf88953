//! Product catalogue management.

use exhiibot_core::ProductId;
use tracing::instrument;

use super::{
    ApiClient, ApiError, ApiResponse, MessageResponse, NewProduct, Page, Product, ProductData,
    ProductFilter, ProductUpdate, ProductsData, Query,
};

impl ApiClient {
    /// List products, optionally filtered by a search term.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u32,
        limit: u32,
        filter: &ProductFilter,
    ) -> Result<Page<Product>, ApiError> {
        let query = Query::new()
            .number("page", page)
            .number("limit", limit)
            .text("search", filter.search.as_deref());

        let response: ApiResponse<ProductsData> = self.get("/admin/products", &query).await?;
        Ok(Page {
            items: response.data.products,
            pagination: response.data.pagination,
        })
    }

    /// Add a product to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, product), fields(name = %product.product_name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let response: ApiResponse<ProductData> = self.post("/admin/products", product).await?;
        Ok(response.data.product)
    }

    /// Change fields of an existing product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        let path = format!("/admin/products/{id}");
        let response: ApiResponse<ProductData> = self.put(&path, update).await?;
        Ok(response.data.product)
    }

    /// Remove a product from the catalogue.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/admin/products/{id}")).await
    }
}
