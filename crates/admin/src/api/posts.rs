//! Post moderation.

use exhiibot_core::PostId;
use tracing::instrument;

use super::{ApiClient, ApiError, ApiResponse, MessageResponse, Page, Post, PostFilter, PostsData, Query};

impl ApiClient {
    /// List posts matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        page: u32,
        limit: u32,
        filter: &PostFilter,
    ) -> Result<Page<Post>, ApiError> {
        let query = Query::new()
            .number("page", page)
            .number("limit", limit)
            .text("platform", filter.platform.as_deref())
            .flag("isPublished", filter.is_published);

        let response: ApiResponse<PostsData> = self.get("/admin/posts", &query).await?;
        Ok(Page {
            items: response.data.posts,
            pagination: response.data.pagination,
        })
    }

    /// Remove a post.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn delete_post(&self, id: &PostId) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/admin/posts/{id}")).await
    }
}
