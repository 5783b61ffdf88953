//! User management operations.

use exhiibot_core::UserId;
use tracing::instrument;

use super::{
    ApiClient, ApiError, ApiResponse, MessageResponse, Page, Query, UpdateUser, User, UserData,
    UserFilter, UsersData,
};

impl ApiClient {
    /// List users matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        page: u32,
        limit: u32,
        filter: &UserFilter,
    ) -> Result<Page<User>, ApiError> {
        let query = Query::new()
            .number("page", page)
            .number("limit", limit)
            .text("search", filter.search.as_deref())
            .flag("isActive", filter.is_active)
            .flag("isCompleted", filter.is_completed);

        let response: ApiResponse<UsersData> = self.get("/admin/users", &query).await?;
        Ok(Page {
            items: response.data.users,
            pagination: response.data.pagination,
        })
    }

    /// Get a single user by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the user does not exist.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &UserId) -> Result<User, ApiError> {
        let path = format!("/admin/users/{id}");
        let response: ApiResponse<UserData> = self.get(&path, &Query::new()).await?;
        Ok(response.data.user)
    }

    /// Update profile fields and flags of a user.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, update), fields(user_id = %id))]
    pub async fn update_user(&self, id: &UserId, update: &UpdateUser) -> Result<User, ApiError> {
        let path = format!("/admin/users/{id}");
        let response: ApiResponse<UserData> = self.put(&path, update).await?;
        Ok(response.data.user)
    }

    /// Flip a user's active flag.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn toggle_user_status(&self, id: &UserId) -> Result<User, ApiError> {
        let path = format!("/admin/users/{id}/toggle-status");
        let response: ApiResponse<UserData> = self.patch(&path).await?;
        Ok(response.data.user)
    }

    /// Permanently delete a user.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/admin/users/{id}")).await
    }
}
