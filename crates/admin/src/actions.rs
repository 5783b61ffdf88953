//! Confirmation-gated destructive operations.
//!
//! A [`PendingAction`] describes what would happen. Only a
//! [`ConfirmedAction`], obtained by calling [`PendingAction::confirm`], can be
//! executed, so every irreversible request passes through an explicit
//! confirmation step.

use exhiibot_core::{ApplicationId, EventId, PostId, ProductId, UserId};
use tracing::{info, instrument};

use crate::api::{ApiClient, ApiError, MessageResponse};

/// A destructive operation awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteUser(UserId),
    DeletePost(PostId),
    DeleteEvent(EventId),
    DeleteProduct(ProductId),
    /// Delete a referral application together with its code.
    RevokeApplication(ApplicationId),
}

impl PendingAction {
    /// Short machine-readable name, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DeleteUser(_) => "delete_user",
            Self::DeletePost(_) => "delete_post",
            Self::DeleteEvent(_) => "delete_event",
            Self::DeleteProduct(_) => "delete_product",
            Self::RevokeApplication(_) => "revoke_application",
        }
    }

    /// Target record ID.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::DeleteUser(id) => id.as_str(),
            Self::DeletePost(id) => id.as_str(),
            Self::DeleteEvent(id) => id.as_str(),
            Self::DeleteProduct(id) => id.as_str(),
            Self::RevokeApplication(id) => id.as_str(),
        }
    }

    /// Sentence shown when asking for confirmation.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::DeleteUser(id) => {
                format!("Permanently delete user {id}? This cannot be undone.")
            }
            Self::DeletePost(id) => format!("Delete post {id}? This cannot be undone."),
            Self::DeleteEvent(id) => format!("Delete event {id}? This cannot be undone."),
            Self::DeleteProduct(id) => format!("Delete product {id}? This cannot be undone."),
            Self::RevokeApplication(id) => format!(
                "Revoke referral application {id}? Its referral code will stop working."
            ),
        }
    }

    /// Mark the action as confirmed by the operator.
    #[must_use]
    pub fn confirm(self) -> ConfirmedAction {
        ConfirmedAction(self)
    }
}

impl std::fmt::Display for PendingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.target())
    }
}

/// A destructive operation the operator has agreed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedAction(PendingAction);

impl ConfirmedAction {
    #[must_use]
    pub const fn action(&self) -> &PendingAction {
        &self.0
    }

    /// Send the request.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, client), fields(action = self.0.kind(), target = self.0.target()))]
    pub async fn execute(self, client: &ApiClient) -> Result<MessageResponse, ApiError> {
        let response = match &self.0 {
            PendingAction::DeleteUser(id) => client.delete_user(id).await?,
            PendingAction::DeletePost(id) => client.delete_post(id).await?,
            PendingAction::DeleteEvent(id) => client.delete_event(id).await?,
            PendingAction::DeleteProduct(id) => client.delete_product(id).await?,
            PendingAction::RevokeApplication(id) => client.revoke_application(id).await?,
        };
        info!(action = self.0.kind(), target = self.0.target(), "Action executed");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_names_target() {
        let action = PendingAction::DeletePost(PostId::new("p-77"));
        assert!(action.describe().contains("p-77"));
        assert_eq!(action.to_string(), "delete_post p-77");

        let revoke = PendingAction::RevokeApplication(ApplicationId::new("a1"));
        assert!(revoke.describe().contains("referral code"));
    }

    #[test]
    fn test_confirm_keeps_action() {
        let action = PendingAction::DeleteUser(UserId::new("u1"));
        let confirmed = action.clone().confirm();
        assert_eq!(confirmed.action(), &action);
    }
}
