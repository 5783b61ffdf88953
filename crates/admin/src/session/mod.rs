//! Signed-in staff session.
//!
//! Login is a two-step OTP flow: [`AuthSession::login`] emails a code and
//! [`AuthSession::verify_otp`] exchanges it for a token, which is persisted
//! through a [`SessionStore`] together with the user's profile. The
//! [`ApiClient`] reads the token from the same store on every request.

mod error;
mod store;

pub use error::{AuthError, SessionError};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};

use std::sync::Arc;

use exhiibot_core::{Email, OtpCode};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::api::{ApiClient, CheckEmailResponse, OtpRequested, SessionUser, VerifyOtpResponse};

/// Authentication state for one operator.
///
/// Constructed once at startup and passed to whatever needs it.
#[derive(Debug)]
pub struct AuthSession {
    client: ApiClient,
    current: RwLock<Option<SessionUser>>,
}

impl AuthSession {
    /// Create a logged-out session over the client's session store.
    ///
    /// Call [`restore`](Self::restore) to pick up a previously saved login.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            current: RwLock::new(None),
        }
    }

    fn store(&self) -> &Arc<dyn SessionStore> {
        self.client.sessions()
    }

    /// Load the saved session, if any.
    ///
    /// A corrupt value is removed and treated as logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the store cannot be read or cleared.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<Option<SessionUser>, SessionError> {
        let user = match self.store().load() {
            Ok(stored) => stored.map(|s| s.user),
            Err(SessionError::Corrupt(e)) => {
                warn!(error = %e, "Discarding corrupt stored session");
                self.store().clear()?;
                None
            }
            Err(e) => return Err(e),
        };

        *self.current.write().await = user.clone();
        Ok(user)
    }

    /// Request a login code for `email`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn login(&self, email: &Email) -> Result<OtpRequested, AuthError> {
        Ok(self.client.login(email).await?)
    }

    /// Complete login with the emailed code and persist the session.
    ///
    /// The session is saved before it becomes current, so a failed save
    /// leaves the operator logged out.
    ///
    /// # Errors
    ///
    /// Returns error if the code is rejected or the session cannot be saved.
    #[instrument(skip(self, otp), fields(email = %email))]
    pub async fn verify_otp(
        &self,
        email: &Email,
        otp: &OtpCode,
    ) -> Result<VerifyOtpResponse, AuthError> {
        let response = self.client.verify_login_otp(email, otp).await?;

        let stored = StoredSession::new(response.user.clone(), response.token.clone());
        self.store().save(&stored)?;
        *self.current.write().await = Some(response.user.clone());

        info!(user_id = %response.user.id, "Logged in");
        Ok(response)
    }

    /// Send a new login code.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn resend_otp(&self, email: &Email) -> Result<OtpRequested, AuthError> {
        Ok(self.client.resend_otp(email).await?)
    }

    /// Whether an account exists for `email`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn check_email(&self, email: &Email) -> Result<CheckEmailResponse, AuthError> {
        Ok(self.client.check_email(email).await?)
    }

    /// Forget the current user and remove the stored session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the stored session cannot be removed.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        *self.current.write().await = None;
        self.store().clear()?;
        info!("Logged out");
        Ok(())
    }

    /// The signed-in user, if any.
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Client whose requests carry this session's token.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn session_over(store: Arc<MemorySessionStore>) -> AuthSession {
        let config = ApiConfig::resolve("http://127.0.0.1:9/api/v1", "http://127.0.0.1:9").unwrap();
        AuthSession::new(ApiClient::new(&config, store).unwrap())
    }

    fn stored(token: &str) -> StoredSession {
        let user: SessionUser = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "email": "staff@exhiibot.com",
            "userName": "staff"
        }))
        .unwrap();
        StoredSession::new(user, token.to_string())
    }

    #[tokio::test]
    async fn test_restore_picks_up_saved_session() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(&stored("tok")).unwrap();

        let session = session_over(store);
        assert!(!session.is_authenticated().await);

        let user = session.restore().await.unwrap().unwrap();
        assert_eq!(user.user_name, "staff");
        assert!(session.is_authenticated().await);
        assert_eq!(session.client().bearer_token(), "tok");
    }

    #[tokio::test]
    async fn test_restore_clears_corrupt_value() {
        let store = Arc::new(MemorySessionStore::new());
        store.set_raw("{\"token\":");

        let session = session_over(store.clone());
        assert_eq!(session.client().bearer_token(), "");
        assert!(session.restore().await.unwrap().is_none());
        assert!(store.raw().is_none());
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(&stored("tok")).unwrap();

        let session = session_over(store.clone());
        session.restore().await.unwrap();
        session.logout().await.unwrap();

        assert!(!session.is_authenticated().await);
        assert!(session.current_user().await.is_none());
        assert!(store.raw().is_none());
        assert_eq!(session.client().bearer_token(), "");
    }
}
