//! REST client for the platform's admin API.
//!
//! Every call is independent: the bearer token is read from the
//! [`SessionStore`] at request time, so logging in or out takes effect on the
//! next request without rebuilding the client.
//!
//! # Response format
//!
//! Admin endpoints answer `{ success, message, data }`. Non-2xx responses
//! carry a `message` field that becomes the error text; when it is missing
//! the error reads `Request failed with status <code>`.
//!
//! # Authentication
//!
//! `Authorization: Bearer <token>` is attached to every admin request. A
//! missing or unreadable session yields an empty token rather than an error,
//! and the server's 401 then surfaces as [`ApiError::Unauthorized`]. The
//! `/auth/*` endpoints are sent without a token.

mod activities;
mod analytics;
mod auth;
mod carts;
mod dashboard;
mod events;
mod posts;
mod products;
mod referrals;
mod users;
pub mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::config::ApiConfig;
use crate::session::SessionStore;

/// Errors that can occur when calling the admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Missing, expired or insufficient credentials (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Text shown to the operator, as stored in a controller's `error`.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) | Self::NotFound(message) => {
                message.clone()
            }
            Self::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            Self::Http(e) if e.is_connect() => "Could not reach the server".to_string(),
            Self::Http(e) => format!("Network error: {e}"),
            Self::Parse(_) => "Unexpected response from the server".to_string(),
            Self::InvalidUrl(url) => format!("Invalid request URL: {url}"),
        }
    }

    /// HTTP status of the failed response, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::Http(_) | Self::Parse(_) | Self::InvalidUrl(_) => None,
        }
    }

    fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let code = status.as_u16();
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {code}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Api {
                status: code,
                message,
            },
        }
    }
}

/// Query string builder that drops unset parameters.
///
/// Numbers are sent only when non-zero, text only when non-empty and flags
/// only when `Some`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Query(Vec<(&'static str, String)>);

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn number(mut self, key: &'static str, value: u32) -> Self {
        if value != 0 {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn flag(mut self, key: &'static str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.0.push((key, value.to_string()));
        }
        self
    }

    fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Admin API client.
///
/// Cheap to clone; clones share the connection pool and session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    sessions: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig, sessions: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: builder.build()?,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                sessions,
            }),
        })
    }

    /// Resolved base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Session store the bearer token is read from.
    #[must_use]
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.inner.sessions
    }

    /// Current bearer token, or an empty string when none can be read.
    #[must_use]
    pub fn bearer_token(&self) -> String {
        match self.inner.sessions.load() {
            Ok(Some(session)) => session.token,
            Ok(None) => String::new(),
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable; sending empty token");
                String::new()
            }
        }
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidUrl(path.to_string()));
        }
        Ok(format!("{}{path}", self.inner.base_url))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        Ok(self
            .inner
            .client
            .request(method, url)
            .bearer_auth(self.bearer_token()))
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::GET, path)?
            .query(query.pairs())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PATCH request without a body.
    pub(crate) async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path)?.send().await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request.
    ///
    /// An empty success body (e.g. 204) yields a default [`MessageResponse`].
    pub(crate) async fn delete(&self, path: &str) -> Result<MessageResponse, ApiError> {
        let response = self.request(Method::DELETE, path)?.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::parse_error(response).await);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(MessageResponse::default());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Execute an unauthenticated POST (the `/auth/*` endpoints).
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Turn a non-2xx response into an [`ApiError`] carrying the server's message.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let message = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<types::common::ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message),
            Err(e) => {
                warn!(error = %e, status = status.as_u16(), "Failed to read error body");
                None
            }
        };
        ApiError::from_status(status, message)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
