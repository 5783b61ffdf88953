//! Integration tests for the Exhiibot admin client.
//!
//! Each test starts an in-process stub of the platform API on a random
//! local port and drives the real `ApiClient` against it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p exhiibot-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use exhiibot_admin::ApiClient;
use exhiibot_admin::config::ApiConfig;
use exhiibot_admin::session::{MemorySessionStore, SessionStore};
use serde_json::{Value, json};

/// Path prefix the stub mounts its routes under.
pub const API_PREFIX: &str = "/api/v1";

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

type Log = Arc<Mutex<Vec<RecordedRequest>>>;

/// A running stub API.
pub struct StubApi {
    addr: SocketAddr,
    log: Log,
}

impl StubApi {
    /// Serve `routes` under [`API_PREFIX`], recording every request.
    pub async fn start(routes: Router) -> Self {
        let log = Log::default();
        let app = Router::new()
            .nest(API_PREFIX, routes)
            .layer(middleware::from_fn_with_state(log.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Stub has no local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub server failed");
        });

        Self { addr, log }
    }

    /// Origin of the stub, e.g. `http://127.0.0.1:4312`.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// API configuration using a relative base URL resolved against the stub.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::resolve(API_PREFIX, &self.origin()).expect("Stub URL is valid")
    }

    /// Client backed by `store`.
    #[must_use]
    pub fn client(&self, store: Arc<MemorySessionStore>) -> ApiClient {
        let store: Arc<dyn SessionStore> = store;
        ApiClient::new(&self.api_config(), store).expect("Failed to build client")
    }

    /// Client with an empty session store.
    #[must_use]
    pub fn anonymous_client(&self) -> ApiClient {
        self.client(Arc::new(MemorySessionStore::new()))
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    /// The most recent request to `path` (relative to [`API_PREFIX`]).
    #[must_use]
    pub fn last_request_to(&self, path: &str) -> Option<RecordedRequest> {
        let full = format!("{API_PREFIX}{path}");
        self.requests().into_iter().rev().find(|r| r.path == full)
    }
}

async fn record(State(log): State<Log>, request: Request, next: Next) -> Response {
    let query = request
        .uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    log.lock().unwrap().push(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query,
        authorization,
    });

    next.run(request).await
}

// =============================================================================
// Fixtures
// =============================================================================

/// Wrap `data` in the platform's success envelope.
#[must_use]
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "message": "OK", "data": data })
}

/// Pagination block as the API returns it.
#[must_use]
pub fn pagination(total: u64, page: u64, limit: u64) -> Value {
    json!({
        "total": total,
        "page": page,
        "limit": limit,
        "pages": total.div_ceil(limit.max(1)),
    })
}

/// A minimal user record.
#[must_use]
pub fn user_json(id: &str, user_name: &str) -> Value {
    json!({
        "_id": id,
        "userName": user_name,
        "role": "user",
        "isCompleted": true,
        "isActive": true,
        "email": format!("{user_name}@example.com"),
        "followers": [],
        "following": [],
        "created_at": "2024-03-01T12:00:00Z",
    })
}

/// A minimal referral application record.
#[must_use]
pub fn application_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "fullName": "Dana Reyes",
        "platform": "instagram",
        "socialMediaHandle": "@dana",
        "status": status,
        "created_at": "2024-03-01T12:00:00Z",
    })
}
