//! OTP login, session persistence and bearer tokens.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use exhiibot_admin::AuthSession;
use exhiibot_admin::api::UserFilter;
use exhiibot_admin::session::{AuthError, MemorySessionStore, SessionStore};
use exhiibot_core::{Email, OtpCode};
use exhiibot_integration_tests::{StubApi, envelope, pagination};
use serde_json::{Value, json};

fn auth_routes() -> Router {
    Router::new()
        .route(
            "/auth/login",
            post(|| async { Json(json!({ "message": "OTP sent to your email" })) }),
        )
        .route(
            "/auth/verify-login-otp",
            post(|Json(body): Json<Value>| async move {
                if body["otp"] == "1234" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "message": "Login successful",
                            "token": "tok-abc",
                            "profileCompleted": true,
                            "user": {
                                "_id": "admin1",
                                "email": body["email"],
                                "userName": "ops",
                                "name": "Ops Lead",
                                "role": "admin",
                            },
                        })),
                    )
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "message": "Invalid or expired OTP" })),
                    )
                }
            }),
        )
        .route(
            "/auth/check-email",
            post(|| async { Json(json!({ "success": true, "exists": true })) }),
        )
        .route(
            "/admin/users",
            get(|| async { Json(envelope(json!({ "users": [], "pagination": pagination(0, 1, 20) }))) }),
        )
}

#[tokio::test]
async fn test_login_round_trip_persists_session() {
    let stub = StubApi::start(auth_routes()).await;
    let store = Arc::new(MemorySessionStore::new());
    let client = stub.client(store.clone());
    let session = AuthSession::new(client.clone());
    let email = Email::parse("ops@exhiibot.com").unwrap();

    let requested = session.login(&email).await.unwrap();
    assert_eq!(requested.message, "OTP sent to your email");
    let login = stub.last_request_to("/auth/login").unwrap();
    assert!(login.authorization.is_none());

    let response = session
        .verify_otp(&email, &OtpCode::parse("1234").unwrap())
        .await
        .unwrap();
    assert_eq!(response.token, "tok-abc");
    assert!(session.is_authenticated().await);
    assert_eq!(session.current_user().await.unwrap().display_name(), "Ops Lead");

    let stored: Value = serde_json::from_str(&store.raw().unwrap()).unwrap();
    assert_eq!(stored["token"], "tok-abc");
    assert_eq!(stored["_id"], "admin1");
    assert_eq!(stored["email"], "ops@exhiibot.com");
    assert_eq!(stored["role"], "admin");

    client.list_users(1, 20, &UserFilter::default()).await.unwrap();
    let request = stub.last_request_to("/admin/users").unwrap();
    assert_eq!(request.authorization.as_deref(), Some("Bearer tok-abc"));

    // A fresh session over the same store picks the login back up.
    let restored = AuthSession::new(client);
    let user = restored.restore().await.unwrap().unwrap();
    assert_eq!(user.user_name, "ops");
    assert!(restored.is_authenticated().await);
}

#[tokio::test]
async fn test_rejected_code_leaves_session_empty() {
    let stub = StubApi::start(auth_routes()).await;
    let store = Arc::new(MemorySessionStore::new());
    let session = AuthSession::new(stub.client(store.clone()));
    let email = Email::parse("ops@exhiibot.com").unwrap();

    let err = session
        .verify_otp(&email, &OtpCode::parse("0000").unwrap())
        .await
        .unwrap_err();
    let AuthError::Api(err) = err else {
        panic!("expected an API error, got {err:?}");
    };
    assert_eq!(err.user_message(), "Invalid or expired OTP");
    assert!(!session.is_authenticated().await);
    assert!(store.raw().is_none());
}

#[tokio::test]
async fn test_logout_clears_store() {
    let stub = StubApi::start(auth_routes()).await;
    let store = Arc::new(MemorySessionStore::new());
    let client = stub.client(store.clone());
    let session = AuthSession::new(client.clone());
    let email = Email::parse("ops@exhiibot.com").unwrap();

    session
        .verify_otp(&email, &OtpCode::parse("1234").unwrap())
        .await
        .unwrap();
    session.logout().await.unwrap();

    assert!(!session.is_authenticated().await);
    assert!(session.current_user().await.is_none());
    assert!(store.load().unwrap().is_none());

    client.list_users(1, 20, &UserFilter::default()).await.unwrap();
    let request = stub.last_request_to("/admin/users").unwrap();
    assert_eq!(request.authorization.as_deref().map(str::trim), Some("Bearer"));
}

#[tokio::test]
async fn test_corrupt_session_sends_empty_bearer() {
    let stub = StubApi::start(auth_routes()).await;
    let store = Arc::new(MemorySessionStore::new());
    store.set_raw("{not json");
    let client = stub.client(store.clone());

    client.list_users(1, 20, &UserFilter::default()).await.unwrap();
    let request = stub.last_request_to("/admin/users").unwrap();
    assert_eq!(request.authorization.as_deref().map(str::trim), Some("Bearer"));

    let session = AuthSession::new(client);
    assert!(session.restore().await.unwrap().is_none());
    assert!(store.raw().is_none());
}

#[tokio::test]
async fn test_check_email() {
    let stub = StubApi::start(auth_routes()).await;
    let session = AuthSession::new(stub.anonymous_client());

    let response = session
        .check_email(&Email::parse("ops@exhiibot.com").unwrap())
        .await
        .unwrap();
    assert!(response.exists);
}
