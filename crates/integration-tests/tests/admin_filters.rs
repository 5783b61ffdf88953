//! Filter setters and product edits against the stub API.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query};
use axum::routing::{get, put};
use axum::{Json, Router};
use exhiibot_admin::api::{ProductUpdate, UserFilter};
use exhiibot_admin::listing::FetchOutcome;
use exhiibot_admin::resources::{
    ActivityList, ActivitySource, EventList, EventSource, ProductList, ProductSource, UserList,
    UserSource,
};
use exhiibot_core::ProductId;
use exhiibot_integration_tests::{RecordedRequest, StubApi, envelope, pagination, user_json};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn requested_page(params: &HashMap<String, String>) -> u64 {
    params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1)
}

fn event_json(id: &str) -> Value {
    json!({
        "_id": id,
        "title": "Launch night",
        "type": "party",
        "startDate": "2024-05-01T18:00:00Z",
        "endDate": "2024-05-01T23:00:00Z",
        "isActive": true,
        "created_at": "2024-04-01T12:00:00Z",
    })
}

fn routes() -> Router {
    Router::new()
        .route(
            "/admin/users",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let page = requested_page(&params);
                Json(envelope(json!({
                    "users": [user_json("u1", "ada")],
                    "pagination": pagination(60, page, 20),
                })))
            }),
        )
        .route(
            "/admin/events",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let page = requested_page(&params);
                Json(envelope(json!({
                    "events": [event_json("e1")],
                    "pagination": pagination(60, page, 20),
                })))
            }),
        )
        .route(
            "/admin/activities",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let page = requested_page(&params);
                Json(envelope(json!({
                    "activities": [{
                        "_id": "act1",
                        "type": "bracelet_tap",
                        "description": "Tapped a bracelet",
                        "created_at": "2024-04-01T12:00:00Z",
                    }],
                    "pagination": pagination(60, page, 20),
                })))
            }),
        )
        .route(
            "/admin/products",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let page = requested_page(&params);
                Json(envelope(json!({
                    "products": [{ "_id": "p1", "productName": "Glow", "productPrice": "49999" }],
                    "pagination": pagination(60, page, 20),
                })))
            }),
        )
}

fn param<'a>(request: &'a RecordedRequest, name: &str) -> Option<&'a str> {
    request.query.get(name).map(String::as_str)
}

#[tokio::test]
async fn test_filter_users_resets_page_and_sends_flags() {
    let stub = StubApi::start(routes()).await;
    let users = UserList::new(UserSource::new(stub.anonymous_client()));

    users.change_page(3).await;
    assert_eq!(users.snapshot().await.pagination.page, 3);

    assert_eq!(users.filter_users(Some(false), Some(true)).await, FetchOutcome::Applied);
    let query = users.query().await;
    assert_eq!(query.page, 1);
    assert_eq!(
        query.filter,
        UserFilter {
            search: None,
            is_active: Some(false),
            is_completed: Some(true),
        }
    );
    assert_eq!(users.snapshot().await.pagination.page, 1);

    let request = stub.last_request_to("/admin/users").unwrap();
    assert_eq!(param(&request, "page"), Some("1"));
    assert_eq!(param(&request, "isActive"), Some("false"));
    assert_eq!(param(&request, "isCompleted"), Some("true"));
}

#[tokio::test]
async fn test_filter_users_keeps_search_term() {
    let stub = StubApi::start(routes()).await;
    let users = UserList::new(UserSource::new(stub.anonymous_client()));

    users.search_users("ada").await;
    users.filter_users(Some(true), None).await;

    let request = stub.last_request_to("/admin/users").unwrap();
    assert_eq!(param(&request, "search"), Some("ada"));
    assert_eq!(param(&request, "isActive"), Some("true"));
    assert_eq!(param(&request, "isCompleted"), None);
}

#[tokio::test]
async fn test_filter_events_resets_page_and_sends_type() {
    let stub = StubApi::start(routes()).await;
    let events = EventList::new(EventSource::new(stub.anonymous_client()));

    events.change_page(2).await;
    assert_eq!(
        events.filter_events(Some("party".to_string()), Some(true)).await,
        FetchOutcome::Applied
    );

    assert_eq!(events.query().await.page, 1);
    let state = events.snapshot().await;
    assert_eq!(state.pagination.page, 1);
    assert_eq!(state.items.len(), 1);

    let request = stub.last_request_to("/admin/events").unwrap();
    assert_eq!(param(&request, "page"), Some("1"));
    assert_eq!(param(&request, "type"), Some("party"));
    assert_eq!(param(&request, "isActive"), Some("true"));
}

#[tokio::test]
async fn test_filter_activities_resets_page_and_clears_type() {
    let stub = StubApi::start(routes()).await;
    let feed = ActivityList::new(ActivitySource::new(stub.anonymous_client()));

    feed.change_page(4).await;
    feed.filter_activities(Some("bracelet_tap".to_string())).await;
    assert_eq!(feed.query().await.page, 1);
    let request = stub.last_request_to("/admin/activities").unwrap();
    assert_eq!(param(&request, "page"), Some("1"));
    assert_eq!(param(&request, "type"), Some("bracelet_tap"));

    feed.filter_activities(None).await;
    let request = stub.last_request_to("/admin/activities").unwrap();
    assert_eq!(param(&request, "type"), None);
}

#[tokio::test]
async fn test_search_products_resets_page() {
    let stub = StubApi::start(routes()).await;
    let products = ProductList::new(ProductSource::new(stub.anonymous_client()));

    products.change_page(3).await;
    assert_eq!(products.search_products("glow").await, FetchOutcome::Applied);
    assert_eq!(products.query().await.page, 1);

    let state = products.snapshot().await;
    assert_eq!(state.pagination.page, 1);
    assert_eq!(state.items[0].price().unwrap().to_string(), "₦49,999.00");

    let request = stub.last_request_to("/admin/products").unwrap();
    assert_eq!(param(&request, "page"), Some("1"));
    assert_eq!(param(&request, "search"), Some("glow"));

    products.search_products("").await;
    let request = stub.last_request_to("/admin/products").unwrap();
    assert_eq!(param(&request, "search"), None);
}

#[tokio::test]
async fn test_update_product_sends_only_set_fields() {
    let received = Arc::new(Mutex::new(Value::Null));
    let body_slot = received.clone();
    let stub = StubApi::start(Router::new().route(
        "/admin/products/{id}",
        put(move |Path(id): Path<String>, Json(body): Json<Value>| {
            let body_slot = body_slot.clone();
            async move {
                *body_slot.lock().unwrap() = body;
                Json(envelope(json!({
                    "product": { "_id": id, "productName": "Glow", "productPrice": 52000 },
                })))
            }
        }),
    ))
    .await;

    let updated = stub
        .anonymous_client()
        .update_product(&ProductId::new("p1"), &ProductUpdate {
            product_price: Some(Decimal::new(52000, 0)),
            ..ProductUpdate::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.id, ProductId::new("p1"));
    assert_eq!(updated.price().unwrap().to_string(), "₦52,000.00");
    assert_eq!(*received.lock().unwrap(), json!({ "productPrice": 52000.0 }));
    assert_eq!(stub.last_request_to("/admin/products/p1").unwrap().method, "PUT");
}
