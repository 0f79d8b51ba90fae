//! HTTP API integration tests.
//!
//! Drive the full router with `oneshot` against a `MockStore`, checking the
//! HTTP contract: status codes, body shapes and what reaches the store.

#![allow(clippy::unwrap_used, clippy::panic)] // Integration tests can use unwrap/panic

use axum::{Router, body::Body};
use http::{Request, StatusCode, header};
use motive_core::{Entity, Filter, StoreCall, StoreResponse};
use motive_server::{AppState, build_router};
use motive_testing::{MockStore, fixtures};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app(store: &MockStore) -> Router {
    build_router(AppState::new(Arc::new(store.clone())))
}

async fn post(app: Router, path: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&MockStore::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let ready = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, body) = send(app(&MockStore::new()), ready).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ready": true, "store": true}));

    let ready = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, body) = send(app(&MockStore::failing_with("offline")), ready).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn test_dispatch_create_event() {
    let store = MockStore::with_rows(vec![fixtures::row(Entity::Event)]);
    let body = json!({
        "function": "create",
        "object_type": "event",
        "attributes": {"event_name": "Test Event", "venue_id": "venue123"}
    });

    let (status, body) = post(app(&store), "/api/dispatch", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": {"id": "123", "message": "Event creation was successful."}})
    );
    assert_eq!(store.call_count(), 1);
}

#[tokio::test]
async fn test_dispatch_without_function_is_rejected() {
    let store = MockStore::new();
    let (status, body) = post(
        app(&store),
        "/api/dispatch",
        &json!({"object_type": "event", "identifier": "123"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required field: function"}));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_json_payload() {
    let store = MockStore::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/get")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"object_type\": "))
        .unwrap();

    let (status, body) = send(app(&store), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid or missing JSON payload"}));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_attribute_never_reaches_store() {
    let store = MockStore::new();
    let (status, body) = post(
        app(&store),
        "/api/create",
        &json!({"object_type": "venue", "attributes": {"favourite_colour": "blue"}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("favourite_colour"));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_get_projection() {
    let store = MockStore::with_rows(vec![json!({"event_name": "Test Event"})]);
    let (status, body) = post(
        app(&store),
        "/api/get",
        &json!({
            "object_type": "event",
            "identifier": 123,
            "attributes": {"event_name": true, "venue_id": false}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": {"event_name": "Test Event"}}));
    assert_eq!(
        store.last_call(),
        Some(StoreCall::Select {
            table: "events",
            columns: "event_name".to_string(),
            filter: Filter::eq("event_id", "123"),
        })
    );
}

#[tokio::test]
async fn test_get_missing_record_is_not_found() {
    let store = MockStore::new();
    let (status, body) = post(
        app(&store),
        "/api/get",
        &json!({"object_type": "ticket", "identifier": "t-404"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Ticket not found"}));
}

#[tokio::test]
async fn test_update_all_null_is_rejected() {
    let store = MockStore::new();
    let (status, body) = post(
        app(&store),
        "/api/update",
        &json!({"object_type": "artist", "identifier": "artist42", "attributes": {"bio": null}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No valid attributes provided for update."}));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_delete_filters_on_account_key() {
    let store = MockStore::with_rows(vec![fixtures::row(Entity::Venue)]);
    let (status, body) = post(
        app(&store),
        "/api/delete",
        &json!({"object_type": "venue", "identifier": "venue123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Venue deletion was successful."}));
    assert_eq!(
        store.last_call(),
        Some(StoreCall::Delete {
            table: "venues",
            filter: Filter::eq("user_id", "venue123"),
        })
    );
}

#[tokio::test]
async fn test_events_for_venue_empty() {
    let store = MockStore::new();
    let (status, body) = post(
        app(&store),
        "/api/events/for-venue",
        &json!({"identifier": "venue123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": {"message": "No events found", "data": []}})
    );
}

#[tokio::test]
async fn test_events_for_venue_without_data_is_server_error() {
    let store = MockStore::without_data();
    let (status, body) = post(
        app(&store),
        "/api/events/for-venue",
        &json!({"identifier": "venue123"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Unexpected response format"}));
}

#[tokio::test]
async fn test_update_accepts_numeric_echo() {
    let store = MockStore::with_rows(vec![json!({"ticket_id": "t1", "price": 15.0})]);
    let (status, body) = post(
        app(&store),
        "/api/update",
        &json!({"object_type": "ticket", "identifier": "t1", "attributes": {"price": 15}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Ticket updated successfully."}));
}

#[tokio::test]
async fn test_cities_in_country() {
    let store = MockStore::with_rows(vec![json!({"city": "London", "country": "UK"})]);
    let (status, body) = post(
        app(&store),
        "/api/cities/in-country",
        &json!({"identifier": "UK"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["message"], "Cities found");
    assert_eq!(body["message"]["data"][0]["city"], "London");
}

#[tokio::test]
async fn test_store_exception_is_server_error() {
    let store = MockStore::failing_with("Database error");
    let (status, body) = post(
        app(&store),
        "/api/events/in-city",
        &json!({"identifier": "London"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "An exception occurred: Database error"}));
}

#[tokio::test]
async fn test_gig_workflow() {
    let store = MockStore::without_data();
    let (status, body) = post(
        app(&store),
        "/api/gigs/accept",
        &json!({"identifier": "123", "attributes": {"applicant_user_id": "artist42"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Gig application accepted."}));
    match store.last_call() {
        Some(StoreCall::Rpc { procedure, args }) => {
            assert_eq!(procedure, "accept_gig_application");
            assert_eq!(args["target_event_id"], "123");
            assert_eq!(args["applicant_user_id"], "artist42");
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_account_lookup_miss() {
    let store = MockStore::new();
    let (status, body) = post(
        app(&store),
        "/api/accounts/lookup",
        &json!({"object_type": "attendee", "identifier": "nobody@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No account found for the provided email."}));
}

#[tokio::test]
async fn test_store_error_is_bad_request() {
    let store = MockStore::reporting_error("permission denied for table tickets");
    store.push(Ok(StoreResponse::empty()));
    let (status, _) = post(
        app(&store),
        "/api/gigs/reject",
        &json!({"identifier": "123", "attributes": {"applicant_user_id": "artist42"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        app(&store),
        "/api/create",
        &json!({"object_type": "ticket", "attributes": {"event_id": "123", "price": 15}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("permission denied for table tickets")
    );
}

#[tokio::test]
async fn test_correlation_id_header_present() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(&MockStore::new()).oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-correlation-id"));
}
