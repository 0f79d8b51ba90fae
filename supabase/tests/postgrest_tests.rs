//! Wire-level tests for the PostgREST gateway against a mock HTTP server.

#![allow(clippy::unwrap_used)] // Tests can use unwrap

use motive_core::{
    Dispatcher, Entity, Filter, Outcome, Payload, Request, StoreApiError, StoreCall, StoreError,
    StoreGateway, StoreResponse,
};
use motive_supabase::SupabaseGateway;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-service-key";

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

async fn gateway() -> (MockServer, SupabaseGateway) {
    let server = MockServer::start().await;
    let gateway = SupabaseGateway::new(&server.uri(), KEY);
    (server, gateway)
}

#[tokio::test]
async fn test_insert_posts_row_and_asks_for_representation() {
    let (server, gateway) = gateway().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/events"))
        .and(header("apikey", KEY))
        .and(header("authorization", format!("Bearer {KEY}").as_str()))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!({"event_name": "Test Event"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([{"event_id": "123", "event_name": "Test Event"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway
        .execute(StoreCall::Insert {
            table: "events",
            row: map(json!({"event_name": "Test Event"})),
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        StoreResponse::rows(vec![json!({"event_id": "123", "event_name": "Test Event"})])
    );
}

#[tokio::test]
async fn test_select_sends_columns_and_filter() {
    let (server, gateway) = gateway().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tickets"))
        .and(query_param("select", "price,status"))
        .and(query_param("ticket_id", "eq.t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"price": 15, "status": "valid"}])))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway
        .execute(StoreCall::Select {
            table: "tickets",
            columns: "price,status".to_string(),
            filter: Filter::eq("ticket_id", "t-1"),
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        StoreResponse::rows(vec![json!({"price": 15, "status": "valid"})])
    );
}

#[tokio::test]
async fn test_update_and_delete_filter_on_key() {
    let (server, gateway) = gateway().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/venues"))
        .and(query_param("user_id", "eq.venue123"))
        .and(body_json(json!({"bio": "New bio"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"user_id": "venue123", "bio": "New bio"}])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/venues"))
        .and(query_param("user_id", "eq.venue123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let updated = gateway
        .execute(StoreCall::Update {
            table: "venues",
            filter: Filter::eq("user_id", "venue123"),
            changes: map(json!({"bio": "New bio"})),
        })
        .await
        .unwrap();
    assert_eq!(
        updated,
        StoreResponse::rows(vec![json!({"user_id": "venue123", "bio": "New bio"})])
    );

    let deleted = gateway
        .execute(StoreCall::Delete {
            table: "venues",
            filter: Filter::eq("user_id", "venue123"),
        })
        .await
        .unwrap();
    assert_eq!(deleted, StoreResponse::rows(vec![]));
}

#[tokio::test]
async fn test_rpc_posts_arguments() {
    let (server, gateway) = gateway().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/get_events_in_city"))
        .and(body_json(json!({"city_name": "London"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"event_id": "123"}])))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway
        .execute(StoreCall::Rpc {
            procedure: "get_events_in_city",
            args: map(json!({"city_name": "London"})),
        })
        .await
        .unwrap();

    assert_eq!(response, StoreResponse::rows(vec![json!({"event_id": "123"})]));
}

#[tokio::test]
async fn test_empty_success_body_has_no_data() {
    let (server, gateway) = gateway().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/apply_for_gig"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let response = gateway
        .execute(StoreCall::Rpc {
            procedure: "apply_for_gig",
            args: map(json!({"target_event_id": "123", "applicant_user_id": "artist42"})),
        })
        .await
        .unwrap();

    assert_eq!(response, StoreResponse::empty());
}

#[tokio::test]
async fn test_postgrest_error_body_becomes_store_error() {
    let (server, gateway) = gateway().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/events"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "details": "Key (event_id)=(123) already exists.",
            "hint": null,
            "message": "duplicate key value violates unique constraint \"events_pkey\""
        })))
        .mount(&server)
        .await;

    let response = gateway
        .execute(StoreCall::Insert {
            table: "events",
            row: map(json!({"event_id": "123"})),
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        StoreResponse::error(StoreApiError {
            message: "duplicate key value violates unique constraint \"events_pkey\"".to_string(),
            code: Some("23505".to_string()),
            details: Some("Key (event_id)=(123) already exists.".to_string()),
            hint: None,
        })
    );
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let (server, gateway) = gateway().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let response = gateway
        .execute(StoreCall::Select {
            table: "events",
            columns: "*".to_string(),
            filter: Filter::eq("event_id", "1"),
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        StoreResponse::error(StoreApiError::new("upstream unavailable"))
    );
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let (server, gateway) = gateway().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = gateway
        .execute(StoreCall::Select {
            table: "events",
            columns: "*".to_string(),
            filter: Filter::eq("event_id", "1"),
        })
        .await;

    assert!(matches!(result, Err(StoreError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_store_is_transport_error() {
    let gateway = SupabaseGateway::new("http://127.0.0.1:1", KEY);

    let result = gateway
        .execute(StoreCall::Rpc {
            procedure: "get_events_in_city",
            args: Map::new(),
        })
        .await;
    assert!(matches!(result, Err(StoreError::Transport(_))));
    assert!(gateway.ping().await.is_err());
}

#[tokio::test]
async fn test_dispatcher_end_to_end_over_http() {
    let (server, gateway) = gateway().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/get_events_for_venue"))
        .and(body_json(json!({"venue_user_id": "venue123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::new(Arc::new(gateway));
    let outcome = dispatcher
        .events_for_venue(&Request::with_key("venue123"))
        .await;

    assert_eq!(
        outcome,
        Outcome::Success(Payload::Collection {
            message: "No events found".to_string(),
            data: vec![],
        })
    );

    let missing = dispatcher
        .get(&Request::for_entity(Entity::Event).identifier("404"))
        .await;
    assert!(!missing.is_ok());
}
