//! Entity-generic CRUD endpoints.

use axum::extract::State;
use motive_core::{Dispatcher, Function, Request};
use motive_web::{JsonPayload, OutcomeResponse};

/// Run the operation named by the body's own `function` field.
///
/// # Endpoint
///
/// ```text
/// POST /api/dispatch
/// {"function": "get", "object_type": "event", "identifier": "123",
///  "attributes": {"event_name": true}}
/// ```
pub async fn dispatch(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.dispatch(&request).await.into()
}

/// `POST /api/create`
pub async fn create(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.run(Function::Create, &request).await.into()
}

/// `POST /api/update`
pub async fn update(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.run(Function::Update, &request).await.into()
}

/// `POST /api/delete`
pub async fn delete(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.run(Function::Delete, &request).await.into()
}

/// `POST /api/get`
pub async fn get(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.run(Function::Get, &request).await.into()
}
