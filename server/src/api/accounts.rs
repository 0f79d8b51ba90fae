//! Account lookup.

use axum::extract::State;
use motive_core::{Dispatcher, Request};
use motive_web::{JsonPayload, OutcomeResponse};

/// Find a venue, artist or attendee by email.
///
/// # Endpoint
///
/// ```text
/// POST /api/accounts/lookup
/// {"object_type": "artist", "identifier": "someone@example.com"}
/// ```
///
/// 404 when no account has that email.
pub async fn lookup(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.lookup_account(&request).await.into()
}
