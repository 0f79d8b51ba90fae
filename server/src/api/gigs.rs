//! Gig application workflow.
//!
//! ```text
//! POST /api/gigs/apply
//! {"identifier": "<event id>", "attributes": {"applicant_user_id": "<artist id>"}}
//! ```

use axum::extract::State;
use motive_core::{Dispatcher, GigAction, Request};
use motive_web::{JsonPayload, OutcomeResponse};

/// `POST /api/gigs/apply`
pub async fn apply(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.gig(GigAction::Apply, &request).await.into()
}

/// `POST /api/gigs/accept`
pub async fn accept(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.gig(GigAction::Accept, &request).await.into()
}

/// `POST /api/gigs/reject`
pub async fn reject(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    dispatcher.gig(GigAction::Reject, &request).await.into()
}
