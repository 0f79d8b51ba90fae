//! Rendering outcomes as HTTP responses.

use crate::error::AppError;
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use motive_core::Outcome;
use serde_json::json;

/// An [`Outcome`] ready to be returned from a handler.
///
/// Success renders as `200 {"message": <payload>}`; failure goes through
/// [`AppError`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeResponse(pub Outcome);

impl From<Outcome> for OutcomeResponse {
    fn from(outcome: Outcome) -> Self {
        Self(outcome)
    }
}

impl IntoResponse for OutcomeResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Outcome::Success(payload) => (
                StatusCode::OK,
                Json(json!({ "message": payload })),
            )
                .into_response(),
            Outcome::Failure {
                kind,
                message,
                cause,
                ..
            } => {
                tracing::debug!(kind = kind.as_str(), %message, "Request failed");
                AppError::from_failure(kind, message)
                    .caused_by(cause)
                    .into_response()
            }
        }
    }
}
