//! Custom Axum extractors.
//!
//! - `JsonPayload`: JSON body whose rejection is rendered as a uniform
//!   `400 {"error": "Invalid or missing JSON payload"}`

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON request body.
///
/// Wraps axum's `Json` extractor so that a missing content type, malformed
/// JSON or a body of the wrong shape all produce the same client error.
///
/// # Example
///
/// ```ignore
/// async fn handler(JsonPayload(request): JsonPayload<Request>) -> OutcomeResponse {
///     state.dispatcher.dispatch(&request).await.into()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::invalid_payload())
            }
        }
    }
}
