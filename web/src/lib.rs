//! Axum integration for the Motive events service.
//!
//! The dispatcher in `motive-core` produces an [`Outcome`](motive_core::Outcome)
//! for every request; this crate is the thin shell that turns HTTP into
//! dispatcher calls and outcomes back into HTTP.
//!
//! # Request Flow
//!
//! 1. **Tag** the request with a correlation id ([`correlation_id_layer`])
//! 2. **Extract** the JSON body ([`JsonPayload`]); malformed bodies are
//!    rejected with `400 {"error": "Invalid or missing JSON payload"}`
//! 3. **Dispatch** through the `Dispatcher`
//! 4. **Render** the outcome ([`OutcomeResponse`]): `200 {"message": ...}` or
//!    `{"error": ...}` with a status chosen by failure kind
//!
//! # Example
//!
//! ```ignore
//! use motive_web::{JsonPayload, OutcomeResponse};
//!
//! async fn dispatch(
//!     State(state): State<AppState>,
//!     JsonPayload(request): JsonPayload<Request>,
//! ) -> OutcomeResponse {
//!     state.dispatcher.dispatch(&request).await.into()
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use error::{AppError, INVALID_PAYLOAD, status_for};
pub use extractors::JsonPayload;
pub use middleware::{
    CORRELATION_ID_HEADER, CorrelationId, CorrelationIdExt, correlation_id_layer,
};
pub use response::OutcomeResponse;
