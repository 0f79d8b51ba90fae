//! Error types for web handlers.
//!
//! [`AppError`] bridges failed outcomes and extractor rejections to HTTP
//! responses. Every error renders as `{"error": "<message>"}`.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use motive_core::{FailureKind, Outcome, StoreError};
use serde::Serialize;
use std::fmt;

/// Message returned when the request body is not a JSON object.
pub const INVALID_PAYLOAD: &str = "Invalid or missing JSON payload";

/// Application error type for web handlers.
///
/// Carries the HTTP status, the user-facing message and, optionally, an
/// internal source that is logged but never sent to the client. Failed
/// outcomes caused by a store error carry that error as the source.
///
/// # Examples
///
/// ```ignore
/// let outcome = Outcome::exception(StoreError::Transport("connection reset".into()));
/// let error = AppError::try_from(outcome)?;
/// assert!(std::error::Error::source(&error).is_some());
/// ```
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
        }
    }

    /// Attach an internal source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Error for a request body that could not be parsed.
    #[must_use]
    pub fn invalid_payload() -> Self {
        Self::bad_request(INVALID_PAYLOAD)
    }

    /// Error for a failed outcome of the given kind.
    #[must_use]
    pub fn from_failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::new(status_for(kind), message)
    }

    /// Attach the store error behind a failure, if any.
    #[must_use]
    pub fn caused_by(self, cause: Option<StoreError>) -> Self {
        match cause {
            Some(cause) => self.with_source(anyhow::Error::new(cause)),
            None => self,
        }
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// HTTP status a failure kind maps to.
#[must_use]
pub const fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Validation | FailureKind::Store => StatusCode::BAD_REQUEST,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::UnexpectedFormat | FailureKind::Exception => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Successful outcomes have no error; use [`crate::OutcomeResponse`] to render
/// both sides.
impl TryFrom<Outcome> for AppError {
    type Error = Outcome;

    fn try_from(outcome: Outcome) -> Result<Self, Self::Error> {
        match outcome {
            Outcome::Failure {
                kind,
                message,
                cause,
                ..
            } => Ok(Self::from_failure(kind, message).caused_by(cause)),
            success @ Outcome::Success(_) => Err(success),
        }
    }
}
