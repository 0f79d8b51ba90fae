//! The uniform result of every operation.
//!
//! Whatever shape the store answered with, handlers only ever see an
//! [`Outcome`]: either a [`Payload`] to return to the caller, or a failure
//! tagged with a [`FailureKind`] and a user-facing message.

use crate::gateway::StoreError;
use crate::validation::ValidationError;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

/// Marker prefixed to every message produced from a gateway exception.
pub const EXCEPTION_MARKER: &str = "An exception occurred";

/// Message used when the store answers with nothing this layer can read.
pub const UNEXPECTED_FORMAT: &str = "Unexpected response format";

/// Why an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request was rejected before any store call.
    Validation,
    /// A single-record operation matched nothing.
    NotFound,
    /// The store reported an error, or did not apply a write as submitted.
    Store,
    /// The store answered with a shape that could not be interpreted.
    UnexpectedFormat,
    /// Talking to the store failed outright.
    Exception,
}

impl FailureKind {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Store => "store",
            Self::UnexpectedFormat => "unexpected_format",
            Self::Exception => "exception",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful result returned to the caller under `"message"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// A plain confirmation.
    Message(String),
    /// One record, as returned by a read by key.
    Record(Value),
    /// Rows returned by a relational query. May be empty.
    Collection {
        /// Summary such as `"Events found"`.
        message: String,
        /// Matching rows.
        data: Vec<Value>,
    },
    /// A newly created record's key.
    Created {
        /// Value of the entity's key column.
        id: Value,
        /// Confirmation message.
        message: String,
    },
}

/// Result of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The operation succeeded.
    Success(Payload),
    /// The operation failed.
    Failure {
        /// Category of the failure.
        kind: FailureKind,
        /// User-facing message.
        message: String,
        /// Result list reported alongside the message, for collection queries.
        data: Option<Vec<Value>>,
        /// Gateway error behind a [`FailureKind::Exception`].
        cause: Option<StoreError>,
    },
}

impl Outcome {
    /// Successful outcome carrying a plain message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Success(Payload::Message(message.into()))
    }

    /// Failed outcome.
    #[must_use]
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
            data: None,
            cause: None,
        }
    }

    /// Failure for a record that does not exist.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(FailureKind::NotFound, message)
    }

    /// Failure for a store response of unknown shape.
    #[must_use]
    pub fn unexpected_format() -> Self {
        Self::failure(FailureKind::UnexpectedFormat, UNEXPECTED_FORMAT)
    }

    /// Failure for an error raised while talking to the store.
    ///
    /// The error is kept as the failure's cause.
    #[must_use]
    pub fn exception(error: StoreError) -> Self {
        Self::Failure {
            kind: FailureKind::Exception,
            message: format!("{EXCEPTION_MARKER}: {error}"),
            data: None,
            cause: Some(error),
        }
    }

    /// Attach a result list to a failure. Successes are returned unchanged.
    #[must_use]
    pub fn with_data(self, rows: Vec<Value>) -> Self {
        match self {
            Self::Failure {
                kind,
                message,
                cause,
                ..
            } => Self::Failure {
                kind,
                message,
                data: Some(rows),
                cause,
            },
            success @ Self::Success(_) => success,
        }
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Failure kind, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Failure { kind, .. } => kind.as_str(),
        }
    }

    /// The `(ok, payload)` pair.
    ///
    /// Failures carry their message as payload, or `{"message", "data"}`
    /// when a result list is attached.
    #[must_use]
    pub fn into_pair(self) -> (bool, Value) {
        match self {
            Self::Success(payload) => (true, json!(payload)),
            Self::Failure {
                message,
                data: Some(data),
                ..
            } => (false, json!({"message": message, "data": data})),
            Self::Failure { message, .. } => (false, Value::String(message)),
        }
    }
}

impl From<ValidationError> for Outcome {
    fn from(error: ValidationError) -> Self {
        Self::failure(FailureKind::Validation, error.to_string())
    }
}
