//! Storage gateway abstraction.
//!
//! The relational store is an external collaborator. This module describes
//! what the service asks of it as plain values ([`StoreCall`]) and what it may
//! answer ([`StoreResponse`] or [`StoreError`]); implementations decide how a
//! call travels over the wire.
//!
//! # Implementations
//!
//! - `SupabaseGateway` (in `motive-supabase`): PostgREST over HTTP
//! - `MockStore` (in `motive-testing`): scripted responses with call recording
//!
//! # Dyn Compatibility
//!
//! [`StoreGateway::execute`] returns a boxed future so the gateway can be held
//! as `Arc<dyn StoreGateway>` and injected into application state.

use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Future returned by [`StoreGateway::execute`].
pub type GatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<StoreResponse, StoreError>> + Send + 'a>>;

/// Equality filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Column to compare.
    pub column: &'static str,
    /// Value the column must equal.
    pub value: String,
}

impl Filter {
    /// `column = value`.
    #[must_use]
    pub fn eq(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// One request to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    /// Insert a row and return it.
    Insert {
        /// Target table.
        table: &'static str,
        /// Row to insert.
        row: Map<String, Value>,
    },
    /// Update matching rows and return them.
    Update {
        /// Target table.
        table: &'static str,
        /// Rows to update.
        filter: Filter,
        /// New values.
        changes: Map<String, Value>,
    },
    /// Delete matching rows and return them.
    Delete {
        /// Target table.
        table: &'static str,
        /// Rows to delete.
        filter: Filter,
    },
    /// Select columns of matching rows.
    Select {
        /// Source table.
        table: &'static str,
        /// Comma-separated column list.
        columns: String,
        /// Rows to select.
        filter: Filter,
    },
    /// Invoke a remote procedure.
    Rpc {
        /// Procedure name.
        procedure: &'static str,
        /// Named arguments.
        args: Map<String, Value>,
    },
}

impl StoreCall {
    /// Short operation name for logs and metrics.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Select { .. } => "select",
            Self::Rpc { .. } => "rpc",
        }
    }

    /// Table or procedure the call targets.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        match self {
            Self::Insert { table, .. }
            | Self::Update { table, .. }
            | Self::Delete { table, .. }
            | Self::Select { table, .. } => *table,
            Self::Rpc { procedure, .. } => *procedure,
        }
    }
}

/// Error reported by the store itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreApiError {
    /// Main error message.
    pub message: String,
    /// Store-specific error code.
    pub code: Option<String>,
    /// Additional detail.
    pub details: Option<String>,
    /// Suggested fix.
    pub hint: Option<String>,
}

impl StoreApiError {
    /// Error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for StoreApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " Hint: {hint}")?;
        }
        Ok(())
    }
}

/// Raw answer from the store.
///
/// Either field may be absent. Interpreting the combination is the
/// normalizer's job, not the gateway's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreResponse {
    /// Returned rows, or procedure result.
    pub data: Option<Value>,
    /// Error the store reported.
    pub error: Option<StoreApiError>,
}

impl StoreResponse {
    /// Response carrying data.
    #[must_use]
    pub const fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Response carrying rows.
    #[must_use]
    pub const fn rows(rows: Vec<Value>) -> Self {
        Self::data(Value::Array(rows))
    }

    /// Response carrying a store error.
    #[must_use]
    pub const fn error(error: StoreApiError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Response carrying neither data nor error.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

/// Failure to talk to the store at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The request could not be sent or the connection failed.
    #[error("{0}")]
    Transport(String),

    /// The store answered with a body that could not be decoded.
    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

/// The external relational store.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: one instance is shared by every
/// request handler.
pub trait StoreGateway: Send + Sync {
    /// Execute one call against the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store could not be reached or its answer
    /// could not be decoded. Errors the store itself reports are returned
    /// inside [`StoreResponse::error`].
    fn execute(&self, call: StoreCall) -> GatewayFuture<'_>;

    /// Cheap reachability probe used by readiness checks.
    ///
    /// The default reports the store as reachable without contacting it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be reached.
    fn ping(&self) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}
