//! Response normalization.
//!
//! Maps every raw gateway result onto an [`Outcome`]. The rules:
//!
//! | Store answer | Outcome |
//! |---|---|
//! | gateway returned `Err` | `Exception`, message prefixed with [`EXCEPTION_MARKER`] |
//! | `error` present | `Store`, message prefixed with operation context |
//! | no `data`, or `data` not rows | `UnexpectedFormat` (with an empty list for collection queries) |
//! | zero rows, single-record operation | `NotFound` |
//! | zero rows, collection query | success with an empty list |
//!
//! [`EXCEPTION_MARKER`]: crate::outcome::EXCEPTION_MARKER

use crate::gateway::{StoreError, StoreResponse};
use crate::outcome::{FailureKind, Outcome, Payload};
use crate::request::Attributes;
use crate::schema::Entity;
use serde_json::Value;

/// Raw result of one gateway call.
pub type RawResult = Result<StoreResponse, StoreError>;

/// Extract rows, or the failure that ends the operation.
///
/// A single object is accepted as a one-row result, since remote procedures
/// returning a composite value answer that way.
fn rows(result: RawResult, error_context: &str) -> Result<Vec<Value>, Outcome> {
    let response = result.map_err(Outcome::exception)?;

    if let Some(error) = response.error {
        return Err(Outcome::failure(
            FailureKind::Store,
            format!("{error_context}: {error}"),
        ));
    }

    match response.data {
        Some(Value::Array(rows)) => Ok(rows),
        Some(row @ Value::Object(_)) => Ok(vec![row]),
        _ => Err(Outcome::unexpected_format()),
    }
}

/// Plural noun of a collection query, used in its summary message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noun {
    /// Capitalised form, e.g. `"Events"`.
    pub capitalised: &'static str,
    /// Lowercase form, e.g. `"events"`.
    pub lowercase: &'static str,
}

impl Noun {
    /// Events.
    pub const EVENTS: Self = Self {
        capitalised: "Events",
        lowercase: "events",
    };

    /// Cities.
    pub const CITIES: Self = Self {
        capitalised: "Cities",
        lowercase: "cities",
    };
}

/// Normalize an insert.
///
/// Success carries the new record's key column value.
#[must_use]
pub fn created(entity: Entity, result: RawResult) -> Outcome {
    let rows = match rows(result, "An error occurred") {
        Ok(rows) => rows,
        Err(outcome) => return outcome,
    };

    match rows.first().and_then(|row| row.get(entity.key_column())) {
        Some(id) if !id.is_null() => Outcome::Success(Payload::Created {
            id: id.clone(),
            message: format!("{} creation was successful.", entity.label()),
        }),
        _ => Outcome::unexpected_format(),
    }
}

/// Normalize an update.
///
/// The store echoes the updated row. Each submitted value is compared with
/// it; the first mismatch fails the operation. This confirmation is not
/// atomic with the write.
#[must_use]
pub fn updated(entity: Entity, submitted: &Attributes, result: RawResult) -> Outcome {
    let rows = match rows(result, "An error occurred") {
        Ok(rows) => rows,
        Err(outcome) => return outcome,
    };

    let Some(stored) = rows.first() else {
        return Outcome::not_found(format!("{} not found", entity.label()));
    };

    for (key, value) in submitted {
        if stored
            .get(key)
            .is_some_and(|stored_value| !same_value(stored_value, value))
        {
            return Outcome::failure(
                FailureKind::Store,
                format!("Failed to update {key} attribute."),
            );
        }
    }

    Outcome::message(format!("{} updated successfully.", entity.label()))
}

/// Value equality that treats numbers by magnitude, so `15` matches `15.0`.
#[allow(clippy::float_cmp)]
fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_value(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| same_value(a, b)))
        }
        _ => left == right,
    }
}

/// Normalize a delete.
#[must_use]
pub fn deleted(entity: Entity, result: RawResult) -> Outcome {
    match rows(result, "An error occurred") {
        Ok(rows) if rows.is_empty() => Outcome::not_found(format!(
            "{} not found or already deleted.",
            entity.label()
        )),
        Ok(_) => Outcome::message(format!("{} deletion was successful.", entity.label())),
        Err(outcome) => outcome,
    }
}

/// Normalize a read by key. Zero rows is a failure.
#[must_use]
pub fn fetched(entity: Entity, result: RawResult) -> Outcome {
    let context = format!("An error occurred while fetching the {entity}");
    match rows(result, &context) {
        Ok(rows) => match rows.into_iter().next() {
            Some(row) => Outcome::Success(Payload::Record(row)),
            None => Outcome::not_found(format!("{} not found", entity.label())),
        },
        Err(outcome) => outcome,
    }
}

/// Normalize an account lookup by email. Zero rows is a failure.
#[must_use]
pub fn account(result: RawResult) -> Outcome {
    match rows(result, "An error occurred while fetching the account") {
        Ok(rows) => match rows.into_iter().next() {
            Some(row) => Outcome::Success(Payload::Record(row)),
            None => Outcome::not_found("No account found for the provided email."),
        },
        Err(outcome) => outcome,
    }
}

/// Normalize a collection query. Zero rows is a success.
///
/// An unexpected response shape still reports an empty list alongside the
/// failure message.
#[must_use]
pub fn collection(noun: Noun, result: RawResult) -> Outcome {
    let context = format!("An error occurred while fetching {}", noun.lowercase);
    match rows(result, &context) {
        Ok(rows) if rows.is_empty() => Outcome::Success(Payload::Collection {
            message: format!("No {} found", noun.lowercase),
            data: rows,
        }),
        Ok(rows) => Outcome::Success(Payload::Collection {
            message: format!("{} found", noun.capitalised),
            data: rows,
        }),
        Err(outcome) if outcome.kind() == Some(FailureKind::UnexpectedFormat) => {
            outcome.with_data(Vec::new())
        }
        Err(outcome) => outcome,
    }
}

/// Normalize a workflow procedure.
///
/// These procedures return nothing of interest; any answer without an error
/// counts as success.
#[must_use]
pub fn workflow(success_message: &str, result: RawResult) -> Outcome {
    match result {
        Err(error) => Outcome::exception(error),
        Ok(StoreResponse {
            error: Some(error), ..
        }) => Outcome::failure(
            FailureKind::Store,
            format!("An error occurred: {error}"),
        ),
        Ok(_) => Outcome::message(success_message),
    }
}
