//! Request validation against the schema registry.
//!
//! Each `validate_*` function turns a raw [`Request`] into the typed input of
//! exactly one store operation. Nothing here talks to the store: a request
//! that fails validation never produces a store call.

use crate::request::{Attributes, Request};
use crate::schema::Entity;
use serde_json::Value;
use thiserror::Error;

/// Reasons a request is rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required top-level field is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// `function` is not one of create, update, delete, get.
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    /// `object_type` names no known entity.
    #[error("Invalid object type '{0}'")]
    UnknownObjectType(String),

    /// The identifier is neither a non-empty string nor a number.
    #[error("Invalid identifier: expected a non-empty string or number")]
    InvalidIdentifier,

    /// An attribute key is not in the entity's schema entry.
    #[error("Unknown attribute '{key}' for {entity}")]
    UnknownAttribute {
        /// Entity whose schema was checked.
        entity: Entity,
        /// The offending key.
        key: String,
    },

    /// A read projection flag is not a boolean.
    #[error("Attribute '{0}' must be a boolean flag")]
    NonBooleanFlag(String),

    /// Every attribute of an update was null.
    #[error("No valid attributes provided for update.")]
    EmptyUpdate,

    /// An account-only operation was asked for a non-account entity.
    #[error("Object type '{0}' is not an account type")]
    NotAnAccount(Entity),

    /// A workflow attribute is absent or malformed.
    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),
}

/// Shorthand for validation results.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validated input for a create.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInput {
    /// Target entity.
    pub entity: Entity,
    /// Row to insert, keys already checked against the schema.
    pub row: Attributes,
}

/// Validated input for an update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInput {
    /// Target entity.
    pub entity: Entity,
    /// Key of the record to update.
    pub identifier: String,
    /// Non-null changes, keys already checked against the schema.
    pub changes: Attributes,
}

/// Validated input for operations addressing one record by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Target entity.
    pub entity: Entity,
    /// Key of the record.
    pub identifier: String,
}

/// Validated input for a read by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInput {
    /// Target entity.
    pub entity: Entity,
    /// Key of the record.
    pub identifier: String,
    /// Columns to select.
    pub projection: Projection,
}

/// Validated input for a gig workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GigInput {
    /// Event the application concerns.
    pub event_id: String,
    /// Artist applying, or whose application is decided.
    pub applicant_user_id: String,
}

/// Columns selected by a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    columns: Vec<&'static str>,
}

impl Projection {
    /// Build the projection for `entity` from boolean include flags.
    ///
    /// No flags, or no flag set to `true`, selects every recognised attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAttribute`] for names outside the
    /// schema and [`ValidationError::NonBooleanFlag`] for non-boolean flags.
    pub fn from_flags(entity: Entity, flags: Option<&Attributes>) -> Result<Self> {
        let mut included = Vec::new();

        if let Some(flags) = flags {
            for (key, flag) in flags {
                let Some(column) = entity.attributes().iter().find(|a| **a == key.as_str())
                else {
                    return Err(ValidationError::UnknownAttribute {
                        entity,
                        key: key.clone(),
                    });
                };
                match flag {
                    Value::Bool(true) => included.push(*column),
                    Value::Bool(false) => {}
                    _ => return Err(ValidationError::NonBooleanFlag(key.clone())),
                }
            }
        }

        if included.is_empty() {
            return Ok(Self::all(entity));
        }

        // Registry order, so the select list is stable regardless of map order.
        included.sort_by_key(|column| entity.attributes().iter().position(|a| a == column));
        Ok(Self { columns: included })
    }

    /// Every recognised attribute of `entity`.
    #[must_use]
    pub fn all(entity: Entity) -> Self {
        Self {
            columns: entity.attributes().to_vec(),
        }
    }

    /// Selected column names.
    #[must_use]
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Comma-separated select list.
    #[must_use]
    pub fn select_list(&self) -> String {
        self.columns.join(",")
    }
}

/// Resolve the request's `object_type`.
///
/// # Errors
///
/// Missing or unknown object types are rejected.
pub fn entity_of(request: &Request) -> Result<Entity> {
    let name = request
        .object_type
        .as_deref()
        .ok_or(ValidationError::MissingField("object_type"))?;
    name.parse()
        .map_err(|_| ValidationError::UnknownObjectType(name.to_string()))
}

/// Read the request's identifier as a string key.
///
/// # Errors
///
/// Missing, empty or non-scalar identifiers are rejected.
pub fn identifier_of(request: &Request) -> Result<String> {
    let value = request
        .identifier
        .as_ref()
        .ok_or(ValidationError::MissingField("identifier"))?;
    scalar_key(value).ok_or(ValidationError::InvalidIdentifier)
}

fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn check_keys(entity: Entity, attributes: &Attributes) -> Result<()> {
    match attributes.keys().find(|key| !entity.recognises(key)) {
        Some(key) => Err(ValidationError::UnknownAttribute {
            entity,
            key: key.clone(),
        }),
        None => Ok(()),
    }
}

/// Validate a create request.
///
/// # Errors
///
/// Requires `object_type` and `attributes`; every attribute key must be in
/// the entity's schema entry.
pub fn validate_create(request: &Request) -> Result<CreateInput> {
    let entity = entity_of(request)?;
    let attributes = request
        .attributes
        .as_ref()
        .ok_or(ValidationError::MissingField("attributes"))?;
    check_keys(entity, attributes)?;

    Ok(CreateInput {
        entity,
        row: attributes.clone(),
    })
}

/// Validate an update request.
///
/// Null values are dropped so the store only receives real changes.
///
/// # Errors
///
/// Requires `object_type`, `identifier` and `attributes` with recognised
/// keys. Fails with [`ValidationError::EmptyUpdate`] when every value is null.
pub fn validate_update(request: &Request) -> Result<UpdateInput> {
    let entity = entity_of(request)?;
    let identifier = identifier_of(request)?;
    let attributes = request
        .attributes
        .as_ref()
        .ok_or(ValidationError::MissingField("attributes"))?;
    check_keys(entity, attributes)?;

    let changes: Attributes = attributes
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if changes.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }

    Ok(UpdateInput {
        entity,
        identifier,
        changes,
    })
}

/// Validate a delete request.
///
/// # Errors
///
/// Requires `object_type` and `identifier`.
pub fn validate_delete(request: &Request) -> Result<KeyInput> {
    Ok(KeyInput {
        entity: entity_of(request)?,
        identifier: identifier_of(request)?,
    })
}

/// Validate a read-by-key request.
///
/// # Errors
///
/// Requires `object_type` and `identifier`; `attributes`, when present, must
/// be boolean flags over recognised names.
pub fn validate_get(request: &Request) -> Result<GetInput> {
    let entity = entity_of(request)?;
    let identifier = identifier_of(request)?;
    let projection = Projection::from_flags(entity, request.attributes.as_ref())?;

    Ok(GetInput {
        entity,
        identifier,
        projection,
    })
}

/// Validate an account lookup by email.
///
/// # Errors
///
/// Requires an account-type `object_type` and the email as `identifier`.
pub fn validate_account_lookup(request: &Request) -> Result<KeyInput> {
    let entity = entity_of(request)?;
    if !entity.is_account() {
        return Err(ValidationError::NotAnAccount(entity));
    }

    Ok(KeyInput {
        entity,
        identifier: identifier_of(request)?,
    })
}

/// Validate a gig workflow request.
///
/// The event id travels as `identifier`, the applicant as
/// `attributes.applicant_user_id`.
///
/// # Errors
///
/// Both values are required and must be non-empty scalars.
pub fn validate_gig(request: &Request) -> Result<GigInput> {
    let event_id = identifier_of(request)?;
    let applicant_user_id = request
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.get("applicant_user_id"))
        .and_then(scalar_key)
        .ok_or(ValidationError::MissingAttribute("applicant_user_id"))?;

    Ok(GigInput {
        event_id,
        applicant_user_id,
    })
}
