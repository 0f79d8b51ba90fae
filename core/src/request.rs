//! Inbound request shape.
//!
//! Every endpoint accepts the same entity-generic body:
//!
//! ```json
//! {
//!   "function": "create|update|delete|get",
//!   "object_type": "venue|artist|attendee|event|ticket",
//!   "identifier": "<id or relation key>",
//!   "attributes": { "<field>": "<value or bool>" }
//! }
//! ```
//!
//! All fields are optional at the deserialization level. Which ones are
//! required depends on the operation and is decided by
//! [`validation`](crate::validation), so that a missing field produces a
//! descriptive validation error rather than a generic decode failure.

use crate::schema::Entity;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Attribute map carried by a request.
pub type Attributes = Map<String, Value>;

/// The CRUD function a generic request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    /// Insert a new record.
    Create,
    /// Partially update an existing record.
    Update,
    /// Delete a record.
    Delete,
    /// Read a record by its key, optionally projecting attributes.
    Get,
}

impl Function {
    /// Lowercase name as it appears in requests.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Get => "get",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "get" => Ok(Self::Get),
            other => Err(ValidationError::UnknownFunction(other.to_string())),
        }
    }
}

/// A request as received from a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Requested CRUD function (only read by the generic dispatch endpoint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Entity name the request targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    /// Record key or relation key, depending on the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Value>,
    /// Values to write, or boolean include flags for reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Request {
    /// Start a request targeting `entity`.
    #[must_use]
    pub fn for_entity(entity: Entity) -> Self {
        Self {
            object_type: Some(entity.name().to_string()),
            ..Self::default()
        }
    }

    /// Start a request that only carries an identifier.
    ///
    /// Relational lookups need nothing else.
    #[must_use]
    pub fn with_key(identifier: impl Into<Value>) -> Self {
        Self::default().identifier(identifier)
    }

    /// Set the function.
    #[must_use]
    pub fn function(mut self, function: Function) -> Self {
        self.function = Some(function.name().to_string());
        self
    }

    /// Set the identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<Value>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add a single attribute.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the attribute map.
    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}
