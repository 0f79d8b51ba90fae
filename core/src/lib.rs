//! # Motive Core
//!
//! Request validation and response normalization for the Motive events
//! service.
//!
//! Every operation the service exposes is a thin mapping from one request
//! to one store call. This crate holds the parts that are the same for all
//! of them:
//!
//! - **Schema registry** ([`schema`]): entities, their attributes, tables and key columns
//! - **Request validator** ([`validation`]): typed inputs or a [`ValidationError`]
//! - **Operation dispatcher** ([`dispatcher`]): `(function, object_type)` → store call
//! - **Storage gateway** ([`gateway`]): the trait the external store sits behind
//! - **Response normalizer** ([`normalize`]): raw store answer → [`Outcome`]
//!
//! ## Data Flow
//!
//! ```text
//! Request → validate → Dispatcher → StoreGateway::execute → normalize → Outcome
//! ```
//!
//! The service is stateless: the only shared value is the gateway handle,
//! constructed once at startup and passed into the [`Dispatcher`].
//!
//! ## Example
//!
//! ```ignore
//! use motive_core::{Dispatcher, Request, Entity};
//! use std::sync::Arc;
//!
//! let dispatcher = Dispatcher::new(Arc::new(gateway));
//! let outcome = dispatcher
//!     .get(&Request::for_entity(Entity::Event).identifier("evt-1"))
//!     .await;
//! let (ok, payload) = outcome.into_pair();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dispatcher;
pub mod gateway;
pub mod normalize;
pub mod outcome;
pub mod request;
pub mod schema;
pub mod validation;

pub use dispatcher::{Dispatcher, GigAction, Relation};
pub use gateway::{
    Filter, GatewayFuture, StoreApiError, StoreCall, StoreError, StoreGateway, StoreResponse,
};
pub use outcome::{EXCEPTION_MARKER, FailureKind, Outcome, Payload, UNEXPECTED_FORMAT};
pub use request::{Attributes, Function, Request};
pub use schema::Entity;
pub use validation::ValidationError;
