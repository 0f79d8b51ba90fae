//! # Motive Supabase Gateway
//!
//! `StoreGateway` implementation speaking the PostgREST protocol exposed by
//! Supabase.
//!
//! | Call | HTTP |
//! |---|---|
//! | insert | `POST /rest/v1/<table>` |
//! | update | `PATCH /rest/v1/<table>?<column>=eq.<value>` |
//! | delete | `DELETE /rest/v1/<table>?<column>=eq.<value>` |
//! | select | `GET /rest/v1/<table>?select=<columns>&<column>=eq.<value>` |
//! | procedure | `POST /rest/v1/rpc/<name>` |
//!
//! Writes ask for `return=representation` so the affected rows come back in
//! the response body.
//!
//! ## Example
//!
//! ```no_run
//! use motive_core::Dispatcher;
//! use motive_supabase::SupabaseGateway;
//! use std::sync::Arc;
//!
//! let gateway = SupabaseGateway::new("https://project.supabase.co", "service-key");
//! let dispatcher = Dispatcher::new(Arc::new(gateway));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod gateway;

pub use gateway::SupabaseGateway;
