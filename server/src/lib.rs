//! # Motive Server
//!
//! HTTP front end of the Motive events service: configuration, application
//! state, routes and handlers. The `motive-server` binary wires these to a
//! Supabase gateway.
//!
//! ```ignore
//! let state = AppState::new(Arc::new(SupabaseGateway::new(&url, key)));
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod metrics;
pub mod server;

pub use config::{Config, ConfigError};
pub use server::{AppState, build_router};
