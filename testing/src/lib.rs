//! # Motive Testing
//!
//! Testing utilities for the Motive events service.
//!
//! This crate provides:
//! - [`MockStore`]: a scripted `StoreGateway` that records every call
//! - [`fixtures`]: realistic rows and requests for each entity
//!
//! ## Example
//!
//! ```ignore
//! use motive_testing::MockStore;
//! use motive_core::{Dispatcher, Request, Entity};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_empty_update_skips_store() {
//!     let store = MockStore::new();
//!     let dispatcher = Dispatcher::new(Arc::new(store.clone()));
//!
//!     let request = Request::for_entity(Entity::Event)
//!         .identifier("evt-1")
//!         .attribute("event_name", serde_json::Value::Null);
//!     assert!(!dispatcher.update(&request).await.is_ok());
//!     assert_eq!(store.call_count(), 0);
//! }
//! ```

pub mod fixtures;
pub mod store_mocks;

pub use store_mocks::MockStore;

/// Install a test subscriber so `tracing` output shows up in failing tests.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
