//! Scripted storage gateway for tests.
//!
//! [`MockStore`] answers each call with the next queued result, or with its
//! fallback once the queue is empty, and records every call it receives so
//! tests can assert on call counts and arguments.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only happens after a test already panicked

use motive_core::normalize::RawResult;
use motive_core::{GatewayFuture, StoreApiError, StoreCall, StoreError, StoreGateway, StoreResponse};
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct MockState {
    calls: Vec<StoreCall>,
    queued: VecDeque<RawResult>,
    fallback: RawResult,
}

/// In-memory stand-in for the remote store.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the dispatcher owns another.
///
/// # Example
///
/// ```
/// use motive_testing::MockStore;
/// use serde_json::json;
///
/// let store = MockStore::with_rows(vec![json!({"event_id": "123"})]);
/// assert_eq!(store.call_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct MockStore {
    state: Arc<RwLock<MockState>>,
}

impl MockStore {
    /// Store answering every call with zero rows.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback(Ok(StoreResponse::rows(Vec::new())))
    }

    /// Store answering every call with `result`.
    #[must_use]
    pub fn with_fallback(result: RawResult) -> Self {
        Self {
            state: Arc::new(RwLock::new(MockState {
                calls: Vec::new(),
                queued: VecDeque::new(),
                fallback: result,
            })),
        }
    }

    /// Store answering every call with `rows`.
    #[must_use]
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self::with_fallback(Ok(StoreResponse::rows(rows)))
    }

    /// Store answering every call with a response missing `data` entirely.
    #[must_use]
    pub fn without_data() -> Self {
        Self::with_fallback(Ok(StoreResponse::empty()))
    }

    /// Store reporting `message` as its own error on every call.
    #[must_use]
    pub fn reporting_error(message: &str) -> Self {
        Self::with_fallback(Ok(StoreResponse::error(StoreApiError::new(message))))
    }

    /// Store whose client fails with `message` on every call.
    #[must_use]
    pub fn failing_with(message: &str) -> Self {
        Self::with_fallback(Err(StoreError::Transport(message.to_string())))
    }

    /// Queue `result` as the answer to the next unanswered call.
    pub fn push(&self, result: RawResult) {
        self.state.write().unwrap().queued.push_back(result);
    }

    /// Queue `rows` as the answer to the next unanswered call.
    pub fn push_rows(&self, rows: Vec<Value>) {
        self.push(Ok(StoreResponse::rows(rows)));
    }

    /// Every call received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.read().unwrap().calls.clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls.len()
    }

    /// Most recent call, if any.
    #[must_use]
    pub fn last_call(&self) -> Option<StoreCall> {
        self.state.read().unwrap().calls.last().cloned()
    }

    /// Forget recorded calls and queued answers.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.calls.clear();
        state.queued.clear();
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreGateway for MockStore {
    fn execute(&self, call: StoreCall) -> GatewayFuture<'_> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap();
            state.calls.push(call);
            match state.queued.pop_front() {
                Some(result) => result,
                None => state.fallback.clone(),
            }
        })
    }

    /// Unreachable exactly when the fallback is a client error.
    fn ping(&self) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(async move {
            match &self.state.read().unwrap().fallback {
                Err(error) => Err(error.clone()),
                Ok(_) => Ok(()),
            }
        })
    }
}
