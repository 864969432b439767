//! `MockHttp` — a test double for `AuthenticatedRequest`.
//!
//! Useful in node tests where a real API is either unavailable or irrelevant.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::{AuthenticatedRequest, HttpRequestOptions, RequestError};

/// Behaviour injected into `MockHttp` at construction time.
pub enum MockBehaviour {
    /// Hand out the scripted results in order, then `Value::Null`.
    Sequence(Mutex<VecDeque<Result<Value, RequestError>>>),
    /// Return the same value for every call.
    Repeat(Value),
    /// Fail every call with the same error.
    Fail(RequestError),
}

/// A mock helper that records every request it receives and answers with a
/// programmer-specified result.
pub struct MockHttp {
    /// What the helper will do when `request` is called.
    pub behaviour: MockBehaviour,
    /// All requests seen (in call order).
    pub calls: Arc<Mutex<Vec<HttpRequestOptions>>>,
}

impl MockHttp {
    fn with(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer the calls with `responses`, one per call.
    pub fn sequence(responses: impl IntoIterator<Item = Result<Value, RequestError>>) -> Self {
        Self::with(MockBehaviour::Sequence(Mutex::new(
            responses.into_iter().collect(),
        )))
    }

    /// Answer every call successfully with `value`.
    pub fn returning(value: Value) -> Self {
        Self::with(MockBehaviour::Repeat(value))
    }

    /// Fail every call with `error`.
    pub fn failing(error: RequestError) -> Self {
        Self::with(MockBehaviour::Fail(error))
    }

    /// Number of requests issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of the recorded requests.
    pub fn requests(&self) -> Vec<HttpRequestOptions> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthenticatedRequest for MockHttp {
    async fn request(&self, options: &HttpRequestOptions) -> Result<Value, RequestError> {
        self.calls.lock().unwrap().push(options.clone());

        match &self.behaviour {
            MockBehaviour::Sequence(queue) => {
                queue.lock().unwrap().pop_front().unwrap_or(Ok(Value::Null))
            }
            MockBehaviour::Repeat(value) => Ok(value.clone()),
            MockBehaviour::Fail(err) => Err(err.clone()),
        }
    }
}
