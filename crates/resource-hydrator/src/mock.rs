//! # Mock Transport
//!
//! [`MockTransport`] is an in-memory [`Transport`] that owns a real [`Hydrator`] and
//! answers requests from a queue of expectations. It lets resource-side code
//! (`TransportHandle::request`, `refresh`, `hydrate`) be tested without HTTP.
//!
//! | | MockTransport | HTTP client |
//! |---|---|---|
//! | **Hydrator** | real | real |
//! | **Responses** | queued expectations | network / cache |
//! | **Ordering** | strict FIFO, panics on mismatch | n/a |
//!
//! ```rust
//! use resource_hydrator::mock::MockTransport;
//! use resource_hydrator::{HydratorOptions, TypeRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let types = Arc::new(TypeRegistry::builder().build().unwrap());
//! let mock = MockTransport::new(types, HydratorOptions::new("api", "sync"));
//! mock.expect_request("/repos/1").return_ok(json!({"id": 1}));
//!
//! let handle = mock.handle();
//! let body = handle.request("/repos/1").await.unwrap();
//! assert_eq!(body, json!({"id": 1}));
//! mock.verify();
//! # }
//! ```

use crate::error::{HydratorError, HydratorResult};
use crate::hydrator::Hydrator;
use crate::options::HydratorOptions;
use crate::registry::TypeRegistry;
use crate::transport::{Transport, TransportHandle};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};

/// Failure injected through [`RequestExpectationBuilder::return_err`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MockTransportError(pub String);

struct Expectation {
    path: String,
    response: Result<Value, String>,
}

pub struct MockTransport {
    hydrator: Hydrator,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Mutex<Vec<(String, bool)>>,
}

impl MockTransport {
    pub fn new(types: Arc<TypeRegistry>, options: HydratorOptions) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let transport: Weak<dyn Transport> = weak.clone();
            Self {
                hydrator: Hydrator::new(TransportHandle::new(transport), types, options),
                expectations: Arc::new(Mutex::new(VecDeque::new())),
                requests: Mutex::new(Vec::new()),
            }
        })
    }

    /// A weak handle, as stamped into every resource this mock hydrates.
    pub fn handle(&self) -> TransportHandle {
        self.hydrator.transport().clone()
    }

    /// Expects a request for `path`.
    pub fn expect_request(&self, path: impl Into<String>) -> RequestExpectationBuilder {
        RequestExpectationBuilder {
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every `(path, refresh)` pair requested so far, in order.
    pub fn requests(&self) -> Vec<(String, bool)> {
        self.requests.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn hydrator(&self) -> &Hydrator {
        &self.hydrator
    }

    async fn request(&self, path: &str, refresh: bool) -> HydratorResult<Value> {
        self.requests.lock().unwrap().push((path.to_owned(), refresh));

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(Expectation { path: expected, response }) if expected == path => {
                response.map_err(|message| HydratorError::transport(MockTransportError(message)))
            }
            Some(Expectation { path: expected, .. }) => {
                panic!("Unexpected request for {path}, expected {expected}")
            }
            None => panic!("Unexpected request for {path}, no expectations left"),
        }
    }
}

/// Builder for request expectations.
pub struct RequestExpectationBuilder {
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl RequestExpectationBuilder {
    /// Responds with `body`.
    pub fn return_ok(self, body: Value) {
        self.expectations.lock().unwrap().push_back(Expectation {
            path: self.path,
            response: Ok(body),
        });
    }

    /// Fails the request with a transport error carrying `message`.
    pub fn return_err(self, message: impl Into<String>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            path: self.path,
            response: Err(message.into()),
        });
    }
}
