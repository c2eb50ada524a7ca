//! # Transport Mocks
//!
//! In-memory stand-ins for the network and the cache, so the [`Client`](crate::Client)
//! request flow can be tested deterministically.
//!
//! - [`MockHandler`] answers requests from a FIFO queue of expectations and panics on
//!   anything unexpected.
//! - [`RecordingCache`] is a working cache that records every read and write.
//! - Both write to a shared [`CallLog`], which makes the relative order of cache reads,
//!   network sends and cache writes observable.
//!
//! ```rust
//! use api_client::mock::{Call, CallLog, MockHandler, RecordingCache};
//! use api_client::{Client, ClientConfig};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let log = CallLog::default();
//! let handler = MockHandler::new(log.clone());
//! handler
//!     .expect_get("https://api.example.com/status")
//!     .return_ok(r#"{"foo":"bar"}"#);
//! let cache = RecordingCache::new(log.clone());
//!
//! let client = Client::builder(ClientConfig::new("api.example.com"))
//!     .handler(handler.clone())
//!     .cache(cache.clone())
//!     .build()
//!     .unwrap();
//! client.request("status", false).await.unwrap();
//!
//! assert_eq!(
//!     log.calls(),
//!     vec![
//!         Call::CacheGet("status".into()),
//!         Call::Send("GET".into(), "https://api.example.com/status".into()),
//!         Call::CacheSet("status".into(), r#"{"foo":"bar"}"#.into()),
//!     ]
//! );
//! handler.verify();
//! # }
//! ```

use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, Cache, RequestHandler};
use async_trait::async_trait;
use reqwest::Method;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// One observable interaction with the network or the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CacheGet(String),
    CacheSet(String, String),
    /// Method and full URL.
    Send(String, String),
}

/// Shared, ordered record of [`Call`]s.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn record(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }
}

struct Expectation {
    method: Method,
    url: String,
    response: ClientResult<String>,
}

/// A [`RequestHandler`] that replays queued responses.
pub struct MockHandler {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Mutex<Vec<ApiRequest>>,
    log: CallLog,
}

impl MockHandler {
    pub fn new(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            requests: Mutex::new(Vec::new()),
            log,
        })
    }

    /// Expects a `method` request to exactly `url`.
    pub fn expect(&self, method: Method, url: impl Into<String>) -> SendExpectationBuilder {
        SendExpectationBuilder {
            method,
            url: url.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&self, url: impl Into<String>) -> SendExpectationBuilder {
        self.expect(Method::GET, url)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
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
impl RequestHandler for MockHandler {
    async fn send(&self, request: ApiRequest) -> ClientResult<String> {
        self.log.record(Call::Send(
            request.method.to_string(),
            request.url.to_string(),
        ));
        let expectation = self.expectations.lock().unwrap().pop_front();
        let method = request.method.clone();
        let url = request.url.to_string();
        self.requests.lock().unwrap().push(request);

        match expectation {
            Some(expectation) if expectation.method == method && expectation.url == url => {
                expectation.response
            }
            Some(expectation) => panic!(
                "Unexpected request {method} {url}, expected {} {}",
                expectation.method, expectation.url
            ),
            None => panic!("Unexpected request {method} {url}, no expectations left"),
        }
    }
}

/// Builder for request expectations.
pub struct SendExpectationBuilder {
    method: Method,
    url: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl SendExpectationBuilder {
    /// Responds with `body`.
    pub fn return_ok(self, body: impl Into<String>) {
        self.push(Ok(body.into()));
    }

    /// Responds with a non-success HTTP status.
    pub fn return_err(self, status: u16, message: impl Into<String>) {
        self.push(Err(ClientError::api_error(status, message)));
    }

    fn push(self, response: ClientResult<String>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            method: self.method,
            url: self.url,
            response,
        });
    }
}

/// A working in-memory [`Cache`] that logs every access.
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: bool,
    log: CallLog,
}

impl RecordingCache {
    pub fn new(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            fail_reads: false,
            log,
        })
    }

    /// A cache whose reads always fail. Writes still succeed.
    pub fn failing_reads(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            fail_reads: true,
            log,
        })
    }

    /// Pre-populates `key` without logging.
    pub fn insert(&self, key: impl Into<String>, body: impl Into<String>) {
        self.entries.lock().unwrap().insert(key.into(), body.into());
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl Cache for RecordingCache {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        self.log.record(Call::CacheGet(key.to_owned()));
        if self.fail_reads {
            return Err(ClientError::Handler("cache unavailable".into()));
        }
        Ok(self.entry(key))
    }

    async fn set(&self, key: &str, body: String) -> ClientResult<()> {
        self.log
            .record(Call::CacheSet(key.to_owned(), body.clone()));
        self.entries.lock().unwrap().insert(key.to_owned(), body);
        Ok(())
    }
}
