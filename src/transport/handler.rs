//! The seam between [`Client`](crate::Client) and the network.
//!
//! The client builds a complete [`ApiRequest`] (URL, headers, optional JSON body) and
//! hands it to a [`RequestHandler`], which returns the raw response body. Production
//! code uses [`ReqwestHandler`]; tests use [`MockHandler`](crate::mock::MockHandler).

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// Header pairs in the order they were added.
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a request and returns the response body of a successful (2xx) response.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<String>;
}

/// [`RequestHandler`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHandler {
    client: reqwest::Client,
}

impl ReqwestHandler {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClientError::config_error(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RequestHandler for ReqwestHandler {
    async fn send(&self, request: ApiRequest) -> ClientResult<String> {
        let mut builder = self.client.request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            // reqwest derives Host from the URL.
            if name.eq_ignore_ascii_case("host") {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            debug!(url = %request.url, status = %status, bytes = body.len(), "Received response");
            Ok(body)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(url = %request.url, status = %status, error = %message, "Request failed");
            Err(ClientError::api_error(status.as_u16(), message))
        }
    }
}
