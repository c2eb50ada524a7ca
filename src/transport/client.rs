//! # API Client
//!
//! [`Client`] is the [`Transport`] implementation: it builds requests against the
//! configured base URL, consults the optional [`Cache`], and owns the [`Hydrator`] that
//! turns response bodies into resources.
//!
//! ## Request flow
//!
//! ```text
//! request(path, refresh)
//!   ├─ refresh == false && cache: cache.get(path) ── hit ──> decode, done
//!   ├─ handler.send(GET base_url + path)
//!   └─ cache: cache.set(path, body)
//! ```
//!
//! The client is always held in an `Arc`. Every resource it hydrates keeps a weak
//! [`TransportHandle`] back to it, so resources can `refresh` themselves without keeping
//! the client alive.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::cache::Cache;
use crate::transport::handler::{ApiRequest, ReqwestHandler, RequestHandler};
use async_trait::async_trait;
use reqwest::Method;
use resource_hydrator::{
    downcast, Hydrator, HydratorError, Resource, Transport, TransportHandle, TypeRegistry,
};
use serde_json::Value;
use std::sync::{Arc, Weak};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub struct Client {
    config: ClientConfig,
    base_url: Url,
    handler: Arc<dyn RequestHandler>,
    cache: Option<Arc<dyn Cache>>,
    hydrator: Hydrator,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.config.user_agent)
            .field("cache", &self.cache.is_some())
            .finish()
    }
}

impl Client {
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            types: None,
            handler: None,
            cache: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Weak handle to this client, as stamped into hydrated resources.
    pub fn handle(&self) -> TransportHandle {
        self.hydrator.transport().clone()
    }

    /// Fetches `path` and decodes the body as JSON.
    ///
    /// With `refresh` the cache is not read, but the fresh body is still stored.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn request(&self, path: &str, refresh: bool) -> ClientResult<Value> {
        if let (false, Some(cache)) = (refresh, &self.cache) {
            match cache.get(path).await {
                Ok(Some(body)) => match serde_json::from_str(&body) {
                    Ok(value) => {
                        debug!("Cache hit");
                        return Ok(value);
                    }
                    Err(error) => {
                        warn!(error = %error, "Cached body is not valid JSON, falling back to network")
                    }
                },
                Ok(None) => debug!("Cache miss"),
                Err(error) => warn!(error = %error, "Cache read failed, falling back to network"),
            }
        }

        let body = self.send(self.build_request(Method::GET, path)?).await?;
        let json = serde_json::from_str(&body)?;

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.set(path, body).await {
                warn!(error = %error, "Cache write failed");
            }
        }

        Ok(json)
    }

    /// Fetches `path` and hydrates it as the resource `short_name`.
    pub async fn request_resource(
        &self,
        path: &str,
        short_name: &str,
        refresh: bool,
    ) -> ClientResult<Box<dyn Resource>> {
        let json = self.request(path, refresh).await?;
        Ok(self.hydrator.hydrate(short_name, json)?)
    }

    pub async fn request_as<T: Resource>(&self, path: &str, short_name: &str) -> ClientResult<T> {
        let resource = self.request_resource(path, short_name, false).await?;
        Ok(downcast(resource)?)
    }

    /// Extracts `resource` and sends it as the JSON body of a `method` request.
    ///
    /// Bodies sent this way are never cached. An empty response body decodes to `null`.
    #[instrument(skip(self, resource), fields(base_url = %self.base_url))]
    pub async fn send_resource(
        &self,
        method: Method,
        path: &str,
        short_name: &str,
        resource: &dyn Resource,
    ) -> ClientResult<Value> {
        let body = self.hydrator.extract(short_name, resource)?;
        let request = self
            .build_request(method, path)?
            .with_body(Value::Object(body));

        let response = self.send(request).await?;
        if response.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response)?)
    }

    fn build_request(&self, method: Method, path: &str) -> ClientResult<ApiRequest> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_owned(),
            (None, _) => return Err(ClientError::config_error(format!("{url} has no host"))),
        };

        Ok(ApiRequest::new(method, url)
            .with_header("Host", host)
            .with_header("User-Agent", self.config.user_agent.clone()))
    }

    async fn send(&self, request: ApiRequest) -> ClientResult<String> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        self.handler.send(request).await
    }
}

#[async_trait]
impl Transport for Client {
    fn hydrator(&self) -> &Hydrator {
        &self.hydrator
    }

    async fn request(&self, path: &str, refresh: bool) -> Result<Value, HydratorError> {
        Client::request(self, path, refresh)
            .await
            .map_err(HydratorError::from)
    }
}

/// Assembles a [`Client`]. Without a handler the client talks HTTP through `reqwest`.
pub struct ClientBuilder {
    config: ClientConfig,
    types: Option<Arc<TypeRegistry>>,
    handler: Option<Arc<dyn RequestHandler>>,
    cache: Option<Arc<dyn Cache>>,
}

impl ClientBuilder {
    pub fn types(mut self, types: Arc<TypeRegistry>) -> Self {
        self.types = Some(types);
        self
    }

    pub fn handler(mut self, handler: Arc<dyn RequestHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> ClientResult<Arc<Client>> {
        let base_url = self.config.base_url()?;
        let handler: Arc<dyn RequestHandler> = match self.handler {
            Some(handler) => handler,
            None => Arc::new(ReqwestHandler::new(&self.config)?),
        };
        let types = self.types.unwrap_or_default();

        info!(
            base_url = %base_url,
            timeout_ms = self.config.timeout_ms,
            cache = self.cache.is_some(),
            resource_types = types.len(),
            "Created API client"
        );

        let config = self.config;
        let cache = self.cache;
        Ok(Arc::new_cyclic(|weak: &Weak<Client>| {
            let transport: Weak<dyn Transport> = weak.clone();
            Client {
                hydrator: Hydrator::new(
                    TransportHandle::new(transport),
                    types,
                    config.hydrator.clone(),
                ),
                config,
                base_url,
                handler,
                cache,
            }
        }))
    }
}
