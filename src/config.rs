use crate::error::{ClientError, ClientResult};
use resource_hydrator::HydratorOptions;
use serde::Deserialize;
use url::Url;

/// Connection settings for [`Client`](crate::Client).
///
/// The base URL is `schema://host` followed by `path`, which always starts and ends
/// with `/`.
///
/// ```rust
/// use api_client::ClientConfig;
///
/// let config = ClientConfig::new("wyrihaximus.net").with_path("/api/");
/// assert_eq!(config.base_url().unwrap().as_str(), "https://wyrihaximus.net/api/");
///
/// let config = ClientConfig::new("thorerik.com").with_schema("gopher");
/// assert_eq!(config.base_url().unwrap().as_str(), "gopher://thorerik.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub schema: String,
    pub host: String,
    pub path: String,
    pub user_agent: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub hydrator: HydratorOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            schema: "https".to_string(),
            host: String::new(),
            path: "/".to_string(),
            user_agent: format!("api-client/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 30000,
            hydrator: HydratorOptions::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_hydrator(mut self, hydrator: HydratorOptions) -> Self {
        self.hydrator = hydrator;
        self
    }

    pub fn base_url(&self) -> ClientResult<Url> {
        if self.host.is_empty() {
            return Err(ClientError::config_error("host is required"));
        }
        if self.schema.is_empty() {
            return Err(ClientError::config_error("schema must not be empty"));
        }

        let path = self.path.trim_matches('/');
        let path = if path.is_empty() {
            "/".to_string()
        } else {
            format!("/{path}/")
        };

        let url = Url::parse(&format!("{}://{}{}", self.schema, self.host, path))?;
        if url.host_str().is_none() {
            return Err(ClientError::config_error(format!(
                "base URL {url} has no host"
            )));
        }
        Ok(url)
    }
}
