//! # API Client
//!
//! > **An async JSON API client that hands back typed resources.**
//!
//! The client fetches JSON over HTTP (with an optional read-through cache) and turns it
//! into typed resources with the `resource-hydrator` engine. Resources remember the
//! client that produced them through a weak handle, so they can refresh themselves
//! without keeping the client alive.
//!
//! ## Module Tour
//!
//! - [`config`] - [`ClientConfig`]: base URL parts, user agent, timeout and the
//!   hydrator options, all deserializable with serde.
//! - [`transport`] - [`Client`], the [`RequestHandler`] network seam (backed by
//!   `reqwest`) and the [`Cache`] trait with an in-memory implementation.
//! - [`error`] - [`ClientError`].
//! - [`mock`] - [`MockHandler`](mock::MockHandler) and
//!   [`RecordingCache`](mock::RecordingCache) for tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use api_client::{Client, ClientConfig, MemoryCache};
//! use resource_hydrator::{resource, HydratorOptions, Schema, TypeRegistry};
//! use std::sync::Arc;
//!
//! resource! {
//!     pub struct Repository {
//!         scalar id: u64,
//!         scalar slug: String,
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), api_client::ClientError> {
//! let types = TypeRegistry::builder()
//!     .register::<Repository>("travis::async::Repository", Schema::new())
//!     .build()?;
//!
//! let config = ClientConfig::new("api.travis-ci.org")
//!     .with_hydrator(HydratorOptions::new("travis", "async"));
//! let client = Client::builder(config)
//!     .types(Arc::new(types))
//!     .cache(Arc::new(MemoryCache::new()))
//!     .build()?;
//!
//! let repository: Repository = client.request_as("repos/1", "Repository").await?;
//! println!("{}", repository.slug);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Everything is traced with `tracing`. Call
//! [`resource_hydrator::tracing::setup_tracing`] once and set `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=api_client=debug,resource_hydrator=trace cargo test
//! ```

pub mod config;
pub mod error;
pub mod mock;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transport::{
    ApiRequest, Cache, Client, ClientBuilder, MemoryCache, ReqwestHandler, RequestHandler,
};
