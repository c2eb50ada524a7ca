//! HTTP transport: request building, read-through caching and the network seam.

pub mod cache;
pub mod client;
pub mod handler;

pub use cache::{Cache, MemoryCache};
pub use client::{Client, ClientBuilder};
pub use handler::{ApiRequest, ReqwestHandler, RequestHandler};
