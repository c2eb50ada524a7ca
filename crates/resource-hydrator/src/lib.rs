//! # Resource Hydrator
//!
//! Turns JSON objects from an HTTP API into typed Rust resources and back again.
//!
//! JSON is the source of truth. A resource is a transient, typed projection of one JSON
//! object, and the projection is described per type by a small declarative [`Schema`]:
//!
//! - **nested** fields expand a JSON object into another resource,
//! - **collection** fields expand a JSON array of objects into a `Vec` of resources,
//! - **renames** map a Rust field name onto a different wire name.
//!
//! ## Architecture Overview
//!
//! 1. **Declaration** ([`resource!`], [`Schema`]) - structs and their wire metadata
//! 2. **Registry** ([`TypeRegistry`], [`MetadataRegistry`], [`ResourceCatalog`]) - maps
//!    type identities to constructors and resolved, cached metadata
//! 3. **Engine** ([`Hydrator`]) - hydration and extraction
//! 4. **Transport seam** ([`Transport`], [`TransportHandle`]) - the HTTP client that owns
//!    the hydrator, and the weak back-reference resources keep to it
//!
//! ## Example
//!
//! ```rust
//! use resource_hydrator::mock::MockTransport;
//! use resource_hydrator::{resource, HydratorOptions, Schema, Transport, TypeRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! resource! {
//!     pub struct Owner {
//!         scalar login: String,
//!     }
//! }
//!
//! resource! {
//!     pub struct Repository {
//!         scalar id: u64,
//!         scalar slug: String,
//!         nested owner: Owner,
//!     }
//! }
//!
//! let types = TypeRegistry::builder()
//!     .register::<Owner>("travis::sync::Owner", Schema::new())
//!     .register::<Repository>(
//!         "travis::sync::Repository",
//!         Schema::new().nested("owner", "Owner").rename("slug", "slog"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let transport = MockTransport::new(Arc::new(types), HydratorOptions::new("travis", "sync"));
//! let hydrator = transport.hydrator();
//!
//! let json = json!({"id": 1, "slog": "php-travis-client", "owner": {"login": "wyri"}});
//! let repository: Repository = hydrator.hydrate_as("Repository", json.clone()).unwrap();
//! assert_eq!(repository.slug, "php-travis-client");
//! assert_eq!(repository.owner.as_ref().unwrap().login, "wyri");
//!
//! let extracted = hydrator.extract("Repository", &repository).unwrap();
//! assert_eq!(serde_json::Value::Object(extracted), json);
//! ```

pub mod catalog;
pub mod error;
pub mod extractor;
pub mod hydrator;
pub mod identity;
pub mod metadata;
pub mod mock;
pub mod options;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod tracing;
pub mod transport;

pub use catalog::{ResourceCatalog, ASYNC, SYNC};
pub use error::{FieldError, HydratorError, HydratorResult};
pub use hydrator::Hydrator;
pub use identity::TypeIdentity;
pub use metadata::{MetadataRegistry, ResourceMetadata};
pub use options::{HydratorOptions, Setter};
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use resource::{downcast, FieldRef, FieldValue, Resource};
pub use schema::{FieldMap, Schema};
pub use transport::{Transport, TransportHandle};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
