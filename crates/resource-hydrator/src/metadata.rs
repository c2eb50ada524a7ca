//! # Metadata Registry
//!
//! Resolves the effective nested/collection/rename maps for a resource type and caches
//! them for the life of the hydrator.
//!
//! Each kind is resolved on its own: if the type declares it (even as an empty map)
//! that declaration wins, otherwise the direct parent's declaration is used. Lookup goes
//! exactly one level up. A grandparent's declaration is never consulted.
//!
//! Entries are computed at most once per identity. Concurrent first lookups may both
//! compute, but the result is the same and only one copy is kept.

use crate::error::{HydratorError, HydratorResult};
use crate::identity::TypeIdentity;
use crate::registry::TypeRegistry;
use crate::schema::{FieldMap, Schema};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

/// The effective metadata of one resource type after parent fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMetadata {
    nested: FieldMap,
    collections: FieldMap,
    renames: FieldMap,
}

impl ResourceMetadata {
    pub fn nested(&self) -> &FieldMap {
        &self.nested
    }

    pub fn collections(&self) -> &FieldMap {
        &self.collections
    }

    pub fn renames(&self) -> &FieldMap {
        &self.renames
    }

    /// The JSON key a field is stored under.
    pub fn wire_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.renames.get(field).unwrap_or(field)
    }
}

#[derive(Debug)]
pub struct MetadataRegistry {
    types: Arc<TypeRegistry>,
    cache: DashMap<TypeIdentity, Arc<ResourceMetadata>>,
}

impl MetadataRegistry {
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self {
            types,
            cache: DashMap::new(),
        }
    }

    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    pub fn resolve(&self, identity: &TypeIdentity) -> HydratorResult<Arc<ResourceMetadata>> {
        if let Some(cached) = self.cache.get(identity) {
            return Ok(Arc::clone(cached.value()));
        }

        let schema = self
            .types
            .schema(identity)
            .ok_or_else(|| HydratorError::UnknownType(identity.clone()))?;
        let parent = schema.parent().and_then(|parent| self.types.schema(parent));

        let metadata = Arc::new(ResourceMetadata {
            nested: pick(schema, parent, Schema::nested_map),
            collections: pick(schema, parent, Schema::collection_map),
            renames: pick(schema, parent, Schema::rename_map),
        });
        trace!(
            identity = %identity,
            parent = ?schema.parent().map(TypeIdentity::as_str),
            nested = metadata.nested.len(),
            collections = metadata.collections.len(),
            renames = metadata.renames.len(),
            "Resolved resource metadata"
        );

        let entry = self.cache.entry(identity.clone()).or_insert(metadata);
        Ok(Arc::clone(entry.value()))
    }

    /// Number of identities resolved so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

fn pick(
    schema: &Schema,
    parent: Option<&Schema>,
    kind: fn(&Schema) -> Option<&FieldMap>,
) -> FieldMap {
    kind(schema)
        .or_else(|| parent.and_then(kind))
        .cloned()
        .unwrap_or_default()
}
