//! Compile-time knowledge of every resource type, assembled once at startup.

use crate::error::{HydratorError, HydratorResult};
use crate::identity::TypeIdentity;
use crate::resource::Resource;
use crate::schema::Schema;
use std::collections::HashMap;
use tracing::debug;

type Factory = fn() -> Box<dyn Resource>;

fn boxed_default<T: Resource + Default>() -> Box<dyn Resource> {
    Box::<T>::default()
}

#[derive(Debug, Clone)]
struct Entry {
    factory: Option<Factory>,
    schema: Schema,
}

/// Maps each [`TypeIdentity`] to its constructor and [`Schema`].
///
/// Built with [`TypeRegistryBuilder`], then shared read-only behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<TypeIdentity, Entry>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    pub fn schema(&self, identity: &TypeIdentity) -> Option<&Schema> {
        self.entries.get(identity).map(|entry| &entry.schema)
    }

    /// Creates a default instance. Types registered with `describe` cannot be instantiated.
    pub fn instantiate(&self, identity: &TypeIdentity) -> HydratorResult<Box<dyn Resource>> {
        self.entries
            .get(identity)
            .and_then(|entry| entry.factory)
            .map(|factory| factory())
            .ok_or_else(|| HydratorError::UnknownType(identity.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    entries: HashMap<TypeIdentity, Entry>,
}

impl TypeRegistryBuilder {
    /// Registers a concrete resource type. Re-registering an identity replaces it.
    pub fn register<T: Resource + Default>(
        mut self,
        identity: impl Into<TypeIdentity>,
        schema: Schema,
    ) -> Self {
        self.entries.insert(
            identity.into(),
            Entry {
                factory: Some(boxed_default::<T>),
                schema,
            },
        );
        self
    }

    /// Registers a schema-only type that other schemas may extend.
    pub fn describe(mut self, identity: impl Into<TypeIdentity>, schema: Schema) -> Self {
        self.entries.insert(
            identity.into(),
            Entry {
                factory: None,
                schema,
            },
        );
        self
    }

    pub fn build(self) -> HydratorResult<TypeRegistry> {
        for (identity, entry) in &self.entries {
            entry.schema.validate(identity)?;
        }
        debug!(types = self.entries.len(), "Type registry built");
        Ok(TypeRegistry {
            entries: self.entries,
        })
    }
}
