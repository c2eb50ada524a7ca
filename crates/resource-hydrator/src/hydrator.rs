//! # Hydrator
//!
//! Builds typed resources from JSON objects. For a given [`TypeIdentity`] the steps
//! always run in the same order:
//!
//! 1. **Create** a default instance from the registry, stamp the transport handle into
//!    it and run the configured post-construction setters. Setters a type does not
//!    expose are skipped.
//! 2. **Nested**: every field in the nested map is hydrated into its target resource.
//!    An explicit `null` stays `null`.
//! 3. **Collections**: every field in the collection map is hydrated element by element.
//!    `null` elements are dropped; a `null` collection stays `null`.
//! 4. **Renames**: wire keys are moved onto their in-memory names. A missing wire key is
//!    not an error, the field is simply left at its default.
//! 5. **Copy**: every remaining key matching a declared field is written onto the
//!    instance. Other keys are ignored.
//!
//! Nested and collection targets are short names resolved next to the type being
//! hydrated (see [`TypeIdentity::sibling`]), so a `sync` resource only ever contains
//! `sync` sub-resources. Moving a whole graph to another variant is done with
//! [`Hydrator::convert_variant`].
//!
//! The inverse lives in [`extractor`](crate::extractor).

use crate::catalog::{ResourceCatalog, ASYNC, SYNC};
use crate::error::{json_kind, HydratorError, HydratorResult};
use crate::identity::TypeIdentity;
use crate::metadata::{MetadataRegistry, ResourceMetadata};
use crate::options::HydratorOptions;
use crate::registry::TypeRegistry;
use crate::resource::{downcast, FieldValue, Resource};
use crate::transport::TransportHandle;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Intermediate key/value state of one object between the hydrate steps.
type WorkingMap = HashMap<String, FieldValue>;

#[derive(Debug)]
pub struct Hydrator {
    transport: TransportHandle,
    options: HydratorOptions,
    catalog: ResourceCatalog,
    metadata: MetadataRegistry,
}

impl Hydrator {
    pub fn new(
        transport: TransportHandle,
        types: Arc<TypeRegistry>,
        options: HydratorOptions,
    ) -> Self {
        if options.resource_hydrator_cache_dir.is_some()
            || options.resource_hydrator_namespace.is_some()
        {
            debug!(
                cache_dir = ?options.resource_hydrator_cache_dir,
                namespace = ?options.resource_hydrator_namespace,
                "Generated accessor options have no effect; fields are statically typed"
            );
        }
        debug!(
            namespace = %options.namespace,
            resource_namespace = %options.resource_namespace,
            types = types.len(),
            setters = options.setters.len(),
            "Hydrator created"
        );

        Self {
            transport,
            catalog: ResourceCatalog::new(options.namespace.clone()),
            metadata: MetadataRegistry::new(types),
            options,
        }
    }

    pub fn options(&self) -> &HydratorOptions {
        &self.options
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn metadata(&self) -> &MetadataRegistry {
        &self.metadata
    }

    pub fn transport(&self) -> &TransportHandle {
        &self.transport
    }

    /// Identity of `short_name` in the configured variant.
    pub fn identity(&self, short_name: &str) -> TypeIdentity {
        self.catalog
            .resolve(short_name, &self.options.resource_namespace)
    }

    /// Hydrates `json` as the resource `short_name` in the configured variant.
    pub fn hydrate(&self, short_name: &str, json: Value) -> HydratorResult<Box<dyn Resource>> {
        self.hydrate_fqcn(&self.identity(short_name), json)
    }

    pub fn hydrate_as<T: Resource>(&self, short_name: &str, json: Value) -> HydratorResult<T> {
        downcast(self.hydrate(short_name, json)?)
    }

    pub fn hydrate_fqcn_as<T: Resource>(
        &self,
        identity: &TypeIdentity,
        json: Value,
    ) -> HydratorResult<T> {
        downcast(self.hydrate_fqcn(identity, json)?)
    }

    pub fn hydrate_fqcn(
        &self,
        identity: &TypeIdentity,
        json: Value,
    ) -> HydratorResult<Box<dyn Resource>> {
        let json = match json {
            Value::Object(json) => json,
            other => {
                return Err(HydratorError::NotAnObject {
                    identity: identity.clone(),
                    found: json_kind(&other),
                })
            }
        };
        trace!(identity = %identity, keys = json.len(), "Hydrating resource");

        let mut resource = self.create_object(identity)?;
        let metadata = self.metadata.resolve(identity)?;
        let mut working: WorkingMap = json
            .into_iter()
            .map(|(key, value)| (key, FieldValue::Scalar(value)))
            .collect();

        self.hydrate_nested(identity, &metadata, &mut working)?;
        self.hydrate_collections(identity, &metadata, &mut working)?;
        apply_renames(&metadata, &mut working);
        copy_fields(identity, resource.as_mut(), working)?;

        Ok(resource)
    }

    /// Extracts `resource` as variant `from` and hydrates the result as variant `to`.
    pub fn convert_variant(
        &self,
        short_name: &str,
        from: &str,
        to: &str,
        resource: &dyn Resource,
    ) -> HydratorResult<Box<dyn Resource>> {
        let source = self.catalog.resolve(short_name, from);
        let target = self.catalog.resolve(short_name, to);
        debug!(%source, %target, "Converting resource variant");

        let json = self.extract_fqcn(&source, resource)?;
        self.hydrate_fqcn(&target, Value::Object(json))
    }

    pub fn build_async_from_sync(
        &self,
        short_name: &str,
        resource: &dyn Resource,
    ) -> HydratorResult<Box<dyn Resource>> {
        self.convert_variant(short_name, SYNC, ASYNC, resource)
    }

    fn create_object(&self, identity: &TypeIdentity) -> HydratorResult<Box<dyn Resource>> {
        let mut resource = self.metadata.types().instantiate(identity)?;
        resource.set_transport(self.transport.clone());

        for setter in &self.options.setters {
            match resource.call_setter(&setter.method, &setter.argument) {
                Some(result) => result
                    .map_err(|source| HydratorError::field(identity, &setter.method, source))?,
                None => trace!(
                    identity = %identity,
                    method = %setter.method,
                    "Setter not exposed, skipping"
                ),
            }
        }

        Ok(resource)
    }

    fn hydrate_nested(
        &self,
        identity: &TypeIdentity,
        metadata: &ResourceMetadata,
        working: &mut WorkingMap,
    ) -> HydratorResult<()> {
        for (field, target) in metadata.nested().iter() {
            let key = metadata.wire_name(field);
            let json = take_json(working, key).ok_or_else(|| HydratorError::missing(identity, key))?;
            let value = match json {
                Value::Null => FieldValue::Scalar(Value::Null),
                object @ Value::Object(_) => {
                    FieldValue::Resource(self.hydrate_fqcn(&identity.sibling(target), object)?)
                }
                other => {
                    return Err(HydratorError::malformed(identity, key, "object", json_kind(&other)))
                }
            };
            working.insert(key.to_owned(), value);
        }
        Ok(())
    }

    fn hydrate_collections(
        &self,
        identity: &TypeIdentity,
        metadata: &ResourceMetadata,
        working: &mut WorkingMap,
    ) -> HydratorResult<()> {
        for (field, target) in metadata.collections().iter() {
            let key = metadata.wire_name(field);
            let json = take_json(working, key).ok_or_else(|| HydratorError::missing(identity, key))?;
            let items = match json {
                Value::Null => {
                    working.insert(key.to_owned(), FieldValue::Scalar(Value::Null));
                    continue;
                }
                Value::Array(items) => items,
                other => {
                    return Err(HydratorError::malformed(identity, key, "array", json_kind(&other)))
                }
            };

            let target = identity.sibling(target);
            let mut resources = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Null => continue,
                    object @ Value::Object(_) => resources.push(self.hydrate_fqcn(&target, object)?),
                    other => {
                        return Err(HydratorError::malformed(
                            identity,
                            format!("{key}[{index}]"),
                            "object",
                            json_kind(&other),
                        ))
                    }
                }
            }
            working.insert(key.to_owned(), FieldValue::Collection(resources));
        }
        Ok(())
    }
}

/// Removes a raw JSON value from the working map. Hydrated values are never taken.
fn take_json(working: &mut WorkingMap, key: &str) -> Option<Value> {
    match working.remove(key)? {
        FieldValue::Scalar(value) => Some(value),
        hydrated => {
            working.insert(key.to_owned(), hydrated);
            None
        }
    }
}

/// A renamed field is only ever filled from its wire key; a raw in-memory key is dropped.
fn apply_renames(metadata: &ResourceMetadata, working: &mut WorkingMap) {
    for (field, wire_name) in metadata.renames().iter() {
        match working.remove(wire_name) {
            Some(value) => {
                working.insert(field.to_owned(), value);
            }
            None => {
                working.remove(field);
            }
        }
    }
}

fn copy_fields(
    identity: &TypeIdentity,
    resource: &mut dyn Resource,
    mut working: WorkingMap,
) -> HydratorResult<()> {
    for field in resource.fields() {
        if let Some(value) = working.remove(*field) {
            resource
                .set_field(field, value)
                .map_err(|source| HydratorError::field(identity, *field, source))?;
        }
    }
    if !working.is_empty() {
        trace!(identity = %identity, ignored = working.len(), "Ignored undeclared keys");
    }
    Ok(())
}
