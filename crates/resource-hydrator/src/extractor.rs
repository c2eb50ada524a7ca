//! Extraction: the inverse of hydration.
//!
//! Declared fields are read into a JSON object, nested and collection fields are
//! extracted recursively, then renamed fields are moved back onto their wire names.
//! Extracting a hydrated resource and hydrating the result yields an equal resource.

use crate::error::{HydratorError, HydratorResult};
use crate::hydrator::Hydrator;
use crate::identity::TypeIdentity;
use crate::metadata::ResourceMetadata;
use crate::resource::{FieldRef, Resource};
use serde_json::{Map, Value};
use tracing::trace;

impl Hydrator {
    /// Extracts `resource` as the resource `short_name` in the configured variant.
    pub fn extract(
        &self,
        short_name: &str,
        resource: &dyn Resource,
    ) -> HydratorResult<Map<String, Value>> {
        self.extract_fqcn(&self.identity(short_name), resource)
    }

    pub fn extract_fqcn(
        &self,
        identity: &TypeIdentity,
        resource: &dyn Resource,
    ) -> HydratorResult<Map<String, Value>> {
        trace!(identity = %identity, resource = resource.resource_name(), "Extracting resource");
        let metadata = self.metadata().resolve(identity)?;

        let mut json = Map::new();
        for field in resource.fields() {
            let value = resource
                .field(field)
                .map_err(|source| HydratorError::field(identity, *field, source))?;
            let value = self.extract_field(identity, &metadata, field, value)?;
            json.insert((*field).to_owned(), value);
        }

        for (field, wire_name) in metadata.renames().iter() {
            if let Some(value) = json.remove(field) {
                json.insert(wire_name.to_owned(), value);
            }
        }

        Ok(json)
    }

    fn extract_field(
        &self,
        identity: &TypeIdentity,
        metadata: &ResourceMetadata,
        field: &str,
        value: FieldRef<'_>,
    ) -> HydratorResult<Value> {
        match value {
            FieldRef::Scalar(value) => Ok(value),
            FieldRef::Resource(None) => Ok(Value::Null),
            FieldRef::Resource(Some(nested)) => {
                let target = metadata
                    .nested()
                    .get(field)
                    .ok_or_else(|| HydratorError::malformed(identity, field, "scalar", "resource"))?;
                self.extract_fqcn(&identity.sibling(target), nested)
                    .map(Value::Object)
            }
            FieldRef::Collection(items) => {
                let target = metadata.collections().get(field).ok_or_else(|| {
                    HydratorError::malformed(identity, field, "scalar", "collection")
                })?;
                let target = identity.sibling(target);
                items
                    .into_iter()
                    .map(|item| self.extract_fqcn(&target, item).map(Value::Object))
                    .collect::<HydratorResult<Vec<_>>>()
                    .map(Value::Array)
            }
        }
    }
}
