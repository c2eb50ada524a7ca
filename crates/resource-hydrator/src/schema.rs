//! # Declarative Resource Schemas
//!
//! A [`Schema`] is the static description of how one resource type maps onto JSON:
//!
//! - **nested** fields hold a single JSON object hydrated into another resource,
//! - **collection** fields hold an array of objects hydrated into a sequence of resources,
//! - **renames** map an in-memory field name to the different name used on the wire.
//!
//! Each of the three kinds is either *declared* (possibly empty) or *absent*. The
//! difference matters for inheritance: an absent kind falls back to the parent's
//! declaration, a declared empty kind does not.
//!
//! ```rust
//! use resource_hydrator::Schema;
//!
//! let schema = Schema::new()
//!     .nested("sub", "SubResource")
//!     .collection("subs", "SubResource")
//!     .rename("slug", "slog");
//!
//! assert_eq!(schema.nested_map().and_then(|map| map.get("sub")), Some("SubResource"));
//! assert!(schema.parent().is_none());
//! ```

use crate::error::HydratorError;
use crate::identity::TypeIdentity;

/// Ordered `field -> value` pairs. Order is declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `field`, keeping its original position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F, V> FromIterator<(F, V)> for FieldMap
where
    F: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, value) in iter {
            map.insert(field, value);
        }
        map
    }
}

/// Static metadata for one resource type. Built with chained calls at registration time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    parent: Option<TypeIdentity>,
    nested: Option<FieldMap>,
    collections: Option<FieldMap>,
    renames: Option<FieldMap>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// A schema that declares nothing itself and inherits from `parent`.
    pub fn extends(parent: impl Into<TypeIdentity>) -> Self {
        Self::new().with_parent(parent)
    }

    pub fn with_parent(mut self, parent: impl Into<TypeIdentity>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Declares `field` as a single nested resource named `target`.
    pub fn nested(mut self, field: impl Into<String>, target: impl Into<String>) -> Self {
        self.nested.get_or_insert_with(FieldMap::new).insert(field, target);
        self
    }

    /// Declares `field` as a sequence of `target` resources.
    pub fn collection(mut self, field: impl Into<String>, target: impl Into<String>) -> Self {
        self.collections
            .get_or_insert_with(FieldMap::new)
            .insert(field, target);
        self
    }

    /// Declares that in-memory `field` is called `wire_name` in JSON.
    pub fn rename(mut self, field: impl Into<String>, wire_name: impl Into<String>) -> Self {
        self.renames
            .get_or_insert_with(FieldMap::new)
            .insert(field, wire_name);
        self
    }

    /// Declares an empty nested map, which stops inheritance of the parent's.
    pub fn without_nested(mut self) -> Self {
        self.nested.get_or_insert_with(FieldMap::new);
        self
    }

    /// Declares an empty collection map, which stops inheritance of the parent's.
    pub fn without_collections(mut self) -> Self {
        self.collections.get_or_insert_with(FieldMap::new);
        self
    }

    /// Declares an empty rename map, which stops inheritance of the parent's.
    pub fn without_renames(mut self) -> Self {
        self.renames.get_or_insert_with(FieldMap::new);
        self
    }

    pub fn parent(&self) -> Option<&TypeIdentity> {
        self.parent.as_ref()
    }

    pub fn nested_map(&self) -> Option<&FieldMap> {
        self.nested.as_ref()
    }

    pub fn collection_map(&self) -> Option<&FieldMap> {
        self.collections.as_ref()
    }

    pub fn rename_map(&self) -> Option<&FieldMap> {
        self.renames.as_ref()
    }

    /// A field may be nested or a collection, never both.
    pub(crate) fn validate(&self, identity: &TypeIdentity) -> Result<(), HydratorError> {
        let (Some(nested), Some(collections)) = (&self.nested, &self.collections) else {
            return Ok(());
        };
        match nested.iter().find(|(field, _)| collections.contains(field)) {
            Some((field, _)) => Err(HydratorError::InvalidSchema {
                identity: identity.clone(),
                reason: format!("field `{field}` is declared both nested and as a collection"),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_map_keeps_declaration_order_on_replace() {
        let mut map: FieldMap = [("b", "1"), ("a", "2")].into_iter().collect();
        map.insert("b", "3");

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("b", "3"), ("a", "2")]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn declared_empty_kind_differs_from_absent() {
        let schema = Schema::extends("api::Base").without_renames();

        assert_eq!(schema.rename_map(), Some(&FieldMap::new()));
        assert!(schema.nested_map().is_none());
        assert_eq!(schema.parent().map(TypeIdentity::as_str), Some("api::Base"));
    }

    #[test]
    fn validate_rejects_field_in_both_maps() {
        let identity = TypeIdentity::from("api::sync::Repository");
        let schema = Schema::new()
            .nested("sub", "SubResource")
            .collection("sub", "SubResource");

        let error = schema.validate(&identity).unwrap_err();
        assert!(matches!(error, HydratorError::InvalidSchema { .. }));

        let ok = Schema::new()
            .nested("sub", "SubResource")
            .collection("subs", "SubResource");
        assert!(ok.validate(&identity).is_ok());
    }
}
