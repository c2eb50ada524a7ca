//! # Resource Type Catalog
//!
//! Turns the short names used by calling code (`"Repository"`) into fully qualified
//! [`TypeIdentity`] values by composing `namespace::variant::name`. The same short name
//! exists once per variant, which is what lets a resource move between its sync and
//! async representations.

use crate::identity::{TypeIdentity, SEPARATOR};

/// Variant tag for the blocking representation of a resource.
pub const SYNC: &str = "sync";
/// Variant tag for the async representation of a resource.
pub const ASYNC: &str = "async";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceCatalog {
    namespace: String,
}

impl ResourceCatalog {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let namespace = namespace.trim_end_matches(SEPARATOR).to_owned();
        Self { namespace }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn resolve(&self, short_name: &str, variant: &str) -> TypeIdentity {
        let mut identity = String::with_capacity(
            self.namespace.len() + variant.len() + short_name.len() + 2 * SEPARATOR.len(),
        );
        for segment in [self.namespace.as_str(), variant] {
            if !segment.is_empty() {
                identity.push_str(segment);
                identity.push_str(SEPARATOR);
            }
        }
        identity.push_str(short_name);
        TypeIdentity::from(identity)
    }
}
