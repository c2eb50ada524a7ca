//! Fully qualified resource type names.

use std::fmt;
use std::sync::Arc;

/// Path separator between namespace segments of a [`TypeIdentity`].
pub const SEPARATOR: &str = "::";

/// Opaque, cheaply cloneable name of a resource type (e.g. `travis::sync::Repository`).
///
/// Identities key the [`TypeRegistry`](crate::TypeRegistry) and the metadata cache.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentity(Arc<str>);

impl TypeIdentity {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment, i.e. the short resource name.
    pub fn short_name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// Everything before the short name, or `""` for an unqualified identity.
    pub fn namespace(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(index) => &self.0[..index],
            None => "",
        }
    }

    /// Resolves a metadata target relative to this identity.
    ///
    /// Qualified targets are taken verbatim; short names resolve inside this identity's
    /// namespace, so `sync::Repository` + `SubResource` gives `sync::SubResource`.
    pub fn sibling(&self, target: &str) -> Self {
        if target.contains(SEPARATOR) {
            return Self::new(target);
        }
        match self.namespace() {
            "" => Self::new(target),
            namespace => Self::new(format!("{namespace}{SEPARATOR}{target}")),
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIdentity({})", self.0)
    }
}

impl From<&str> for TypeIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeIdentity {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&TypeIdentity> for TypeIdentity {
    fn from(identity: &TypeIdentity) -> Self {
        identity.clone()
    }
}

impl AsRef<str> for TypeIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
