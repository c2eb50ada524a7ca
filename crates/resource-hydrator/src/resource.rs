//! # The Resource Capability Contract
//!
//! Every type the engine can hydrate implements [`Resource`]. The trait is object safe,
//! so the engine works with `Box<dyn Resource>` and only callers that know the concrete
//! type downcast at the edge (see [`downcast`]).
//!
//! Implementations are not written by hand. The [`resource!`](crate::resource) macro
//! generates the struct, its field accessors and the trait impl from one declaration:
//!
//! ```rust
//! use resource_hydrator::{resource, FieldValue, Resource};
//! use serde_json::json;
//!
//! resource! {
//!     pub struct Build {
//!         scalar id: u64,
//!         scalar state: String,
//!     }
//! }
//!
//! let mut build = Build::default();
//! build.set_field("id", FieldValue::Scalar(json!(7))).unwrap();
//! assert_eq!(build.id, 7);
//! assert_eq!(Build::FIELDS, &["id", "state"]);
//! ```
//!
//! ## Field kinds
//!
//! | Kind | Declared as | Stored as |
//! |------|-------------|-----------|
//! | `scalar` | `scalar id: u64` | `u64` (any serde type) |
//! | `nested` | `nested sub: SubResource` | `Option<SubResource>` |
//! | `collection` | `collection subs: SubResource` | `Vec<SubResource>` |
//!
//! The kind only decides the Rust storage. Whether JSON is expanded into sub-resources is
//! decided by the type's [`Schema`](crate::Schema).

use crate::error::FieldError;
use crate::transport::TransportHandle;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::{type_name, Any};
use std::fmt::Debug;

/// A typed projection of one JSON object from the API.
pub trait Resource: Any + Send + Sync + Debug {
    /// Rust type name, used in logs and error messages.
    fn resource_name(&self) -> &'static str;

    /// Declared field names in declaration (wire) order.
    fn fields(&self) -> &'static [&'static str];

    /// Back-reference to the transport that produced this resource.
    fn transport(&self) -> &TransportHandle;

    /// Called by the hydrator right after construction.
    fn set_transport(&mut self, transport: TransportHandle);

    /// Reads a declared field.
    fn field(&self, name: &str) -> Result<FieldRef<'_>, FieldError>;

    /// Writes a declared field, converting to its declared type.
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError>;

    /// Invokes a post-construction setter by name.
    ///
    /// Returns `None` when this type has no setter called `method`; the hydrator skips it.
    fn call_setter(&mut self, method: &str, argument: &Value) -> Option<Result<(), FieldError>> {
        let _ = (method, argument);
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// An owned value on its way into a resource field.
#[derive(Debug)]
pub enum FieldValue {
    Scalar(Value),
    Resource(Box<dyn Resource>),
    Collection(Vec<Box<dyn Resource>>),
}

impl FieldValue {
    pub fn into_scalar<T: DeserializeOwned>(self) -> Result<T, FieldError> {
        match self {
            Self::Scalar(value) => serde_json::from_value(value).map_err(FieldError::Convert),
            _ => Err(FieldError::Shape { expected: "scalar" }),
        }
    }

    /// `null` becomes `None`; a hydrated resource must be an `R`.
    pub fn into_nested<R: Resource>(self) -> Result<Option<R>, FieldError> {
        match self {
            Self::Scalar(Value::Null) => Ok(None),
            Self::Resource(resource) => downcast_field(resource).map(Some),
            _ => Err(FieldError::Shape { expected: "nested resource" }),
        }
    }

    /// `null` becomes an empty sequence; every element must be an `R`.
    pub fn into_collection<R: Resource>(self) -> Result<Vec<R>, FieldError> {
        match self {
            Self::Scalar(Value::Null) => Ok(Vec::new()),
            Self::Collection(resources) => resources.into_iter().map(downcast_field).collect(),
            _ => Err(FieldError::Shape { expected: "resource collection" }),
        }
    }
}

/// A borrowed view of a resource field on its way out to JSON.
#[derive(Debug)]
pub enum FieldRef<'a> {
    Scalar(Value),
    Resource(Option<&'a dyn Resource>),
    Collection(Vec<&'a dyn Resource>),
}

impl<'a> FieldRef<'a> {
    pub fn scalar<T: Serialize + ?Sized>(value: &T) -> Result<Self, FieldError> {
        serde_json::to_value(value)
            .map(Self::Scalar)
            .map_err(FieldError::Convert)
    }

    pub fn nested<R: Resource>(value: Option<&'a R>) -> Self {
        Self::Resource(value.map(|resource| resource as &dyn Resource))
    }

    pub fn collection<R: Resource>(values: &'a [R]) -> Self {
        Self::Collection(
            values
                .iter()
                .map(|resource| resource as &dyn Resource)
                .collect(),
        )
    }
}

/// Recovers the concrete type of a hydrated resource.
pub fn downcast<R: Resource>(resource: Box<dyn Resource>) -> Result<R, crate::HydratorError> {
    downcast_field(resource).map_err(|error| match error {
        FieldError::TypeMismatch { expected, found } => {
            crate::HydratorError::TypeMismatch { expected, found }
        }
        other => crate::HydratorError::Transport(Box::new(other)),
    })
}

fn downcast_field<R: Resource>(resource: Box<dyn Resource>) -> Result<R, FieldError> {
    let found = resource.resource_name();
    resource
        .into_any()
        .downcast::<R>()
        .map(|resource| *resource)
        .map_err(|_| FieldError::TypeMismatch {
            expected: short_type_name::<R>(),
            found,
        })
}

fn short_type_name<T>() -> &'static str {
    let name = type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

/// Declares a resource struct and implements [`Resource`] for it.
///
/// Every generated struct has public fields plus a `transport` field, derives
/// `Debug`, `Clone`, `Default` and `PartialEq`, and exposes its field names as
/// `FIELDS`. An optional `setters` block maps post-construction setter names to
/// inherent methods with the signature
/// `fn(&mut self, &serde_json::Value) -> Result<(), FieldError>`.
///
/// ```rust
/// use resource_hydrator::{resource, FieldError, Resource};
/// use serde_json::{json, Value};
///
/// resource! {
///     pub struct Job {
///         scalar id: u64,
///         scalar label: Option<String>,
///     }
///     setters {
///         "setLabel" => apply_label,
///     }
/// }
///
/// impl Job {
///     fn apply_label(&mut self, argument: &Value) -> Result<(), FieldError> {
///         self.label = argument.as_str().map(str::to_owned);
///         Ok(())
///     }
/// }
///
/// let mut job = Job::default();
/// assert!(job.call_setter("setLabel", &json!("nightly")).is_some());
/// assert!(job.call_setter("setColour", &json!("red")).is_none());
/// assert_eq!(job.label.as_deref(), Some("nightly"));
/// ```
#[macro_export]
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $kind:ident $field:ident : $ty:ty ),* $(,)?
        }
        $( setters { $( $method:literal => $handler:ident ),* $(,)? } )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $( pub $field: $crate::__resource_field_type!($kind $ty), )*
            pub transport: $crate::TransportHandle,
        }

        impl $name {
            pub const FIELDS: &'static [&'static str] = &[$( stringify!($field) ),*];
        }

        impl $crate::Resource for $name {
            fn resource_name(&self) -> &'static str {
                stringify!($name)
            }

            fn fields(&self) -> &'static [&'static str] {
                Self::FIELDS
            }

            fn transport(&self) -> &$crate::TransportHandle {
                &self.transport
            }

            fn set_transport(&mut self, transport: $crate::TransportHandle) {
                self.transport = transport;
            }

            fn field(
                &self,
                name: &str,
            ) -> ::std::result::Result<$crate::FieldRef<'_>, $crate::FieldError> {
                $(
                    if name == stringify!($field) {
                        return $crate::__resource_field_get!($kind self.$field);
                    }
                )*
                Err($crate::FieldError::UnknownField(name.to_owned()))
            }

            fn set_field(
                &mut self,
                name: &str,
                value: $crate::FieldValue,
            ) -> ::std::result::Result<(), $crate::FieldError> {
                $(
                    if name == stringify!($field) {
                        self.$field = $crate::__resource_field_set!($kind value)?;
                        return Ok(());
                    }
                )*
                let _ = value;
                Err($crate::FieldError::UnknownField(name.to_owned()))
            }

            fn call_setter(
                &mut self,
                method: &str,
                argument: &$crate::__private::Value,
            ) -> ::std::option::Option<::std::result::Result<(), $crate::FieldError>> {
                $($(
                    if method == $method {
                        return Some(self.$handler(argument));
                    }
                )*)?
                let _ = (method, argument);
                None
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __resource_field_type {
    (scalar $ty:ty) => { $ty };
    (nested $ty:ty) => { ::std::option::Option<$ty> };
    (collection $ty:ty) => { ::std::vec::Vec<$ty> };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __resource_field_get {
    (scalar $value:expr) => {
        $crate::FieldRef::scalar(&$value)
    };
    (nested $value:expr) => {
        Ok($crate::FieldRef::nested($value.as_ref()))
    };
    (collection $value:expr) => {
        Ok($crate::FieldRef::collection(&$value))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __resource_field_set {
    (scalar $value:expr) => {
        $value.into_scalar()
    };
    (nested $value:expr) => {
        $value.into_nested()
    };
    (collection $value:expr) => {
        $value.into_collection()
    };
}
