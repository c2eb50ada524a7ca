#![allow(dead_code)]

use resource_hydrator::mock::MockTransport;
use resource_hydrator::tracing::setup_tracing;
use resource_hydrator::{FieldError, HydratorOptions, Schema, TypeRegistry};
use serde_json::{json, Value};
use std::sync::Arc;

pub const NAMESPACE: &str = "tests::resources";

pub mod sync_api {
    use resource_hydrator::resource;

    resource! {
        pub struct Repository {
            scalar id: u64,
            scalar slug: String,
            nested sub: SubResource,
            collection subs: SubResource,
        }
    }

    resource! {
        pub struct SubResource {
            scalar id: u64,
            scalar slug: String,
        }
    }

    resource! {
        /// Declares nothing itself; inherits `Base`.
        pub struct Fork {
            scalar id: u64,
            nested sub: SubResource,
        }
    }

    resource! {
        /// Extends `Fork`, two levels below `Base`.
        pub struct Mirror {
            scalar id: u64,
            nested sub: SubResource,
        }
    }

    resource! {
        /// Nested and collection fields that are also renamed on the wire.
        pub struct Project {
            scalar slug: String,
            nested owner: SubResource,
            collection kids: SubResource,
        }
    }

    resource! {
        pub struct Plain {
            scalar id: u64,
        }
    }
}

pub mod async_api {
    use resource_hydrator::resource;

    resource! {
        pub struct Repository {
            scalar id: u64,
            scalar slug: String,
            nested sub: SubResource,
            collection subs: SubResource,
        }
    }

    resource! {
        pub struct SubResource {
            scalar id: u64,
            scalar slug: String,
        }
    }
}

resource_hydrator::resource! {
    pub struct Labelled {
        scalar id: u64,
        scalar labels: Vec<String>,
        scalar strict: bool,
    }
    setters {
        "addLabel" => add_label,
        "setStrict" => set_strict,
    }
}

impl Labelled {
    fn add_label(&mut self, argument: &Value) -> Result<(), FieldError> {
        let label = argument
            .as_str()
            .ok_or_else(|| FieldError::Setter("label must be a string".into()))?;
        self.labels.push(label.to_owned());
        Ok(())
    }

    fn set_strict(&mut self, argument: &Value) -> Result<(), FieldError> {
        self.strict = argument
            .as_bool()
            .ok_or_else(|| FieldError::Setter("strict must be a boolean".into()))?;
        Ok(())
    }
}

pub fn identity(variant: &str, short_name: &str) -> String {
    format!("{NAMESPACE}::{variant}::{short_name}")
}

pub fn repository_schema() -> Schema {
    Schema::new()
        .nested("sub", "SubResource")
        .collection("subs", "SubResource")
        .rename("slug", "slog")
}

pub fn types() -> Arc<TypeRegistry> {
    let types = TypeRegistry::builder()
        .register::<sync_api::Repository>(identity("sync", "Repository"), repository_schema())
        .register::<sync_api::SubResource>(identity("sync", "SubResource"), Schema::new())
        .register::<async_api::Repository>(identity("async", "Repository"), repository_schema())
        .register::<async_api::SubResource>(identity("async", "SubResource"), Schema::new())
        .describe(
            identity("sync", "Base"),
            Schema::new().nested("sub", "SubResource"),
        )
        .register::<sync_api::Fork>(
            identity("sync", "Fork"),
            Schema::extends(identity("sync", "Base")),
        )
        .register::<sync_api::Mirror>(
            identity("sync", "Mirror"),
            Schema::extends(identity("sync", "Fork")),
        )
        .register::<sync_api::Project>(
            identity("sync", "Project"),
            Schema::new()
                .nested("owner", "SubResource")
                .collection("kids", "SubResource")
                .rename("slug", "slog")
                .rename("owner", "own")
                .rename("kids", "children"),
        )
        .register::<sync_api::Plain>(identity("sync", "Plain"), Schema::new())
        .register::<Labelled>(identity("sync", "Labelled"), Schema::new())
        .build()
        .expect("fixture schemas are valid");
    Arc::new(types)
}

pub fn transport(variant: &str) -> Arc<MockTransport> {
    setup_tracing();
    MockTransport::new(types(), HydratorOptions::new(NAMESPACE, variant))
}

pub fn transport_with(options: HydratorOptions) -> Arc<MockTransport> {
    setup_tracing();
    MockTransport::new(types(), options)
}

pub fn repository_json() -> Value {
    json!({
        "id": 1,
        "slog": "Wyrihaximus/php-travis-client",
        "sub": {"id": 1, "slug": "x"},
        "subs": [
            {"id": 1, "slug": "x"},
            {"id": 2, "slug": "y"},
        ],
    })
}
