use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// A post-construction setter invoked on every freshly created resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Setter {
    pub method: String,
    #[serde(default)]
    pub argument: Value,
}

/// Hydrator configuration.
///
/// `resource_hydrator_cache_dir` and `resource_hydrator_namespace` are accepted for
/// configuration compatibility with generated-code backends. The engine uses runtime
/// metadata and ignores both.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HydratorOptions {
    pub namespace: String,
    pub resource_namespace: String,
    pub resource_hydrator_cache_dir: Option<PathBuf>,
    pub resource_hydrator_namespace: Option<String>,
    pub setters: Vec<Setter>,
}

impl HydratorOptions {
    pub fn new(namespace: impl Into<String>, resource_namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            resource_namespace: resource_namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_setter(mut self, method: impl Into<String>, argument: Value) -> Self {
        self.setters.push(Setter {
            method: method.into(),
            argument,
        });
        self
    }

    pub fn with_generated_code_cache(
        mut self,
        cache_dir: impl Into<PathBuf>,
        namespace: impl Into<String>,
    ) -> Self {
        self.resource_hydrator_cache_dir = Some(cache_dir.into());
        self.resource_hydrator_namespace = Some(namespace.into());
        self
    }
}
