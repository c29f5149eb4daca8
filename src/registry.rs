//! Schema Registry
//!
//! The run-scoped validation engine. Schemas are registered by `$id` during
//! loading; compiling a schema afterwards resolves every external `$ref`
//! against the registered documents only. Nothing is fetched from the
//! network or the filesystem, so a reference to an unregistered `$id`
//! fails the build.

use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::config::CompileConfig;
use crate::error::Result;

/// Base URI that relative identifiers resolve against
pub const DEFAULT_BASE_URI: &str = "json-schema:///";

/// Registration rejected because the `$id` is already taken
#[derive(Error, Debug)]
#[error("schema with $id '{id}' already registered by {}", first.display())]
pub struct DuplicateId {
    pub id: String,
    pub first: PathBuf,
}

/// Serves `$ref` lookups from the registered documents
struct RegistryRetriever {
    documents: Arc<HashMap<String, Value>>,
}

impl Retrieve for RegistryRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> std::result::Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let key = resource_key(uri.as_str());
        match self.documents.get(&key) {
            Some(document) => Ok(document.clone()),
            None => Err(format!("no schema registered with $id '{}'", uri.as_str()).into()),
        }
    }
}

/// Registered schemas plus the engine settings used to compile them
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    draft: Option<Draft>,
    validate_formats: bool,
    /// Resolved URI -> document
    documents: Arc<HashMap<String, Value>>,
    /// Resolved URI -> source file
    sources: HashMap<String, PathBuf>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// An empty registry with format validation on and draft detection
    pub fn new() -> Self {
        Self {
            draft: None,
            validate_formats: true,
            documents: Arc::new(HashMap::new()),
            sources: HashMap::new(),
        }
    }

    /// An empty registry using the engine settings from the config
    pub fn from_config(config: &CompileConfig) -> Result<Self> {
        let mut registry = Self::new();
        registry.draft = config.draft()?;
        registry.validate_formats = config.validate_formats;
        Ok(registry)
    }

    /// Register `document` under `id`.
    ///
    /// References are not resolved here; they surface in [`Self::compile`].
    pub fn register(
        &mut self,
        id: &str,
        path: &Path,
        document: Value,
    ) -> std::result::Result<(), DuplicateId> {
        let key = resource_key(id);
        if let Some(first) = self.sources.get(&key) {
            return Err(DuplicateId {
                id: id.to_string(),
                first: first.clone(),
            });
        }

        tracing::debug!(id, uri = %key, path = %path.display(), "registered schema");
        self.sources.insert(key.clone(), path.to_path_buf());
        Arc::make_mut(&mut self.documents).insert(key, document);
        Ok(())
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether a schema is registered under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(&resource_key(id))
    }

    /// Compile `document` standalone, resolving its references against the
    /// registered schemas
    pub fn compile(&self, document: &Value) -> std::result::Result<Validator, String> {
        let mut options = jsonschema::options();
        if let Some(draft) = self.draft {
            options.with_draft(draft);
        }
        options
            .should_validate_formats(self.validate_formats)
            .with_retriever(RegistryRetriever {
                documents: Arc::clone(&self.documents),
            });

        options.build(document).map_err(|e| e.to_string())
    }
}

/// The URI a schema identifier resolves to.
///
/// Absolute identifiers are kept; relative ones resolve against
/// [`DEFAULT_BASE_URI`]. Fragments are dropped.
pub fn resource_key(id: &str) -> String {
    let id = id.split('#').next().unwrap_or_default();
    if has_scheme(id) {
        id.to_string()
    } else {
        let relative = id.trim_start_matches("./").trim_start_matches('/');
        format!("{DEFAULT_BASE_URI}{relative}")
    }
}

fn has_scheme(id: &str) -> bool {
    let Some((scheme, _)) = id.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
