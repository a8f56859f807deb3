//! In-memory sources with predictable contents, for tests and embedding.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::{IdentifierFetch, IdentifierSource, RegistrySource, Resource};

/// Registry held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRegistry {
    resources: IndexMap<String, Resource>,
    version: String,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            resources: IndexMap::new(),
            version: "in-memory".to_string(),
        }
    }

    /// Add or replace a resource.
    pub fn with_resource(mut self, prefix: impl Into<String>, resource: Resource) -> Self {
        self.resources.insert(prefix.into(), resource);
        self
    }

    /// Set the reported registry version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrySource for InMemoryRegistry {
    fn resources(&self) -> &IndexMap<String, Resource> {
        &self.resources
    }

    fn source_version(&self) -> String {
        self.version.clone()
    }
}

#[derive(Debug, Clone)]
enum Namespace {
    Loaded(IndexMap<String, Option<String>>),
    Unavailable(String),
}

/// Identifier source held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryIdentifiers {
    namespaces: HashMap<String, Namespace>,
    version: String,
}

impl InMemoryIdentifiers {
    /// Create a source that knows no namespaces.
    pub fn new() -> Self {
        Self {
            namespaces: HashMap::new(),
            version: "in-memory".to_string(),
        }
    }

    /// Add a namespace whose identifiers have no names.
    pub fn with_identifiers<I, S>(self, prefix: impl Into<String>, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_named(
            prefix,
            identifiers
                .into_iter()
                .map(|id| (id.into(), None::<String>))
                .collect::<Vec<(String, Option<String>)>>(),
        )
    }

    /// Add a namespace with optional names per identifier.
    pub fn with_named<I, S, N>(mut self, prefix: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<N>)>,
        S: Into<String>,
        N: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(id, name)| (id.into(), name.map(Into::into)))
            .collect();
        self.namespaces
            .insert(prefix.into(), Namespace::Loaded(entries));
        self
    }

    /// Add a namespace that fails to load.
    pub fn with_unavailable(mut self, prefix: impl Into<String>, reason: impl Into<String>) -> Self {
        self.namespaces
            .insert(prefix.into(), Namespace::Unavailable(reason.into()));
        self
    }

    /// Set the reported source version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for InMemoryIdentifiers {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierSource for InMemoryIdentifiers {
    fn identifiers(&self, prefix: &str) -> IdentifierFetch {
        match self.namespaces.get(prefix) {
            Some(Namespace::Loaded(entries)) => {
                IdentifierFetch::Found(entries.keys().cloned().collect())
            }
            Some(Namespace::Unavailable(reason)) => IdentifierFetch::Unavailable(reason.clone()),
            None => IdentifierFetch::NotFound,
        }
    }

    fn name(&self, prefix: &str, identifier: &str) -> Option<String> {
        match self.namespaces.get(prefix)? {
            Namespace::Loaded(entries) => entries.get(identifier).cloned().flatten(),
            Namespace::Unavailable(_) => None,
        }
    }

    fn source_version(&self) -> String {
        self.version.clone()
    }
}
