//! External data sources.
//!
//! The report consumes two collaborators: a registry that knows each prefix's
//! pattern, name, version and link format, and an identifier source that
//! knows which identifiers exist in a namespace. Both are traits so the
//! pipeline can run against the published registry and on-disk name tables,
//! or against in-memory fixtures.

mod identifiers;
mod memory;
mod registry;

use indexmap::IndexMap;

pub use identifiers::DirectoryIdentifiers;
pub use memory::{InMemoryIdentifiers, InMemoryRegistry};
pub use registry::{ExternalEntry, JsonRegistry, Resource};

/// Registry of prefixes and their descriptors.
pub trait RegistrySource {
    /// All resources, keyed by prefix, in registry order.
    fn resources(&self) -> &IndexMap<String, Resource>;

    /// Version string of the registry itself.
    fn source_version(&self) -> String;

    /// Look up one resource.
    fn resource(&self, prefix: &str) -> Option<&Resource> {
        self.resources().get(prefix)
    }

    /// Display name of a prefix.
    fn name(&self, prefix: &str) -> Option<&str> {
        self.resource(prefix).and_then(Resource::get_name)
    }

    /// Version of the resource behind a prefix.
    fn version(&self, prefix: &str) -> Option<&str> {
        self.resource(prefix).and_then(Resource::get_version)
    }

    /// Regular expression identifiers of a prefix must match.
    fn pattern(&self, prefix: &str) -> Option<&str> {
        self.resource(prefix).and_then(Resource::get_pattern)
    }

    /// Canonical link for an identifier.
    fn iri(&self, prefix: &str, identifier: &str) -> Option<String> {
        self.resource(prefix)
            .and_then(|resource| resource.get_iri(prefix, identifier))
    }
}

/// Outcome of asking for a namespace's identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierFetch {
    /// The identifier set, possibly empty.
    Found(Vec<String>),
    /// The source knows nothing about this prefix.
    NotFound,
    /// The source has the prefix but could not produce its identifiers.
    Unavailable(String),
}

/// Source of identifiers and their names.
pub trait IdentifierSource {
    /// Every identifier in a namespace.
    fn identifiers(&self, prefix: &str) -> IdentifierFetch;

    /// Display name of one identifier, if known.
    fn name(&self, prefix: &str, identifier: &str) -> Option<String>;

    /// Version string of the source.
    fn source_version(&self) -> String;
}
