//! Bioregistry-style JSON registry.

use std::fs;
use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::RegistryLocation;
use crate::error::{ReportError, Result};

use super::RegistrySource;

/// Metadata a resource carries from one external registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// OBO Foundry's capitalized form of the prefix.
    #[serde(
        default,
        rename = "preferredPrefix",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_prefix: Option<String>,
}

/// A registry entry for one prefix.
///
/// Curated top-level fields win. Anything missing falls back to what the
/// mapped external registries say.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Link template with a `$1` placeholder for the identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miriam: Option<ExternalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n2t: Option<ExternalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obofoundry: Option<ExternalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ols: Option<ExternalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikidata: Option<ExternalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixcommons: Option<ExternalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioportal: Option<ExternalEntry>,
}

impl Resource {
    /// Create an empty resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the identifier pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the link template.
    pub fn with_uri_format(mut self, uri_format: impl Into<String>) -> Self {
        self.uri_format = Some(uri_format.into());
        self
    }

    fn pattern_sources(&self) -> [Option<&ExternalEntry>; 4] {
        [
            self.miriam.as_ref(),
            self.n2t.as_ref(),
            self.wikidata.as_ref(),
            self.prefixcommons.as_ref(),
        ]
    }

    fn name_sources(&self) -> [Option<&ExternalEntry>; 7] {
        [
            self.miriam.as_ref(),
            self.ols.as_ref(),
            self.obofoundry.as_ref(),
            self.wikidata.as_ref(),
            self.n2t.as_ref(),
            self.prefixcommons.as_ref(),
            self.bioportal.as_ref(),
        ]
    }

    /// Pattern, falling back to MIRIAM, N2T, Wikidata and Prefix Commons.
    pub fn get_pattern(&self) -> Option<&str> {
        self.pattern.as_deref().or_else(|| {
            self.pattern_sources()
                .into_iter()
                .flatten()
                .find_map(|entry| entry.pattern.as_deref())
        })
    }

    /// Display name, falling back to the external registries.
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref().or_else(|| {
            self.name_sources()
                .into_iter()
                .flatten()
                .find_map(|entry| entry.name.as_deref())
        })
    }

    /// Version, falling back to what OLS reports.
    pub fn get_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or_else(|| self.ols.as_ref().and_then(|ols| ols.version.as_deref()))
    }

    /// Canonical link for an identifier in this namespace.
    ///
    /// Order: the curated `uri_format`, then identifiers.org for MIRIAM
    /// namespaces, then the OBO PURL for OBO Foundry ontologies.
    pub fn get_iri(&self, prefix: &str, identifier: &str) -> Option<String> {
        if let Some(uri_format) = &self.uri_format {
            return Some(uri_format.replace("$1", identifier));
        }
        if let Some(miriam) = &self.miriam {
            let miriam_prefix = miriam.prefix.as_deref().unwrap_or(prefix);
            return Some(format!(
                "https://identifiers.org/{}:{}",
                miriam_prefix, identifier
            ));
        }
        if let Some(obo) = &self.obofoundry {
            let obo_prefix = obo
                .preferred_prefix
                .clone()
                .unwrap_or_else(|| obo.prefix.as_deref().unwrap_or(prefix).to_uppercase());
            return Some(format!(
                "http://purl.obolibrary.org/obo/{}_{}",
                obo_prefix, identifier
            ));
        }
        None
    }
}

/// Registry loaded from a JSON document mapping prefix to resource.
#[derive(Debug, Clone)]
pub struct JsonRegistry {
    resources: IndexMap<String, Resource>,
    version: String,
}

impl JsonRegistry {
    /// Load from a path or URL.
    pub fn load(location: &RegistryLocation) -> Result<Self> {
        match location {
            RegistryLocation::Path(path) => Self::from_path(path),
            RegistryLocation::Url(url) => Self::from_url(url),
        }
    }

    /// Load from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| ReportError::io(path, e))?;
        Self::from_slice(&contents)
    }

    /// Download and parse the registry.
    pub fn from_url(url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ReportError::Http(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(url, "downloading registry");
        let response = client
            .get(url)
            .send()
            .map_err(|e| ReportError::Http(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(ReportError::Http(format!(
                "Registry request to {} returned {}",
                url,
                response.status()
            )));
        }

        let contents = response
            .bytes()
            .map_err(|e| ReportError::Http(format!("Failed to read registry body: {}", e)))?;
        Self::from_slice(&contents)
    }

    /// Parse a registry document.
    pub fn from_slice(contents: &[u8]) -> Result<Self> {
        let resources: IndexMap<String, Resource> = serde_json::from_slice(contents)?;
        if resources.is_empty() {
            return Err(ReportError::Registry(
                "registry document has no resources".to_string(),
            ));
        }

        let digest = format!("{:x}", Sha256::digest(contents));
        let version = format!("sha256:{}", &digest[..12]);
        tracing::debug!(resources = resources.len(), %version, "loaded registry");

        Ok(Self { resources, version })
    }
}

impl RegistrySource for JsonRegistry {
    fn resources(&self) -> &IndexMap<String, Resource> {
        &self.resources
    }

    fn source_version(&self) -> String {
        self.version.clone()
    }
}
