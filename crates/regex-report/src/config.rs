//! Run configuration.
//!
//! There is no configuration file. Defaults cover the public registry and the
//! usual working-directory layout; a handful of environment variables can
//! override them.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// Where the published bioregistry document lives.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/biopragmatics/bioregistry/main/exports/registry/registry.json";

/// Number of invalid identifiers kept per entry in the structured report.
pub const DEFAULT_SAMPLE_SIZE: usize = 25;

/// Prefixes whose identifier sets are too large or too irregular to score.
pub const DEFAULT_SKIP: &[&str] = &[
    "gaz",
    "ncbigene",
    "pubchem.compound",
    "pubchem.substance",
    "umls",
    "antibodyregistry",
    "ncit",
    "mesh",
];

/// Prefix families excluded by leading match.
pub const DEFAULT_SKIP_PREFIXES: &[&str] = &["kegg"];

/// Environment variable naming the registry path or URL.
pub const ENV_REGISTRY: &str = "REGEX_REPORT_REGISTRY";
/// Environment variable naming the identifier table directory.
pub const ENV_IDENTIFIERS: &str = "REGEX_REPORT_IDENTIFIERS";
/// Environment variable naming the output root.
pub const ENV_OUTPUT: &str = "REGEX_REPORT_OUTPUT";
/// Environment variable selecting the table layout (`full` or `legacy`).
pub const ENV_TABLE: &str = "REGEX_REPORT_TABLE";

/// Location of the registry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryLocation {
    /// A JSON file on disk.
    Path(PathBuf),
    /// A JSON document fetched over HTTP(S).
    Url(String),
}

impl RegistryLocation {
    /// Interpret a string as a URL if it has an http(s) scheme, else as a path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            RegistryLocation::Url(value.to_string())
        } else {
            RegistryLocation::Path(PathBuf::from(value))
        }
    }
}

impl std::fmt::Display for RegistryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryLocation::Path(path) => write!(f, "{}", path.display()),
            RegistryLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Column layout of `report_table.tsv`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableLayout {
    /// `prefix, invalid, total, percent_invalid`
    #[default]
    Full,
    /// `prefix, invalid, total`
    Legacy,
}

impl std::str::FromStr for TableLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(TableLayout::Full),
            "legacy" | "minimal" => Ok(TableLayout::Legacy),
            _ => Err(format!("Unknown table layout: {}. Use full or legacy.", s)),
        }
    }
}

/// Configuration for a report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Registry document location.
    pub registry: RegistryLocation,
    /// Directory holding one `<prefix>.tsv` name table per namespace.
    pub identifiers_dir: PathBuf,
    /// Root under which `_data/` and `results/` are written.
    pub output_dir: PathBuf,
    /// Prefixes excluded by exact match.
    pub skip: BTreeSet<String>,
    /// Prefixes excluded when they start with any of these.
    pub skip_prefixes: BTreeSet<String>,
    /// Cap on invalid identifiers listed per structured entry.
    pub sample_size: usize,
    /// Layout of the aggregate table.
    pub table_layout: TableLayout,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            registry: RegistryLocation::Url(DEFAULT_REGISTRY_URL.to_string()),
            identifiers_dir: PathBuf::from("names"),
            output_dir: PathBuf::from("."),
            skip: DEFAULT_SKIP.iter().map(|s| s.to_string()).collect(),
            skip_prefixes: DEFAULT_SKIP_PREFIXES.iter().map(|s| s.to_string()).collect(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            table_layout: TableLayout::Full,
        }
    }
}

impl ReportConfig {
    /// Defaults overlaid with any `REGEX_REPORT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ReportConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(registry) = lookup(ENV_REGISTRY).filter(|v| !v.is_empty()) {
            config.registry = RegistryLocation::parse(&registry);
        }
        if let Some(dir) = lookup(ENV_IDENTIFIERS).filter(|v| !v.is_empty()) {
            config.identifiers_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_OUTPUT).filter(|v| !v.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(layout) = lookup(ENV_TABLE).filter(|v| !v.is_empty()) {
            config.table_layout = layout
                .parse()
                .map_err(|e: String| ReportError::Config(format!("{}: {}", ENV_TABLE, e)))?;
        }

        Ok(config)
    }

    /// Set the registry location.
    pub fn with_registry(mut self, registry: RegistryLocation) -> Self {
        self.registry = registry;
        self
    }

    /// Set the identifier table directory.
    pub fn with_identifiers_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.identifiers_dir = dir.into();
        self
    }

    /// Set the output root.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Replace the exact-match exclusions.
    pub fn with_skip<I, S>(mut self, skip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip = skip.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the leading-match exclusions.
    pub fn with_skip_prefixes<I, S>(mut self, skip_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_prefixes = skip_prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the structured-report sample cap.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the table layout.
    pub fn with_table_layout(mut self, layout: TableLayout) -> Self {
        self.table_layout = layout;
        self
    }

    /// Directory for the aggregate artifacts.
    pub fn data_dir(&self) -> PathBuf {
        self.output_dir.join("_data")
    }

    /// Directory for the per-prefix detail files.
    pub fn results_dir(&self) -> PathBuf {
        self.output_dir.join("results")
    }

    /// Path of the detail file for one prefix.
    pub fn detail_path(&self, prefix: &str) -> PathBuf {
        detail_path(&self.results_dir(), prefix)
    }
}

/// Whether `prefix` can name a file inside a directory.
///
/// Empty prefixes, hidden names and anything carrying a path separator or
/// drive colon are rejected, so joining never leaves the directory.
pub fn is_plain_prefix(prefix: &str) -> bool {
    !prefix.is_empty()
        && !prefix.starts_with('.')
        && !prefix.contains(|c: char| c == '/' || c == '\\' || c == ':')
}

/// `<results>/<prefix>.tsv`
///
/// The suffix is appended rather than substituted so dotted prefixes such as
/// `pubchem.compound` keep their full name.
pub fn detail_path(results_dir: &Path, prefix: &str) -> PathBuf {
    results_dir.join(format!("{}.tsv", prefix))
}
