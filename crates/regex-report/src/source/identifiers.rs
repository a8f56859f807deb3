//! Identifier tables on disk.
//!
//! One tab-separated file per namespace, `<dir>/<prefix>.tsv`, with an
//! `identifier` column and an optional `name` column:
//!
//! ```text
//! identifier	name
//! 15377	water
//! 16236	ethanol
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use indexmap::IndexSet;

use super::{IdentifierFetch, IdentifierSource};
use crate::config::is_plain_prefix;

/// Names of the namespace most recently read.
#[derive(Debug, Default)]
struct NameCache {
    prefix: String,
    names: HashMap<String, String>,
}

/// Identifier source backed by a directory of name tables.
#[derive(Debug)]
pub struct DirectoryIdentifiers {
    dir: PathBuf,
    cache: RefCell<Option<NameCache>>,
}

impl DirectoryIdentifiers {
    /// Read tables from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RefCell::new(None),
        }
    }

    /// Directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn table_path(&self, prefix: &str) -> Option<PathBuf> {
        if !is_plain_prefix(prefix) {
            return None;
        }
        Some(self.dir.join(format!("{}.tsv", prefix)))
    }

    /// Read a table into ordered, de-duplicated identifiers plus names.
    fn read_table(path: &Path) -> Result<(Vec<String>, HashMap<String, String>), csv::Error> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let mut identifiers = IndexSet::new();
        let mut names = HashMap::new();

        for record in reader.records() {
            let record = record?;
            // Identifiers are kept as written; stray whitespace is what the
            // report is meant to catch.
            let Some(identifier) = record.get(0).filter(|s| !s.is_empty()) else {
                continue;
            };
            if let Some(name) = record.get(1).map(str::trim).filter(|s| !s.is_empty()) {
                names
                    .entry(identifier.to_string())
                    .or_insert_with(|| name.to_string());
            }
            identifiers.insert(identifier.to_string());
        }

        Ok((identifiers.into_iter().collect(), names))
    }
}

impl IdentifierSource for DirectoryIdentifiers {
    fn identifiers(&self, prefix: &str) -> IdentifierFetch {
        let Some(path) = self.table_path(prefix) else {
            return IdentifierFetch::NotFound;
        };
        if !path.is_file() {
            return IdentifierFetch::NotFound;
        }

        match Self::read_table(&path) {
            Ok((identifiers, names)) => {
                *self.cache.borrow_mut() = Some(NameCache {
                    prefix: prefix.to_string(),
                    names,
                });
                IdentifierFetch::Found(identifiers)
            }
            Err(e) => IdentifierFetch::Unavailable(format!("{}: {}", path.display(), e)),
        }
    }

    fn name(&self, prefix: &str, identifier: &str) -> Option<String> {
        let cached = self
            .cache
            .borrow()
            .as_ref()
            .is_some_and(|cache| cache.prefix == prefix);

        if !cached {
            let path = self.table_path(prefix)?;
            let (_, names) = Self::read_table(&path).ok()?;
            *self.cache.borrow_mut() = Some(NameCache {
                prefix: prefix.to_string(),
                names,
            });
        }

        self.cache
            .borrow()
            .as_ref()
            .and_then(|cache| cache.names.get(identifier).cloned())
    }

    fn source_version(&self) -> String {
        format!("{} ({})", env!("CARGO_PKG_VERSION"), self.dir.display())
    }
}
